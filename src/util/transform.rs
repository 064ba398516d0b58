use glam::f64::DVec3;
use glam::f64::DQuat;
use glam::EulerRot;
use serde::{Serialize, Deserialize};
use crate::util::serialization_utils::dvec3_serializer;
use crate::util::serialization_utils::dquat_serializer;

/// A rigid transform: rotation followed by translation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transform {
  #[serde(with = "dvec3_serializer")]
  pub translation: DVec3,
  #[serde(with = "dquat_serializer")]
  pub rotation: DQuat,
}

impl Transform {
  pub fn new(translation: DVec3, rotation: DQuat) -> Self {
    Self { translation, rotation }
  }

  pub fn identity() -> Self {
    Self {
      translation: DVec3::ZERO,
      rotation: DQuat::IDENTITY,
    }
  }

  /// Calculates the inverse of this transform
  pub fn inverse(&self) -> Transform {
    let inv_rotation = self.rotation.conjugate(); // For unit quaternions, conjugate is the same as inverse
    let inv_translation = -(inv_rotation.mul_vec3(self.translation));
    Transform {
      translation: inv_translation,
      rotation: inv_rotation,
    }
  }

  /// Transforms a point from the local frame into the parent frame.
  pub fn transform_point(&self, point: DVec3) -> DVec3 {
    self.translation + self.rotation.mul_vec3(point)
  }

  /// Rotates a direction vector into the parent frame (translation ignored).
  pub fn transform_direction(&self, direction: DVec3) -> DVec3 {
    self.rotation.mul_vec3(direction)
  }

  /// Composes `rel` in the local frame of `self` and returns the result.
  ///
  /// This is the `self * rel` product: `rel` acts first, in coordinates
  /// local to `self`. Used to stack an offset transform on top of a
  /// computed placement.
  pub fn apply_local_new(&self, rel: &Transform) -> Transform {
    Transform::new(
      self.translation + self.rotation.mul_vec3(rel.translation),
      self.rotation * rel.rotation,
    )
  }

  /// Returns this transform rotated 180 degrees around its own X axis.
  ///
  /// Flips the local Z axis (and Y), keeping the origin and the X axis.
  /// This is the meaning of the attachment "reverse" flag.
  pub fn reversed(&self) -> Transform {
    let flip = DQuat::from_axis_angle(DVec3::X, std::f64::consts::PI);
    Transform::new(self.translation, self.rotation * flip)
  }

  /// Builds a transform from a translation and intrinsic Z-Y'-X'' Euler
  /// angles given in degrees (yaw around Z, then pitch, then roll).
  pub fn from_euler_deg(translation: DVec3, yaw: f64, pitch: f64, roll: f64) -> Self {
    let rotation = DQuat::from_euler(
      EulerRot::ZYX,
      yaw.to_radians(),
      pitch.to_radians(),
      roll.to_radians(),
    );
    Self { translation, rotation }
  }

  /// Decomposes the rotation into (yaw, pitch, roll) degrees, each
  /// normalized to the (-180, 180] range.
  ///
  /// Recomposing via `from_euler_deg` yields a rotation equal to the
  /// original only up to floating-point tolerance; callers must not expect
  /// bit-exact round-trips.
  pub fn to_euler_deg(&self) -> (f64, f64, f64) {
    let (yaw, pitch, roll) = self.rotation.to_euler(EulerRot::ZYX);
    (
      normalize_angle_deg(yaw.to_degrees()),
      normalize_angle_deg(pitch.to_degrees()),
      normalize_angle_deg(roll.to_degrees()),
    )
  }

  /// Tolerance-based equality for tests and drift checks.
  pub fn approx_eq(&self, other: &Transform, epsilon: f64) -> bool {
    if self.translation.distance(other.translation) > epsilon {
      return false;
    }
    // q and -q represent the same rotation
    let dot = self.rotation.dot(other.rotation).abs();
    (1.0 - dot) <= epsilon
  }
}

/// Wraps an angle in degrees into the (-180, 180] range.
pub fn normalize_angle_deg(angle: f64) -> f64 {
  let mut a = angle % 360.0;
  if a <= -180.0 {
    a += 360.0;
  } else if a > 180.0 {
    a -= 360.0;
  }
  a
}
