//! Pure geometric placement rules, one per attachment mode.
//!
//! Every rule maps resolved world-space reference geometry to a base rigid
//! transform, or reports "not attached" (`None`) when the geometry does not
//! determine a placement. Not-attached is an expected outcome, not an
//! error: a linear edge has no single radial direction, two coincident
//! points span no line, and so on. Rules never mutate their inputs.

use glam::f64::{DMat3, DQuat, DVec3};
use crate::attacher::mode::AttachmentModeId;
use crate::attacher::reference::{ResolvedGeometry, ResolvedReference};
use crate::document::shape::{EdgeGeometry, FaceGeometry, SubShape};
use crate::util::transform::Transform;

/// Squared-length threshold below which a direction is considered degenerate.
const DEGENERACY_TOLERANCE: f64 = 1e-18;

pub fn compute_base_placement(
    mode: AttachmentModeId,
    refs: &[ResolvedReference],
    hint: &Transform,
) -> Option<Transform> {
    match mode {
        AttachmentModeId::TranslateOrigin => translate_origin(refs, hint),
        AttachmentModeId::ObjectXY => object_plane(refs, ObjectPlane::XY),
        AttachmentModeId::ObjectXZ => object_plane(refs, ObjectPlane::XZ),
        AttachmentModeId::ObjectYZ => object_plane(refs, ObjectPlane::YZ),
        AttachmentModeId::FlatFace => flat_face(refs, hint),
        AttachmentModeId::TangentPlane => tangent_plane(refs, hint),
        AttachmentModeId::Concentric => concentric(refs, hint),
        AttachmentModeId::AlongLine => along_line(refs, hint),
        AttachmentModeId::NormalToEdge => normal_to_edge(refs, hint),
        AttachmentModeId::AxisOfCylinder => axis_of_cylinder(refs, hint),
        AttachmentModeId::ThreePointsPlane => three_points_plane(refs),
        AttachmentModeId::Folding => folding(refs),
    }
}

// ============================================================================
// Geometry extraction from resolved references
// ============================================================================

fn sub_shape(reference: &ResolvedReference) -> Option<&SubShape> {
    match &reference.geometry {
        ResolvedGeometry::SubShape(sub_shape) => Some(sub_shape),
        ResolvedGeometry::WholeObject(_) => None,
    }
}

fn vertex_point(reference: &ResolvedReference) -> Option<DVec3> {
    match sub_shape(reference)? {
        SubShape::Vertex { point } => Some(*point),
        _ => None,
    }
}

fn line_axis(reference: &ResolvedReference) -> Option<(DVec3, DVec3)> {
    match sub_shape(reference)? {
        SubShape::Edge(EdgeGeometry::Line { origin, direction }) => Some((*origin, *direction)),
        _ => None,
    }
}

fn edge_geometry(reference: &ResolvedReference) -> Option<&EdgeGeometry> {
    match sub_shape(reference)? {
        SubShape::Edge(edge) => Some(edge),
        _ => None,
    }
}

fn face_geometry(reference: &ResolvedReference) -> Option<&FaceGeometry> {
    match sub_shape(reference)? {
        SubShape::Face(face) => Some(face),
        _ => None,
    }
}

fn object_placement(reference: &ResolvedReference) -> Option<&Transform> {
    match &reference.geometry {
        ResolvedGeometry::WholeObject(placement) => Some(placement),
        ResolvedGeometry::SubShape(_) => None,
    }
}

// ============================================================================
// Frame construction
// ============================================================================

/// Builds a rotation with the given Z axis, seeding the X axis from the
/// hint placement so the frame stays stable under small reference edits.
fn rotation_with_z(z: DVec3, hint: &Transform) -> Option<DQuat> {
    let z = z.try_normalize()?;
    let hint_x = hint.rotation.mul_vec3(DVec3::X);
    let mut x = hint_x - z * hint_x.dot(z);
    if x.length_squared() < DEGENERACY_TOLERANCE {
        // Hint X is parallel to Z; fall back to a fixed global axis.
        let fallback = if z.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
        x = fallback - z * fallback.dot(z);
    }
    let x = x.try_normalize()?;
    let y = z.cross(x);
    Some(DQuat::from_mat3(&DMat3::from_cols(x, y, z)))
}

/// Builds a rotation from a Z axis and a preferred X direction, which is
/// orthogonalized against Z. Degenerate (parallel) input yields None.
fn rotation_from_zx(z: DVec3, x_dir: DVec3) -> Option<DQuat> {
    let z = z.try_normalize()?;
    let x = x_dir - z * x_dir.dot(z);
    if x.length_squared() < DEGENERACY_TOLERANCE {
        return None;
    }
    let x = x.normalize();
    let y = z.cross(x);
    Some(DQuat::from_mat3(&DMat3::from_cols(x, y, z)))
}

// ============================================================================
// Mode rules
// ============================================================================

fn translate_origin(refs: &[ResolvedReference], hint: &Transform) -> Option<Transform> {
    let point = vertex_point(refs.first()?)?;
    // Orientation is left as-is; only the origin moves.
    Some(Transform::new(point, hint.rotation))
}

enum ObjectPlane {
    XY,
    XZ,
    YZ,
}

fn object_plane(refs: &[ResolvedReference], plane: ObjectPlane) -> Option<Transform> {
    let placement = object_placement(refs.first()?)?;
    let rotation = match plane {
        ObjectPlane::XY => placement.rotation,
        // Local X stays, local Z becomes the new Y.
        ObjectPlane::XZ => {
            placement.rotation * DQuat::from_mat3(&DMat3::from_cols(DVec3::X, DVec3::Z, -DVec3::Y))
        }
        // Local Y becomes the new X, local Z the new Y.
        ObjectPlane::YZ => {
            placement.rotation * DQuat::from_mat3(&DMat3::from_cols(DVec3::Y, DVec3::Z, DVec3::X))
        }
    };
    Some(Transform::new(placement.translation, rotation))
}

fn flat_face(refs: &[ResolvedReference], hint: &Transform) -> Option<Transform> {
    match face_geometry(refs.first()?)? {
        FaceGeometry::Plane { origin, normal } => {
            let rotation = rotation_with_z(*normal, hint)?;
            Some(Transform::new(*origin, rotation))
        }
        _ => None,
    }
}

fn tangent_plane(refs: &[ResolvedReference], hint: &Transform) -> Option<Transform> {
    let face = face_geometry(refs.first()?)?;
    let point = vertex_point(refs.get(1)?)?;
    match face {
        FaceGeometry::Plane { origin, normal } => {
            let normal = normal.try_normalize()?;
            // Project the vertex onto the plane.
            let foot = point - normal * (point - *origin).dot(normal);
            let rotation = rotation_with_z(normal, hint)?;
            Some(Transform::new(foot, rotation))
        }
        FaceGeometry::Cylinder { origin, axis, radius } => {
            let axis_dir = axis.try_normalize()?;
            let foot = *origin + axis_dir * (point - *origin).dot(axis_dir);
            let radial = point - foot;
            if radial.length_squared() < DEGENERACY_TOLERANCE {
                // Vertex on the axis: no tangent direction.
                return None;
            }
            let z = radial.normalize();
            let rotation = rotation_from_zx(z, axis_dir)?;
            Some(Transform::new(foot + z * *radius, rotation))
        }
        FaceGeometry::Other { .. } => None,
    }
}

fn concentric(refs: &[ResolvedReference], hint: &Transform) -> Option<Transform> {
    match edge_geometry(refs.first()?)? {
        EdgeGeometry::Circle { center, normal, .. } => {
            let rotation = rotation_with_z(*normal, hint)?;
            Some(Transform::new(*center, rotation))
        }
        _ => None,
    }
}

fn along_line(refs: &[ResolvedReference], hint: &Transform) -> Option<Transform> {
    let (origin, direction) = match refs {
        [single] => line_axis(single)?,
        [first, second, ..] => {
            let p1 = vertex_point(first)?;
            let p2 = vertex_point(second)?;
            (p1, p2 - p1)
        }
        [] => return None,
    };
    if direction.length_squared() < DEGENERACY_TOLERANCE {
        return None;
    }
    let rotation = rotation_with_z(direction, hint)?;
    Some(Transform::new(origin, rotation))
}

fn normal_to_edge(refs: &[ResolvedReference], hint: &Transform) -> Option<Transform> {
    match edge_geometry(refs.first()?)? {
        EdgeGeometry::Circle { center, normal, radius } => {
            // Pick a stable radial direction from the hint, then attach on
            // the rim with Z pointing outward.
            let frame = rotation_with_z(*normal, hint)?;
            let radial = frame.mul_vec3(DVec3::X);
            let origin = *center + radial * *radius;
            let rotation = rotation_from_zx(radial, *normal)?;
            Some(Transform::new(origin, rotation))
        }
        // A straight edge has no distinguished normal direction.
        EdgeGeometry::Line { .. } => None,
        EdgeGeometry::Other { .. } => None,
    }
}

fn axis_of_cylinder(refs: &[ResolvedReference], hint: &Transform) -> Option<Transform> {
    match face_geometry(refs.first()?)? {
        FaceGeometry::Cylinder { origin, axis, .. } => {
            let rotation = rotation_with_z(*axis, hint)?;
            Some(Transform::new(*origin, rotation))
        }
        _ => None,
    }
}

/// Gathers points for the three-points plane: a vertex contributes one
/// point, a linear edge two (its origin and a point along the direction).
fn gather_points(refs: &[ResolvedReference]) -> Vec<DVec3> {
    let mut points: Vec<DVec3> = Vec::new();
    for reference in refs {
        if let Some(point) = vertex_point(reference) {
            points.push(point);
        } else if let Some((origin, direction)) = line_axis(reference) {
            points.push(origin);
            points.push(origin + direction);
        }
    }
    points
}

fn three_points_plane(refs: &[ResolvedReference]) -> Option<Transform> {
    let points = gather_points(refs);
    if points.len() < 3 {
        return None;
    }
    let p1 = points[0];
    let p2 = points[1];
    let p3 = points[2];
    let normal = (p2 - p1).cross(p3 - p1);
    if normal.length_squared() < DEGENERACY_TOLERANCE {
        // Collinear or coincident points span no plane.
        return None;
    }
    let rotation = rotation_from_zx(normal, p2 - p1)?;
    Some(Transform::new(p1, rotation))
}

fn folding(refs: &[ResolvedReference]) -> Option<Transform> {
    if refs.len() < 4 {
        return None;
    }
    let (fold_origin, fold_direction) = line_axis(&refs[0])?;
    let (_, flange_a) = line_axis(&refs[1])?;
    let (_, flange_b) = line_axis(&refs[2])?;
    let z = fold_direction.try_normalize()?;

    // X axis bisects the two flange directions, projected into the plane
    // perpendicular to the fold edge.
    let project = |direction: DVec3| -> Option<DVec3> {
        let projected = direction - z * direction.dot(z);
        projected.try_normalize()
    };
    let a = project(flange_a)?;
    let b = project(flange_b)?;
    let bisector = a + b;
    let rotation = if bisector.length_squared() < DEGENERACY_TOLERANCE {
        // Opposed flanges; either perpendicular works, pick deterministically.
        rotation_from_zx(z, a)?
    } else {
        rotation_from_zx(z, bisector)?
    };
    Some(Transform::new(fold_origin, rotation))
}
