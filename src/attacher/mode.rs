use serde::{Serialize, Deserialize};
use crate::attacher::reference::{EdgeKind, FaceKind, ReferenceKind};

/// Identifier of an attachment mode. The set is closed; the catalog is the
/// single source of truth for signatures and priorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentModeId {
  TranslateOrigin,
  ObjectXY,
  ObjectXZ,
  ObjectYZ,
  FlatFace,
  TangentPlane,
  Concentric,
  AlongLine,
  NormalToEdge,
  AxisOfCylinder,
  ThreePointsPlane,
  Folding,
}

/// What a single signature slot accepts. Patterns form a small hierarchy:
/// `AnyEdge` is satisfied by every edge kind, `Line` only by linear edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindPattern {
  Vertex,
  AnyEdge,
  Line,
  Circle,
  AnyFace,
  Plane,
  Cylinder,
  Object,
}

impl KindPattern {
  pub fn matches(&self, kind: ReferenceKind) -> bool {
    match self {
      KindPattern::Vertex => matches!(kind, ReferenceKind::Vertex),
      KindPattern::AnyEdge => matches!(kind, ReferenceKind::Edge(_)),
      KindPattern::Line => matches!(kind, ReferenceKind::Edge(EdgeKind::Line)),
      KindPattern::Circle => matches!(kind, ReferenceKind::Edge(EdgeKind::Circle)),
      KindPattern::AnyFace => matches!(kind, ReferenceKind::Face(_)),
      KindPattern::Plane => matches!(kind, ReferenceKind::Face(FaceKind::Plane)),
      KindPattern::Cylinder => matches!(kind, ReferenceKind::Face(FaceKind::Cylinder)),
      KindPattern::Object => matches!(kind, ReferenceKind::Object),
    }
  }

  pub fn describe(&self) -> &'static str {
    match self {
      KindPattern::Vertex => "vertex",
      KindPattern::AnyEdge => "edge",
      KindPattern::Line => "linear edge",
      KindPattern::Circle => "circular edge",
      KindPattern::AnyFace => "face",
      KindPattern::Plane => "planar face",
      KindPattern::Cylinder => "cylindrical face",
      KindPattern::Object => "object",
    }
  }
}

/// One acceptable ordered tuple of reference kinds.
pub type ModeSignature = Vec<KindPattern>;

pub struct AttachmentMode {
  pub id: AttachmentModeId,
  pub ui_name: &'static str,
  pub tooltip: &'static str,
  /// Alternative signatures; a mode is applicable if any of them matches
  /// the current kind sequence slot by slot.
  pub signatures: Vec<ModeSignature>,
}

impl AttachmentMode {
  pub fn max_arity(&self) -> usize {
    self
      .signatures
      .iter()
      .map(|signature| signature.len())
      .max()
      .unwrap_or(0)
  }
}
