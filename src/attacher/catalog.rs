use indexmap::IndexMap;
use lazy_static::lazy_static;
use crate::attacher::mode::{AttachmentMode, AttachmentModeId, KindPattern, ModeSignature};
use crate::attacher::reference::ReferenceKind;

lazy_static! {
  /// The process-wide standard mode catalog.
  pub static ref STANDARD_CATALOG: ModeCatalog = ModeCatalog::standard();
}

/// Immutable registry of attachment modes.
///
/// Declaration order is priority order: it decides the best-fit pick and is
/// the deterministic tie-break whenever several modes are applicable to the
/// same reference set.
pub struct ModeCatalog {
  modes: Vec<AttachmentMode>,
}

impl ModeCatalog {

  pub fn new(modes: Vec<AttachmentMode>) -> Self {
    Self { modes }
  }

  /// The standard catalog. Specific single-reference modes are declared
  /// before the more general ones so that, for example, a circular edge
  /// suggests Concentric rather than NormalToEdge.
  pub fn standard() -> Self {
    use KindPattern::*;

    let mut modes: Vec<AttachmentMode> = Vec::new();

    modes.push(AttachmentMode {
      id: AttachmentModeId::TranslateOrigin,
      ui_name: "Translate origin",
      tooltip: "Origin is put at the vertex; orientation is kept",
      signatures: vec![vec![Vertex]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::ObjectXY,
      ui_name: "Object's XY",
      tooltip: "Placement is made equal to the placement of the linked object",
      signatures: vec![vec![Object]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::ObjectXZ,
      ui_name: "Object's XZ",
      tooltip: "XY plane is aligned with the XZ plane of the linked object",
      signatures: vec![vec![Object]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::ObjectYZ,
      ui_name: "Object's YZ",
      tooltip: "XY plane is aligned with the YZ plane of the linked object",
      signatures: vec![vec![Object]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::FlatFace,
      ui_name: "Flat face",
      tooltip: "Origin is put on the face, Z axis along the face normal",
      signatures: vec![vec![Plane]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::TangentPlane,
      ui_name: "Tangent to surface",
      tooltip: "Plane tangent to the face at the vertex",
      signatures: vec![vec![AnyFace, Vertex]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::Concentric,
      ui_name: "Concentric",
      tooltip: "Origin at the circle's center, Z axis along the circle's axis",
      signatures: vec![vec![Circle]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::AlongLine,
      ui_name: "Along line",
      tooltip: "Z axis along the line (or through the two points)",
      signatures: vec![vec![Line], vec![Vertex, Vertex]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::NormalToEdge,
      ui_name: "Normal to edge",
      tooltip: "Z axis along the edge's radial direction",
      signatures: vec![vec![AnyEdge]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::AxisOfCylinder,
      ui_name: "Axis of cylinder",
      tooltip: "Origin on the cylinder's axis, Z axis along it",
      signatures: vec![vec![Cylinder]],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::ThreePointsPlane,
      ui_name: "Plane through three points",
      tooltip: "Origin at the first point, Z axis normal to the plane of the points",
      signatures: vec![
        vec![Vertex, Vertex, Vertex],
        vec![Line, Vertex],
        vec![Vertex, Line],
      ],
    });

    modes.push(AttachmentMode {
      id: AttachmentModeId::Folding,
      ui_name: "Folding",
      tooltip: "Local frame on the fold edge, oriented between the flange edges",
      signatures: vec![vec![Line, Line, Line, Line]],
    });

    Self::new(modes)
  }

  pub fn modes(&self) -> &[AttachmentMode] {
    &self.modes
  }

  pub fn get(&self, id: AttachmentModeId) -> Option<&AttachmentMode> {
    self.modes.iter().find(|mode| mode.id == id)
  }

  /// Largest signature arity across the whole catalog.
  pub fn max_arity(&self) -> usize {
    self
      .modes
      .iter()
      .map(|mode| mode.max_arity())
      .max()
      .unwrap_or(0)
  }

  /// Modes whose signature fully matches the kind sequence, slot by slot,
  /// with no reordering. Returned in declaration (priority) order.
  pub fn applicable_modes(&self, kinds: &[ReferenceKind]) -> Vec<AttachmentModeId> {
    self
      .modes
      .iter()
      .filter(|mode| {
        mode
          .signatures
          .iter()
          .any(|signature| signature_matches(signature, kinds))
      })
      .map(|mode| mode.id)
      .collect()
  }

  /// For every mode with a signature that the current (possibly partial)
  /// sequence is a slot-by-slot prefix of, the alternative missing-kind
  /// suffixes that would complete it. Purely informational; never used for
  /// auto-selection.
  pub fn reachable_modes(
    &self,
    kinds: &[ReferenceKind],
  ) -> IndexMap<AttachmentModeId, Vec<ModeSignature>> {
    let mut reachable: IndexMap<AttachmentModeId, Vec<ModeSignature>> = IndexMap::new();
    for mode in &self.modes {
      let mut completions: Vec<ModeSignature> = Vec::new();
      for signature in &mode.signatures {
        if signature.len() > kinds.len() && signature_prefix_matches(signature, kinds) {
          completions.push(signature[kinds.len()..].to_vec());
        }
      }
      if !completions.is_empty() {
        reachable.insert(mode.id, completions);
      }
    }
    reachable
  }
}

/// Full-length, order-sensitive signature match: slot i of the reference
/// kinds must satisfy slot i of the signature.
pub fn signature_matches(signature: &[KindPattern], kinds: &[ReferenceKind]) -> bool {
  signature.len() == kinds.len() && signature_prefix_matches(signature, kinds)
}

fn signature_prefix_matches(signature: &[KindPattern], kinds: &[ReferenceKind]) -> bool {
  kinds
    .iter()
    .zip(signature.iter())
    .all(|(kind, pattern)| pattern.matches(*kind))
}
