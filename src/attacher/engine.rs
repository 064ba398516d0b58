use glam::f64::DVec3;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::attacher::catalog::{ModeCatalog, STANDARD_CATALOG};
use crate::attacher::mode::AttachmentModeId;
use crate::attacher::placement::compute_base_placement;
use crate::attacher::reference::{
  resolve_references, Reference, ReferenceError, ReferenceList, MAX_REFERENCES,
};
use crate::attacher::suggest::{suggest, SuggestionResult};
use crate::document::document::{Document, DocumentObject};
use crate::util::serialization_utils::dvec3_serializer;
use crate::util::transform::Transform;

/// User-owned extra offset applied on top of the mode-computed placement.
///
/// Always defined (identity by default), independent of the current mode,
/// and persistent across mode switches. Angles are intrinsic Z-Y'-X'' Euler
/// degrees.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuperPlacement {
  #[serde(with = "dvec3_serializer")]
  pub translation: DVec3,
  pub yaw_deg: f64,
  pub pitch_deg: f64,
  pub roll_deg: f64,
  /// Flips the attachment's primary axis (180 degrees around local X).
  pub reverse: bool,
}

impl SuperPlacement {
  pub fn identity() -> Self {
    Self {
      translation: DVec3::ZERO,
      yaw_deg: 0.0,
      pitch_deg: 0.0,
      roll_deg: 0.0,
      reverse: false,
    }
  }

  pub fn is_identity(&self) -> bool {
    self.translation == DVec3::ZERO
      && self.yaw_deg == 0.0
      && self.pitch_deg == 0.0
      && self.roll_deg == 0.0
      && !self.reverse
  }

  /// The offset transform, without the reverse flag (the flip is applied
  /// separately, before this offset).
  pub fn to_transform(&self) -> Transform {
    Transform::from_euler_deg(self.translation, self.yaw_deg, self.pitch_deg, self.roll_deg)
  }
}

impl Default for SuperPlacement {
  fn default() -> Self {
    Self::identity()
  }
}

/// The persisted attachment state of a document object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttachmentParameters {
  pub mode: Option<AttachmentModeId>,
  pub references: Vec<Reference>,
  pub super_placement: SuperPlacement,
}

impl AttachmentParameters {
  pub fn new() -> Self {
    Self {
      mode: None,
      references: Vec::new(),
      super_placement: SuperPlacement::identity(),
    }
  }
}

impl Default for AttachmentParameters {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Debug, Error)]
pub enum AttachError {
  #[error("Broken link: {0}")]
  LinkBroken(#[from] ReferenceError),

  #[error("Too many references: {0} (the catalog's maximum arity is {max})", max = MAX_REFERENCES)]
  TooManyReferences(usize),
}

/// Outcome of placement resolution. Not attached is a normal result (for
/// example a mode whose rule cannot determine a frame from the current
/// geometry), not a failure.
#[derive(Clone, Debug)]
pub enum AttachResult {
  Attached(Transform),
  NotAttached,
}

impl AttachResult {
  pub fn is_attached(&self) -> bool {
    matches!(self, AttachResult::Attached(_))
  }

  pub fn transform(&self) -> Option<&Transform> {
    match self {
      AttachResult::Attached(transform) => Some(transform),
      AttachResult::NotAttached => None,
    }
  }
}

/// The attachment engine: current mode, ordered references and the user's
/// super-placement. Resolution is a pure read of the document; the engine
/// never mutates references or catalog while resolving.
pub struct AttachEngine {
  pub mode: Option<AttachmentModeId>,
  pub references: ReferenceList,
  pub super_placement: SuperPlacement,
  catalog: &'static ModeCatalog,
}

impl AttachEngine {

  pub fn new() -> Self {
    Self {
      mode: None,
      references: ReferenceList::new(),
      super_placement: SuperPlacement::identity(),
      catalog: &STANDARD_CATALOG,
    }
  }

  pub fn catalog(&self) -> &ModeCatalog {
    self.catalog
  }

  /// Replaces the whole reference list, enforcing the catalog's arity bound.
  pub fn set_references(&mut self, references: &[Reference]) -> Result<(), AttachError> {
    if references.len() > MAX_REFERENCES {
      return Err(AttachError::TooManyReferences(references.len()));
    }
    self.references = ReferenceList::from(references);
    Ok(())
  }

  pub fn suggest(&self, doc: &Document) -> SuggestionResult {
    suggest(self.catalog, doc, &self.references)
  }

  /// Resolves the attached placement: the mode's base transform, flipped if
  /// the reverse flag is set, composed with the super-placement in the
  /// object-local frame.
  pub fn calculate_attached_placement(
    &self,
    doc: &Document,
    hint: &Transform,
  ) -> Result<AttachResult, AttachError> {
    let Some(mode) = self.mode else {
      return Ok(AttachResult::NotAttached);
    };
    let resolved = resolve_references(doc, &self.references)?;
    let Some(base) = compute_base_placement(mode, &resolved, hint) else {
      return Ok(AttachResult::NotAttached);
    };
    let base = if self.super_placement.reverse {
      base.reversed()
    } else {
      base
    };
    let placement = base.apply_local_new(&self.super_placement.to_transform());
    Ok(AttachResult::Attached(placement))
  }

  pub fn to_parameters(&self) -> AttachmentParameters {
    AttachmentParameters {
      mode: self.mode,
      references: self.references.to_vec(),
      super_placement: self.super_placement.clone(),
    }
  }

  pub fn load_parameters(&mut self, parameters: &AttachmentParameters) -> Result<(), AttachError> {
    self.set_references(&parameters.references)?;
    self.mode = parameters.mode;
    self.super_placement = parameters.super_placement.clone();
    Ok(())
  }

  /// Transfers the engine state from the object's persisted parameters.
  pub fn read_parameters_from(&mut self, object: &DocumentObject) -> Result<(), AttachError> {
    if let Some(parameters) = &object.attachment {
      self.load_parameters(parameters)?;
    }
    Ok(())
  }

  /// Transfers the engine state onto the object.
  pub fn write_parameters_to(&self, object: &mut DocumentObject) {
    object.attachment = Some(self.to_parameters());
  }
}

impl Default for AttachEngine {
  fn default() -> Self {
    Self::new()
  }
}
