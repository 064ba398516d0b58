use indexmap::IndexMap;
use crate::attacher::catalog::ModeCatalog;
use crate::attacher::mode::{AttachmentModeId, ModeSignature};
use crate::attacher::reference::{
  classify_references, resolve_reference, Reference, ReferenceKind,
};
use crate::document::document::Document;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionStatus {
  Ok,
  NoReferences,
  LinkBroken,
}

/// The complete outcome of one suggestion pass.
///
/// Recomputed fresh on every reference-set change; a result is never
/// partially updated in place.
#[derive(Clone, Debug)]
pub struct SuggestionResult {
  pub status: SuggestionStatus,
  /// Fully satisfied modes, in catalog priority order.
  pub applicable_modes: Vec<AttachmentModeId>,
  /// Highest-priority applicable mode, if any.
  pub best_fit_mode: Option<AttachmentModeId>,
  /// Modes satisfiable by adding references, with the alternative
  /// missing-kind combinations that would complete them. Never contains a
  /// mode that is already applicable.
  pub reachable_modes: IndexMap<AttachmentModeId, Vec<ModeSignature>>,
  /// Classification of every slot, in order.
  pub reference_kinds: Vec<ReferenceKind>,
  pub error_detail: Option<String>,
}

/// Computes the full suggestion for the current reference set.
pub fn suggest(
  catalog: &ModeCatalog,
  doc: &Document,
  references: &[Reference],
) -> SuggestionResult {
  let reference_kinds = classify_references(doc, references);

  // A dangling slot degrades the whole result to LinkBroken; the kinds are
  // still reported best-effort so the UI can mark the offending slot.
  if let Some(position) = reference_kinds
    .iter()
    .position(|kind| *kind == ReferenceKind::Unresolved)
  {
    let error_detail = resolve_reference(doc, &references[position])
      .err()
      .map(|err| err.to_string());
    return SuggestionResult {
      status: SuggestionStatus::LinkBroken,
      applicable_modes: Vec::new(),
      best_fit_mode: None,
      reachable_modes: IndexMap::new(),
      reference_kinds,
      error_detail,
    };
  }

  let applicable_modes = catalog.applicable_modes(&reference_kinds);
  let best_fit_mode = applicable_modes.first().copied();

  let mut reachable_modes = catalog.reachable_modes(&reference_kinds);
  // No point suggesting what is already satisfied.
  reachable_modes.retain(|id, _| !applicable_modes.contains(id));

  let status = if references.is_empty() {
    SuggestionStatus::NoReferences
  } else {
    SuggestionStatus::Ok
  };

  SuggestionResult {
    status,
    applicable_modes,
    best_fit_mode,
    reachable_modes,
    reference_kinds,
    error_detail: None,
  }
}
