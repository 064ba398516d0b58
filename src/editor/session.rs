use glam::f64::DVec3;
use log::{debug, warn};
use thiserror::Error;
use crate::attacher::engine::{AttachEngine, AttachError, AttachResult};
use crate::attacher::mode::AttachmentModeId;
use crate::attacher::reference::{parse_link_string, Reference, MAX_REFERENCES};
use crate::attacher::suggest::{SuggestionResult, SuggestionStatus};
use crate::document::dep_graph::all_dependents;
use crate::document::document::{Document, TransactionError};
use crate::editor::preferences::EditorPreferences;
use crate::editor::ui::{DialogFields, MessageKind, ModeListItem};
use crate::editor::visibility::TempVisibility;
use crate::util::transform::Transform;
use crate::util::units;

/// How the target object supports attachment, decided once at session
/// construction and dispatched by pattern matching thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentCapability {
  /// The object persists attachment parameters; accept writes them back.
  Attachable,
  /// No attachment support; the session only aligns the object's placement.
  AlignableOnly,
}

/// One pick from the 3D viewport selection source.
#[derive(Clone, Debug, PartialEq)]
pub struct Pick {
  pub document: String,
  pub object: String,
  pub sub_element: String,
  pub point: DVec3,
}

pub struct SessionOptions {
  /// Seed the reference slots from the current selection if the target has
  /// no references yet.
  pub take_selection: bool,
  /// Open an undo transaction for the lifetime of the session.
  pub create_transaction: bool,
  /// Advance the active slot after each accepted pick.
  pub auto_advance_slots: bool,
  /// Asked when the target has no attachment support: returning true falls
  /// back to alignment-only editing, false cancels the session. Without a
  /// callback, opening such an object is an error.
  pub confirm_align_fallback: Option<Box<dyn FnOnce(&str) -> bool>>,
}

impl Default for SessionOptions {
  fn default() -> Self {
    Self {
      take_selection: false,
      create_transaction: true,
      auto_advance_slots: true,
      confirm_align_fallback: None,
    }
  }
}

impl SessionOptions {
  pub fn from_preferences(preferences: &EditorPreferences) -> Self {
    Self {
      take_selection: preferences.take_selection,
      create_transaction: preferences.create_transaction,
      auto_advance_slots: preferences.auto_advance_slots,
      confirm_align_fallback: None,
    }
  }
}

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Object '{0}' does not exist in the document")]
  NoSuchObject(String),

  #[error("Object '{0}' is not attachable and no alignment fallback was offered")]
  NotAttachable(String),

  #[error("{0}")]
  Engine(#[from] AttachError),

  #[error("{0}")]
  Transaction(#[from] TransactionError),
}

/// Result of opening a session. Cancellation (the user declining the
/// alignment fallback) is a value, not an error.
pub enum SessionStart {
  Opened(Box<AttachmentEditSession>),
  Cancelled,
}

impl std::fmt::Debug for SessionStart {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SessionStart::Opened(_) => f.write_str("Opened(..)"),
      SessionStart::Cancelled => f.write_str("Cancelled"),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
  Accepted { slot: usize },
  RejectedSelfReference,
  RejectedDependencyCycle,
  /// No active slot, foreign document, or a programmatic UI update in
  /// progress.
  Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuperPlacementField {
  X,
  Y,
  Z,
  Yaw,
  Pitch,
  Roll,
}

/// The edit session controller.
///
/// Owns exactly one target object, one attachment engine, the transaction
/// handle and the transient UI synchronization state. Terminal transitions
/// (`accept`, `reject`) consume the session, so exactly one of them can
/// ever run.
pub struct AttachmentEditSession {
  target: String,
  capability: AttachmentCapability,
  engine: AttachEngine,
  has_transaction: bool,
  active_reference_index: Option<usize>,
  auto_advance: bool,
  /// Re-entrancy guard: set while the session itself writes display fields,
  /// so programmatic updates are not handled as user edits.
  updating_ui: bool,
  user_chose_mode: bool,
  visibility: TempVisibility,
  last_suggestion: Option<SuggestionResult>,
  on_apply: Option<Box<dyn FnMut(&mut Document)>>,
}

impl AttachmentEditSession {

  /// Opens an edit session for `target`, opening a transaction and seeding
  /// references from the selection when requested.
  pub fn open(
    doc: &mut Document,
    target: &str,
    mut options: SessionOptions,
    selection: &[Pick],
    ui: &mut dyn DialogFields,
  ) -> Result<SessionStart, SessionError> {
    let (capability, parameters) = {
      let object = doc
        .get_object(target)
        .ok_or_else(|| SessionError::NoSuchObject(target.to_string()))?;
      let capability = if object.attachment.is_some() || object.attachable {
        AttachmentCapability::Attachable
      } else {
        match options.confirm_align_fallback.take() {
          Some(confirm) => {
            let question = format!(
              "Object '{}' is not attachable. Align it by editing its placement instead?",
              object.label
            );
            if confirm(&question) {
              AttachmentCapability::AlignableOnly
            } else {
              return Ok(SessionStart::Cancelled);
            }
          }
          None => return Err(SessionError::NotAttachable(target.to_string())),
        }
      };
      (capability, object.attachment.clone())
    };

    let mut engine = AttachEngine::new();
    if let Some(parameters) = &parameters {
      engine.load_parameters(parameters)?;
    }

    if options.create_transaction {
      doc.open_transaction(&format!("Edit attachment of {}", target));
    }

    if engine.references.is_empty() && options.take_selection {
      for pick in selection {
        if pick.document != doc.name || pick.object == target {
          continue;
        }
        if engine.references.len() == MAX_REFERENCES {
          break;
        }
        engine.references.push(Reference::new(&pick.object, &pick.sub_element));
      }
    }

    let mut session = AttachmentEditSession {
      target: target.to_string(),
      capability,
      engine,
      has_transaction: options.create_transaction,
      active_reference_index: None,
      auto_advance: options.auto_advance_slots,
      updating_ui: false,
      user_chose_mode: false,
      visibility: TempVisibility::new(),
      last_suggestion: None,
      on_apply: None,
    };

    if session.engine.references.is_empty() {
      // Nothing to work with yet: start picking into slot 0.
      session.active_reference_index = Some(0);
    }

    session.visibility.hide_dependents(doc, target);
    let owners: Vec<String> = session
      .engine
      .references
      .iter()
      .map(|reference| reference.object.clone())
      .collect();
    session.visibility.show(doc, &owners);

    session.update_preview(doc, ui);
    Ok(SessionStart::Opened(Box::new(session)))
  }

  pub fn target(&self) -> &str {
    &self.target
  }

  pub fn capability(&self) -> AttachmentCapability {
    self.capability
  }

  pub fn engine(&self) -> &AttachEngine {
    &self.engine
  }

  pub fn active_reference_index(&self) -> Option<usize> {
    self.active_reference_index
  }

  pub fn last_suggestion(&self) -> Option<&SuggestionResult> {
    self.last_suggestion.as_ref()
  }

  /// Registers a callback invoked after each `apply` (the dialog's Apply
  /// button), after parameters are written but before the preview refresh.
  pub fn set_on_apply(&mut self, callback: Box<dyn FnMut(&mut Document)>) {
    self.on_apply = Some(callback);
  }

  pub fn start_selecting_reference(&mut self, slot: usize) {
    if slot < MAX_REFERENCES {
      self.active_reference_index = Some(slot);
    }
  }

  pub fn stop_selecting(&mut self) {
    self.active_reference_index = None;
  }

  /// A reference slot's text was edited by the user.
  pub fn reference_text_edited(
    &mut self,
    doc: &mut Document,
    ui: &mut dyn DialogFields,
    slot: usize,
    text: &str,
  ) {
    if self.updating_ui {
      return;
    }
    debug!("reference slot {} edited: '{}'", slot, text);
    match parse_link_string(text) {
      Ok(Some(reference)) => {
        if reference.object == self.target {
          ui.set_message(MessageKind::Warning, "An object cannot be attached to itself");
          return;
        }
        self.set_reference_slot(slot, Some(reference));
      }
      Ok(None) => {
        self.set_reference_slot(slot, None);
      }
      Err(err) => {
        // Malformed text is surfaced inline and does not abort the session.
        ui.set_message(MessageKind::Warning, &err.to_string());
        return;
      }
    }
    self.update_preview(doc, ui);
  }

  /// A pick arrived from the viewport while a slot is active.
  pub fn handle_pick(
    &mut self,
    doc: &mut Document,
    ui: &mut dyn DialogFields,
    pick: &Pick,
  ) -> PickOutcome {
    if self.updating_ui {
      return PickOutcome::Ignored;
    }
    let Some(slot) = self.active_reference_index else {
      return PickOutcome::Ignored;
    };
    if pick.document != doc.name {
      return PickOutcome::Ignored;
    }
    if pick.object == self.target {
      ui.set_message(MessageKind::Warning, "An object cannot be attached to itself");
      return PickOutcome::RejectedSelfReference;
    }
    if all_dependents(doc, &self.target).contains(&pick.object) {
      ui.set_message(
        MessageKind::Warning,
        "The picked object depends on the edited object; attaching to it would create a dependency loop",
      );
      return PickOutcome::RejectedDependencyCycle;
    }

    self.set_reference_slot(slot, Some(Reference::new(&pick.object, &pick.sub_element)));
    self.visibility.show(doc, &[pick.object.clone()]);

    if self.auto_advance {
      let next = slot + 1;
      self.active_reference_index = if next < MAX_REFERENCES { Some(next) } else { None };
    } else {
      self.active_reference_index = None;
    }

    self.update_preview(doc, ui);
    PickOutcome::Accepted { slot }
  }

  /// The user explicitly chose a mode from the candidate list, overriding
  /// the suggested best fit.
  pub fn mode_selected(
    &mut self,
    doc: &mut Document,
    ui: &mut dyn DialogFields,
    mode: AttachmentModeId,
  ) {
    if self.updating_ui {
      return;
    }
    self.engine.mode = Some(mode);
    self.user_chose_mode = true;
    self.update_preview(doc, ui);
  }

  /// One of the super-placement fields was edited.
  pub fn super_placement_field_edited(
    &mut self,
    doc: &mut Document,
    ui: &mut dyn DialogFields,
    field: SuperPlacementField,
    text: &str,
  ) {
    if self.updating_ui {
      return;
    }
    let parsed = match field {
      SuperPlacementField::X | SuperPlacementField::Y | SuperPlacementField::Z => {
        units::parse_length(text)
      }
      _ => units::parse_angle(text),
    };
    let value = match parsed {
      Ok(value) => value,
      Err(err) => {
        ui.set_message(MessageKind::Warning, &err.to_string());
        return;
      }
    };
    let super_placement = &mut self.engine.super_placement;
    match field {
      SuperPlacementField::X => super_placement.translation.x = value,
      SuperPlacementField::Y => super_placement.translation.y = value,
      SuperPlacementField::Z => super_placement.translation.z = value,
      SuperPlacementField::Yaw => super_placement.yaw_deg = value,
      SuperPlacementField::Pitch => super_placement.pitch_deg = value,
      SuperPlacementField::Roll => super_placement.roll_deg = value,
    }
    self.update_preview(doc, ui);
  }

  pub fn reverse_toggled(&mut self, doc: &mut Document, ui: &mut dyn DialogFields, reverse: bool) {
    if self.updating_ui {
      return;
    }
    self.engine.super_placement.reverse = reverse;
    self.update_preview(doc, ui);
  }

  /// Recomputes suggestion and placement and pushes the results to the UI.
  ///
  /// This is the single recomputation entry point: every failure inside it
  /// is rendered as a status message and never propagates, so an event can
  /// never leave the session or the transaction in an ambiguous state.
  pub fn update_preview(&mut self, doc: &mut Document, ui: &mut dyn DialogFields) {
    let suggestion = self.engine.suggest(doc);

    if !self.user_chose_mode {
      // Follow the best fit until the user picks a mode explicitly.
      self.engine.mode = suggestion.best_fit_mode;
    }

    let hint = doc
      .get_object(&self.target)
      .map(|object| object.placement.clone())
      .unwrap_or_else(Transform::identity);
    let outcome = self.engine.calculate_attached_placement(doc, &hint);

    self.push_to_ui(ui, &suggestion);

    match (suggestion.status, outcome) {
      (SuggestionStatus::LinkBroken, _) => {
        let detail = suggestion
          .error_detail
          .clone()
          .unwrap_or_else(|| "reference cannot be resolved".to_string());
        ui.set_message(MessageKind::Error, &format!("Broken link: {}", detail));
      }
      (_, Ok(AttachResult::Attached(placement))) => {
        if let Some(object) = doc.get_object_mut(&self.target) {
          object.placement = placement;
        }
        ui.set_message(MessageKind::Attached, "Attached");
      }
      (_, Ok(AttachResult::NotAttached)) => {
        ui.set_message(MessageKind::NotAttached, "Not attached");
      }
      (_, Err(err)) => {
        warn!("preview recomputation failed: {}", err);
        ui.set_message(MessageKind::Error, &err.to_string());
      }
    }

    self.last_suggestion = Some(suggestion);
  }

  /// Writes parameters to the target without closing the dialog.
  pub fn apply(&mut self, doc: &mut Document, ui: &mut dyn DialogFields) {
    self.write_parameters(doc);
    let mut callback = self.on_apply.take();
    if let Some(callback) = callback.as_mut() {
      callback(doc);
    }
    self.on_apply = callback;
    self.update_preview(doc, ui);
  }

  /// Accepts the edit: writes final parameters, commits the transaction and
  /// restores temporary visibility. Consumes the session.
  pub fn accept(mut self, doc: &mut Document) -> Result<(), SessionError> {
    self.write_parameters(doc);
    if self.has_transaction {
      doc.commit_transaction()?;
    }
    self.visibility.restore(doc);
    Ok(())
  }

  /// Rejects the edit: aborts the transaction, reverting the target to its
  /// pre-edit state, and restores temporary visibility. Consumes the
  /// session.
  pub fn reject(mut self, doc: &mut Document) -> Result<(), SessionError> {
    if self.has_transaction {
      doc.abort_transaction()?;
    }
    self.visibility.restore(doc);
    Ok(())
  }

  fn write_parameters(&self, doc: &mut Document) {
    match self.capability {
      AttachmentCapability::Attachable => {
        if let Some(object) = doc.get_object_mut(&self.target) {
          self.engine.write_parameters_to(object);
        }
      }
      // Alignment-only: the preview already moved the placement; nothing
      // else is persisted.
      AttachmentCapability::AlignableOnly => {}
    }
  }

  fn set_reference_slot(&mut self, slot: usize, reference: Option<Reference>) {
    if slot >= MAX_REFERENCES {
      return;
    }
    match reference {
      Some(reference) => {
        if slot < self.engine.references.len() {
          self.engine.references[slot] = reference;
        } else {
          self.engine.references.push(reference);
        }
      }
      None => {
        if slot < self.engine.references.len() {
          self.engine.references.remove(slot);
        }
      }
    }
  }

  /// Pushes the current engine state into the display fields, with the
  /// re-entrancy guard set so the writes are not handled as user edits.
  fn push_to_ui(&mut self, ui: &mut dyn DialogFields, suggestion: &SuggestionResult) {
    self.updating_ui = true;

    for slot in 0..MAX_REFERENCES {
      let text = self
        .engine
        .references
        .get(slot)
        .map(|reference| reference.to_link_string())
        .unwrap_or_default();
      ui.set_reference_text(slot, &text);
    }

    ui.set_super_placement_fields(&self.engine.super_placement);

    let mut items: Vec<ModeListItem> = Vec::new();
    for id in &suggestion.applicable_modes {
      if let Some(mode) = self.engine.catalog().get(*id) {
        items.push(ModeListItem {
          id: *id,
          label: mode.ui_name.to_string(),
          tooltip: mode.tooltip.to_string(),
          reachable_hint: None,
        });
      }
    }
    for (id, completions) in &suggestion.reachable_modes {
      if let Some(mode) = self.engine.catalog().get(*id) {
        items.push(ModeListItem {
          id: *id,
          label: mode.ui_name.to_string(),
          tooltip: mode.tooltip.to_string(),
          reachable_hint: Some(describe_completions(completions)),
        });
      }
    }
    ui.set_mode_list(&items, self.engine.mode);

    self.updating_ui = false;
  }
}

/// "add vertex" / "add linear edge or add vertex, vertex" style guidance
/// for a reachable mode.
fn describe_completions(completions: &[Vec<crate::attacher::mode::KindPattern>]) -> String {
  let alternatives: Vec<String> = completions
    .iter()
    .map(|combination| {
      let kinds: Vec<&'static str> = combination.iter().map(|pattern| pattern.describe()).collect();
      format!("add {}", kinds.join(", "))
    })
    .collect();
  alternatives.join(" or ")
}
