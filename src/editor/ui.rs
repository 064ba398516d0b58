//! Boundary to the widget toolkit hosting the attachment dialog.
//!
//! The session pushes computed values through this trait; it never reads
//! widget state back. Implementations belong to the embedder (and to tests,
//! which record the calls).

use crate::attacher::engine::SuperPlacement;
use crate::attacher::mode::AttachmentModeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Attached,
    NotAttached,
    Warning,
    Error,
}

/// One row of the mode candidate list.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeListItem {
    pub id: AttachmentModeId,
    pub label: String,
    pub tooltip: String,
    /// For reachable (not yet satisfied) modes: what to add, e.g.
    /// "add vertex". None for applicable modes.
    pub reachable_hint: Option<String>,
}

pub trait DialogFields {
    fn set_reference_text(&mut self, slot: usize, text: &str);
    fn set_super_placement_fields(&mut self, super_placement: &SuperPlacement);
    fn set_mode_list(&mut self, items: &[ModeListItem], selected: Option<AttachmentModeId>);
    fn set_message(&mut self, kind: MessageKind, text: &str);
}
