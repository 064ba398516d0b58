//! Temporary visibility changes scoped to an edit session.
//!
//! While the dialog is open, objects that depend on the editing target are
//! hidden (they would obscure the preview) and reference owners are shown.
//! The original visibility of every touched object is recorded and restored
//! exactly once, on both the accept and the reject path.

use rustc_hash::FxHashMap;
use crate::document::dep_graph::all_dependents;
use crate::document::document::Document;

#[derive(Debug, Default)]
pub struct TempVisibility {
    /// Original visibility per touched object. None after restore.
    saved: Option<FxHashMap<String, bool>>,
}

impl TempVisibility {
    pub fn new() -> Self {
        Self {
            saved: Some(FxHashMap::default()),
        }
    }

    fn set_visible(&mut self, doc: &mut Document, name: &str, visible: bool) {
        let Some(saved) = self.saved.as_mut() else {
            return;
        };
        if let Some(object) = doc.get_object_mut(name) {
            saved.entry(name.to_string()).or_insert(object.visible);
            object.visible = visible;
        }
    }

    /// Hides every object that depends on `target`, directly or indirectly.
    pub fn hide_dependents(&mut self, doc: &mut Document, target: &str) {
        for name in all_dependents(doc, target) {
            self.set_visible(doc, &name, false);
        }
    }

    /// Shows the given objects (typically reference owners).
    pub fn show(&mut self, doc: &mut Document, names: &[String]) {
        for name in names {
            self.set_visible(doc, name, true);
        }
    }

    /// Restores every recorded visibility. Idempotent: the second and later
    /// calls are no-ops.
    pub fn restore(&mut self, doc: &mut Document) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        for (name, visible) in saved {
            if let Some(object) = doc.get_object_mut(&name) {
                object.visible = visible;
            }
        }
    }

    pub fn is_restored(&self) -> bool {
        self.saved.is_none()
    }
}
