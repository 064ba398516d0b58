//! Parametric attachment editing for CAD documents.
//!
//! The crate implements the core of a task-panel attachment dialog: typed
//! geometric references, a catalog of attachment modes, mode suggestion,
//! placement resolution and the transactional edit session that ties them
//! together. Widget toolkits, 3D rendering and geometry kernels stay outside;
//! the session talks to them through the `editor::ui::DialogFields` trait and
//! the in-memory `document::Document`.

pub mod util;
pub mod document;
pub mod attacher;
pub mod editor;
