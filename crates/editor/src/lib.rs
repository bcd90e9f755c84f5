// Chunk: docs/chunks/editing_session - Editing session state machine

//! copybook: the editing engine behind the handwriting-practice sheet.
//!
//! The engine owns everything stateful about one editing session — the
//! sheet buffer, the caret and selection, the current pen, and the
//! undo/redo history — and exposes the event entry points the page
//! chrome calls: [`EditorSession::handle_mouse`],
//! [`EditorSession::handle_key`], the formatting-panel setters, and the
//! settings-change contracts.
//!
//! Two capabilities are external and injected:
//!
//! - Text measurement, via the [`GlyphMetrics`] trait. The hit-tester and
//!   renderer measure every cell under its own stored attributes, so a
//!   deterministic [`FixedMetrics`] makes the whole engine testable
//!   headless.
//! - Drawing, via the paint-op list: [`render`] builds a [`Frame`] of
//!   primitive ops from current state; replaying a frame onto a raster is
//!   the export surface and is not this crate's concern.

pub mod cursor;
pub mod editor_state;
pub mod history;
pub mod metrics;
pub mod render;
pub mod session;
pub mod settings;
pub mod sheet_target;

pub use cursor::{Cursor, Selection};
pub use editor_state::{EditorSession, FocusState};
pub use history::History;
pub use metrics::{FixedMetrics, GlyphMetrics};
pub use render::{render, Frame, PaintOp};
pub use settings::{PaperSize, SheetSettings};
pub use sheet_target::Handled;

// Re-export the model and input crates so downstream chrome only needs
// one dependency.
pub use copybook_input as input;
pub use copybook_sheet as sheet;
