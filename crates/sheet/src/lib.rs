// Chunk: docs/chunks/sheet_model - Practice sheet content model
// Chunk: docs/chunks/ruled_grid - Ruled-line grid geometry

//! copybook-sheet: the content model for the copybook practice sheet.
//!
//! This crate provides the in-memory document behind the sheet widget:
//! formatted character cells, ruled text lines, and the [`Sheet`] buffer
//! that holds them. It is deliberately free of rendering and platform
//! concerns so the editing engine can be tested headless.
//!
//! # Overview
//!
//! The main type is [`Sheet`], an ordered collection of [`TextLine`]s.
//! A line is created lazily the first time its ruled slot is clicked and
//! is never removed afterwards — an emptied line keeps its identity and
//! vertical position. Each cell is a [`Character`]: one grapheme cluster
//! plus the full set of formatting attributes it was typed with.
//!
//! # Example
//!
//! ```
//! use copybook_sheet::{LineGrid, Pen, Sheet};
//!
//! let grid = LineGrid::new(1123.0, 120.0, 50.0, 50.0);
//! let mut sheet = Sheet::new();
//!
//! // Click the third ruled slot, then type.
//! let slot = grid.slots()[2].clone();
//! sheet.ensure_line(&slot, Default::default(), 16.0, "Kalam, cursive");
//! let pen = Pen::default();
//! let line = sheet.line_mut(slot.id).unwrap();
//! line.insert(0, copybook_sheet::Character::from_char('H', &pen, "Kalam, cursive"));
//! line.insert(1, copybook_sheet::Character::from_char('i', &pen, "Kalam, cursive"));
//! assert_eq!(line.len(), 2);
//! ```
//!
//! # Range operations
//!
//! Multi-line deletion and formatting share one three-part split: the
//! start line is truncated after the span start, the end line keeps only
//! the remainder past the span end, and every line strictly between is
//! cleared (deletion) or patched (formatting). Span endpoints are always
//! normalized to document order first, so a backward drag behaves exactly
//! like its forward twin.

mod character;
mod grapheme;
mod grid;
mod line;
mod sheet;

pub use character::{Character, FormatPatch, LetterStyle, Pen};
pub use grapheme::{first_grapheme, is_single_grapheme};
pub use grid::{LineGrid, LineId, RuleSlot};
pub use line::TextLine;
pub use sheet::{Sheet, SheetPoint};
