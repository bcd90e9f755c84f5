// Chunk: docs/chunks/sheet_model - Formatted character cells and the pen

//! Formatted character cells.
//!
//! A [`Character`] is an immutable value: editing replaces the whole cell
//! rather than mutating it in place, which keeps history snapshots purely
//! structural. The attributes a cell is created with travel with it for
//! the rest of its life — re-measuring or re-painting a cell always uses
//! its own stored style, never the session's current pen.

use crate::grapheme;

/// The rendering style of a practice character.
///
/// Solid characters are filled glyphs; dashed and dotted characters are
/// stroked outlines for the student to trace, and their fill is never
/// painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterStyle {
    /// Filled glyph
    #[default]
    Solid,
    /// Stroked outline, dash pattern [3, 2]
    Dashed,
    /// Stroked outline, dash pattern [1, 2]
    Dotted,
}

/// A single formatted character cell.
///
/// The glyph is exactly one grapheme cluster. Construction goes through
/// [`Character::from_char`] or [`Character::from_grapheme`] so the
/// invariant cannot be broken from outside the crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    glyph: String,
    /// Rendering style of this cell
    pub style: LetterStyle,
    /// Font size in pixels
    pub font_size: f32,
    /// Font family the cell was typed with
    pub font_family: String,
    /// CSS color (hex string)
    pub color: String,
    /// Bold attribute
    pub is_bold: bool,
    /// Italic attribute
    pub is_italic: bool,
}

impl Character {
    /// Creates a cell for a typed character using the current pen.
    ///
    /// A `char` is always a single grapheme cluster, so this path needs
    /// no validation.
    pub fn from_char(ch: char, pen: &Pen, font_family: &str) -> Self {
        Self {
            glyph: ch.to_string(),
            style: pen.style,
            font_size: pen.font_size,
            font_family: font_family.to_string(),
            color: pen.color.clone(),
            is_bold: false,
            is_italic: false,
        }
    }

    /// Creates a cell from a string that must hold exactly one grapheme
    /// cluster.
    ///
    /// Returns `None` for the empty string or for multi-cluster input.
    /// Used when restoring persisted state, where the glyph arrives as
    /// text rather than a `char`.
    pub fn from_grapheme(glyph: &str, pen: &Pen, font_family: &str) -> Option<Self> {
        if !grapheme::is_single_grapheme(glyph) {
            return None;
        }
        Some(Self {
            glyph: glyph.to_string(),
            style: pen.style,
            font_size: pen.font_size,
            font_family: font_family.to_string(),
            color: pen.color.clone(),
            is_bold: false,
            is_italic: false,
        })
    }

    /// Creates a cell with every attribute given explicitly.
    ///
    /// Used when rebuilding cells from persisted state, where bold/italic
    /// and per-cell attributes must survive rather than come from a pen.
    /// Returns `None` unless `glyph` is exactly one grapheme cluster.
    #[allow(clippy::too_many_arguments)]
    pub fn with_attributes(
        glyph: &str,
        style: LetterStyle,
        font_size: f32,
        font_family: &str,
        color: &str,
        is_bold: bool,
        is_italic: bool,
    ) -> Option<Self> {
        if !grapheme::is_single_grapheme(glyph) {
            return None;
        }
        Some(Self {
            glyph: glyph.to_string(),
            style,
            font_size,
            font_family: font_family.to_string(),
            color: color.to_string(),
            is_bold,
            is_italic,
        })
    }

    /// The grapheme cluster this cell holds.
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Returns a copy of this cell with the patch applied.
    ///
    /// Cells are immutable values; formatting produces a replacement cell
    /// rather than mutating the original.
    pub fn patched(&self, patch: &FormatPatch) -> Self {
        Self {
            glyph: self.glyph.clone(),
            style: patch.style.unwrap_or(self.style),
            font_size: patch.font_size.unwrap_or(self.font_size),
            font_family: self.font_family.clone(),
            color: patch.color.clone().unwrap_or_else(|| self.color.clone()),
            is_bold: self.is_bold,
            is_italic: self.is_italic,
        }
    }
}

/// The current formatting state: attributes applied to newly typed
/// characters and, when a selection is active, retroactively to the
/// selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    /// Style for newly typed characters
    pub style: LetterStyle,
    /// Font size in pixels for newly typed characters
    pub font_size: f32,
    /// CSS color for newly typed characters
    pub color: String,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            style: LetterStyle::Solid,
            font_size: 16.0,
            color: "#000000".to_string(),
        }
    }
}

/// A partial attribute change applied to a range of cells.
///
/// Only the fields that are `Some` are changed; everything else is kept
/// from the original cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatPatch {
    /// New style, if changing
    pub style: Option<LetterStyle>,
    /// New font size, if changing
    pub font_size: Option<f32>,
    /// New color, if changing
    pub color: Option<String>,
}

impl FormatPatch {
    /// A patch that only changes the style.
    pub fn style(style: LetterStyle) -> Self {
        Self {
            style: Some(style),
            ..Default::default()
        }
    }

    /// A patch that only changes the font size.
    pub fn font_size(font_size: f32) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    /// A patch that only changes the color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.font_size.is_none() && self.color.is_none()
    }
}
