// Chunk: docs/chunks/sheet_model - Sheet buffer and multi-line range algorithms

//! The sheet buffer: the authoritative set of text lines.
//!
//! Lines are stored in creation order; document order is defined by the
//! ruled slot index carried in each [`LineId`], so every span operation
//! normalizes its endpoints by (slot index, offset) before acting. A
//! backward drag therefore behaves exactly like its forward twin.

use crate::character::{FormatPatch, LetterStyle};
use crate::grid::{LineId, RuleSlot};
use crate::line::TextLine;

/// A position inside the sheet: a line plus a caret offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetPoint {
    /// The line the point is on
    pub line: LineId,
    /// Caret offset within the line
    pub offset: usize,
}

impl SheetPoint {
    /// Creates a point.
    pub fn new(line: LineId, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// The ordered set of text lines on the page.
///
/// This is the unit deep-copied into history snapshots: cloning the line
/// list clones every character cell, so a snapshot shares nothing with
/// the live buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    lines: Vec<TextLine>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sheet from an existing line list (session restore).
    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    // ==================== Accessors ====================

    /// Every line that has ever received content, in creation order.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// The line with the given id, if it exists.
    pub fn line(&self, id: LineId) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Mutable access to the line with the given id.
    pub fn line_mut(&mut self, id: LineId) -> Option<&mut TextLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    /// Returns true if a line exists at the given id.
    pub fn contains(&self, id: LineId) -> bool {
        self.line(id).is_some()
    }

    /// The currently active line, if any.
    pub fn active_line(&self) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.is_active)
    }

    // ==================== Line lifecycle ====================

    /// Ensures a line exists at the given ruled slot, creating it with
    /// the given line-level defaults if this is the slot's first click.
    ///
    /// Returns true if a line was created.
    pub fn ensure_line(
        &mut self,
        slot: &RuleSlot,
        line_style: LetterStyle,
        line_font_size: f32,
        line_font_family: &str,
    ) -> bool {
        if self.contains(slot.id) {
            return false;
        }
        self.lines.push(TextLine::new(
            slot.id,
            slot.y,
            line_style,
            line_font_size,
            line_font_family,
        ));
        true
    }

    /// Marks the given line active and every other line inactive.
    pub fn activate(&mut self, id: LineId) {
        for line in &mut self.lines {
            line.is_active = line.id == id;
        }
    }

    /// Marks every line inactive.
    pub fn deactivate_all(&mut self) {
        for line in &mut self.lines {
            line.is_active = false;
        }
    }

    // ==================== Span operations ====================

    /// Normalizes two span endpoints into document order.
    ///
    /// Document order is (slot index, then offset) — never the gesture
    /// order the endpoints were produced in. Returns `None` if either
    /// endpoint's line is missing, in which case the caller treats the
    /// whole operation as a no-op.
    pub fn normalize_span(&self, a: SheetPoint, b: SheetPoint) -> Option<(SheetPoint, SheetPoint)> {
        if !self.contains(a.line) || !self.contains(b.line) {
            return None;
        }
        let ordered = match a.line.index().cmp(&b.line.index()) {
            std::cmp::Ordering::Less => (a, b),
            std::cmp::Ordering::Greater => (b, a),
            std::cmp::Ordering::Equal => {
                if a.offset <= b.offset {
                    (a, b)
                } else {
                    (b, a)
                }
            }
        };
        Some(ordered)
    }

    /// Deletes the span between two endpoints and returns the point the
    /// caret lands at (the normalized span start).
    ///
    /// Same line: removes `[min, max)`. Across lines: truncates the start
    /// line after the start offset, keeps the end line's remainder past
    /// the end offset, and clears every line strictly between in document
    /// order. Line identities always survive. Returns `None` (and leaves
    /// the sheet untouched) if either endpoint's line is missing.
    pub fn delete_span(&mut self, a: SheetPoint, b: SheetPoint) -> Option<SheetPoint> {
        let (start, end) = self.normalize_span(a, b)?;

        if start.line == end.line {
            let line = self.line_mut(start.line)?;
            let landing = line.remove_span(start.offset, end.offset);
            line.cursor_position = landing;
            return Some(SheetPoint::new(start.line, landing));
        }

        let landing;
        {
            let start_line = self.line_mut(start.line)?;
            start_line.truncate_after(start.offset);
            landing = start_line.len().min(start.offset);
            start_line.cursor_position = landing;
        }
        {
            let end_line = self.line_mut(end.line)?;
            end_line.drain_before(end.offset);
            end_line.cursor_position = 0;
        }
        for line in &mut self.lines {
            if line.id.index() > start.line.index() && line.id.index() < end.line.index() {
                line.clear_characters();
            }
        }

        Some(SheetPoint::new(start.line, landing))
    }

    /// Applies a formatting patch to the span between two endpoints.
    ///
    /// Covers the same three-part split as [`Sheet::delete_span`] but
    /// replaces each affected cell's attributes instead of removing it.
    /// Returns false (and changes nothing) if an endpoint line is missing
    /// or the patch is empty.
    pub fn format_span(&mut self, a: SheetPoint, b: SheetPoint, patch: &FormatPatch) -> bool {
        let Some((start, end)) = self.normalize_span(a, b) else {
            return false;
        };
        if patch.is_empty() {
            return false;
        }

        if start.line == end.line {
            if let Some(line) = self.line_mut(start.line) {
                line.patch_span(start.offset, end.offset, patch);
            }
            return true;
        }

        if let Some(start_line) = self.line_mut(start.line) {
            let len = start_line.len();
            start_line.patch_span(start.offset, len, patch);
        }
        if let Some(end_line) = self.line_mut(end.line) {
            end_line.patch_span(0, end.offset, patch);
        }
        for line in &mut self.lines {
            if line.id.index() > start.line.index() && line.id.index() < end.line.index() {
                line.patch_all(patch);
            }
        }
        true
    }

    // ==================== Geometry ====================

    /// Re-projects every line's y position after a spacing change, using
    /// the slot index carried in each line's id. Identities are untouched.
    pub fn reproject(&mut self, start_y: f32, spacing: f32) {
        for line in &mut self.lines {
            line.y = start_y + line.id.index() as f32 * spacing;
        }
    }

    // ==================== Snapshots ====================

    /// A full deep copy of the line list, for the history stack.
    pub fn snapshot(&self) -> Vec<TextLine> {
        self.lines.clone()
    }

    /// Replaces the buffer contents with a snapshot.
    pub fn restore(&mut self, lines: Vec<TextLine>) {
        self.lines = lines;
    }
}
