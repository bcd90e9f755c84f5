// Chunk: docs/chunks/editing_session - Caret and selection state

//! Caret and selection state.
//!
//! Both follow the anchor model of the sheet: endpoints are recorded in
//! gesture order (a backward drag leaves `end` before `start` in document
//! terms), and every consumer normalizes through
//! [`Sheet::normalize_span`](copybook_sheet::Sheet::normalize_span)
//! before acting, so endpoint order never changes an outcome.

use copybook_sheet::{LineId, SheetPoint};

/// The caret.
///
/// At most one exists per session; it is dropped entirely (not parked)
/// when no line is focused. `x`/`y` are the last painted pixel position —
/// derived values the renderer recomputes, kept only so chrome can read
/// them without measuring. If the referenced line disappears (a history
/// restore to before its creation), the cursor is invalidated in the
/// same transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    /// Last painted x position (derived, not authoritative)
    pub x: f32,
    /// Last painted baseline y position (derived, not authoritative)
    pub y: f32,
    /// The line the caret is on
    pub line: LineId,
    /// Caret offset within the line, `0 <= position <= len`
    pub position: usize,
    /// Blink phase; cosmetic only
    pub visible: bool,
}

/// A selection spanning one or more lines.
///
/// `start`/`end` are in gesture order, not document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Line the gesture started on
    pub start_line: LineId,
    /// Line the gesture currently ends on
    pub end_line: LineId,
    /// Offset within `start_line`
    pub start: usize,
    /// Offset within `end_line`
    pub end: usize,
    /// Whether the selection participates in editing operations
    pub active: bool,
}

impl Selection {
    /// A selection collapsed to a single caret position.
    pub fn collapsed(line: LineId, offset: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
            start: offset,
            end: offset,
            active: true,
        }
    }

    /// The gesture-order start endpoint.
    pub fn start_point(&self) -> SheetPoint {
        SheetPoint::new(self.start_line, self.start)
    }

    /// The gesture-order end endpoint.
    pub fn end_point(&self) -> SheetPoint {
        SheetPoint::new(self.end_line, self.end)
    }

    /// Returns true if the selection covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_selection_is_empty() {
        let sel = Selection::collapsed(LineId::from_index(1), 4);
        assert!(sel.is_empty());
        assert!(sel.active);
        assert_eq!(sel.start_point(), sel.end_point());
    }

    #[test]
    fn backward_selection_is_not_empty() {
        let sel = Selection {
            start_line: LineId::from_index(0),
            end_line: LineId::from_index(0),
            start: 5,
            end: 2,
            active: true,
        };
        assert!(!sel.is_empty());
    }
}
