// Chunk: docs/chunks/ruled_grid - Ruled-line grid geometry

//! The ruled-line grid: the fixed set of horizontal slots a page offers.
//!
//! The grid is pure geometry derived from the page height and line
//! spacing. It carries no content — a [`RuleSlot`] exists whether or not
//! a text line has ever been created at it. When the spacing changes the
//! grid is recomputed from scratch and existing lines are re-projected
//! onto the new slot positions by index, so a line's identity survives
//! the change.

use std::fmt;

/// Stable identity of a ruled line.
///
/// Externally a line id is the string `line_<index>`; internally it is
/// the slot index, which makes the re-projection arithmetic
/// (`y = start_y + index * spacing`) direct. Ordering follows the slot
/// index, i.e. document order top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(usize);

impl LineId {
    /// The id of the slot at `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// The slot index this id names.
    pub fn index(self) -> usize {
        self.0
    }

    /// Parses the external `line_<index>` form.
    ///
    /// Returns `None` for anything else; callers treat an unparseable id
    /// as a missing target.
    pub fn parse(s: &str) -> Option<Self> {
        let index = s.strip_prefix("line_")?.parse().ok()?;
        Some(Self(index))
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

/// One ruled slot: a vertical position where a line of text may be
/// written, independent of whether it currently holds one.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSlot {
    /// Stable slot identity
    pub id: LineId,
    /// Baseline y position in page pixels
    pub y: f32,
}

/// The ordered ruled slots of a page.
#[derive(Debug, Clone)]
pub struct LineGrid {
    slots: Vec<RuleSlot>,
    spacing: f32,
    start_y: f32,
}

impl LineGrid {
    /// Builds the grid for a page.
    ///
    /// Slots start at `start_y` and repeat every `spacing` pixels while
    /// `y < page_height - bottom_margin`. Spacing is clamped to at least
    /// one pixel so a degenerate value cannot produce an unbounded grid.
    pub fn new(page_height: f32, start_y: f32, bottom_margin: f32, spacing: f32) -> Self {
        let spacing = spacing.max(1.0);
        let mut slots = Vec::new();
        let mut y = start_y;
        let mut index = 0;

        while y < page_height - bottom_margin {
            slots.push(RuleSlot {
                id: LineId::from_index(index),
                y,
            });
            y += spacing;
            index += 1;
        }

        Self {
            slots,
            spacing,
            start_y,
        }
    }

    /// The ordered slots, top to bottom.
    pub fn slots(&self) -> &[RuleSlot] {
        &self.slots
    }

    /// Number of slots on the page.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the page has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The line spacing this grid was built with.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// The slot with the given id, if it is on the page.
    pub fn slot(&self, id: LineId) -> Option<&RuleSlot> {
        self.slots.get(id.index())
    }

    /// The slot a click at `y` belongs to: the nearest slot within half
    /// the line spacing. Returns `None` between the rules' capture zones
    /// and outside the ruled area.
    pub fn slot_near(&self, y: f32) -> Option<&RuleSlot> {
        self.slots
            .iter()
            .find(|slot| (y - slot.y).abs() < self.spacing / 2.0)
    }

    /// The y position the given line index projects to on this grid.
    ///
    /// Valid for any index, including slots beyond the page edge — a line
    /// created under a wider spacing keeps its identity even if the
    /// current grid is shorter.
    pub fn y_for_index(&self, index: usize) -> f32 {
        self.start_y + index as f32 * self.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_id_round_trips_external_form() {
        let id = LineId::from_index(7);
        assert_eq!(id.to_string(), "line_7");
        assert_eq!(LineId::parse("line_7"), Some(id));
    }

    #[test]
    fn line_id_parse_rejects_garbage() {
        assert_eq!(LineId::parse("line_"), None);
        assert_eq!(LineId::parse("row_3"), None);
        assert_eq!(LineId::parse("line_x"), None);
        assert_eq!(LineId::parse(""), None);
    }

    #[test]
    fn grid_generates_evenly_spaced_slots() {
        let grid = LineGrid::new(1123.0, 120.0, 50.0, 50.0);
        // 120, 170, ... last slot strictly below 1073
        assert!(!grid.is_empty());
        assert_eq!(grid.slots()[0].y, 120.0);
        assert_eq!(grid.slots()[0].id, LineId::from_index(0));
        for (i, pair) in grid.slots().windows(2).enumerate() {
            assert_eq!(pair[1].y - pair[0].y, 50.0);
            assert_eq!(pair[1].id, LineId::from_index(i + 1));
        }
        let last = grid.slots().last().unwrap();
        assert!(last.y < 1123.0 - 50.0);
        assert!(last.y + 50.0 >= 1123.0 - 50.0);
    }

    #[test]
    fn slot_near_uses_half_spacing_capture() {
        let grid = LineGrid::new(1123.0, 120.0, 50.0, 50.0);
        assert_eq!(grid.slot_near(120.0).unwrap().id, LineId::from_index(0));
        assert_eq!(grid.slot_near(140.0).unwrap().id, LineId::from_index(0));
        assert_eq!(grid.slot_near(146.0).unwrap().id, LineId::from_index(1));
        // Exactly halfway belongs to neither rule
        assert!(grid.slot_near(95.0).is_none());
        // Above the first rule's capture zone
        assert!(grid.slot_near(10.0).is_none());
    }

    #[test]
    fn y_for_index_matches_generated_slots() {
        let grid = LineGrid::new(1123.0, 120.0, 50.0, 70.0);
        for slot in grid.slots() {
            assert_eq!(grid.y_for_index(slot.id.index()), slot.y);
        }
        // Also defined past the page edge
        assert_eq!(grid.y_for_index(100), 120.0 + 100.0 * 70.0);
    }

    #[test]
    fn degenerate_spacing_is_clamped() {
        let grid = LineGrid::new(200.0, 0.0, 0.0, 0.0);
        assert!(grid.len() <= 200);
        assert_eq!(grid.spacing(), 1.0);
    }
}
