// Chunk: docs/chunks/undo_history - Linear full-snapshot undo/redo

//! Linear undo/redo over full sheet snapshots.
//!
//! Every content mutation records one deep copy of the line list, taken
//! *after* the mutation, so undo always reverts exactly one logical user
//! action. No diffing: line and character counts are bounded by a single
//! printed page, so whole-buffer copies trade memory nobody misses for a
//! history that cannot drift out of sync.
//!
//! The stack is seeded with the initial buffer state, which is what makes
//! the very first edit undoable.

use copybook_sheet::TextLine;

/// The undo/redo stack: snapshots plus the index of the live one.
///
/// Invariants: the stack is never empty and `index < len`. Recording
/// discards everything after the current index first (classic linear
/// branch discard), then appends.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<Vec<TextLine>>,
    index: usize,
}

impl History {
    /// A history seeded with the session's initial buffer state.
    pub fn new(initial: Vec<TextLine>) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// Rebuilds a history from persisted parts.
    ///
    /// Returns `None` if the parts violate the invariants (empty stack or
    /// out-of-range index); the caller falls back to a fresh history.
    pub fn from_parts(snapshots: Vec<Vec<TextLine>>, index: usize) -> Option<Self> {
        if snapshots.is_empty() || index >= snapshots.len() {
            return None;
        }
        Some(Self { snapshots, index })
    }

    /// Records the buffer state after a mutation.
    pub fn record(&mut self, snapshot: Vec<TextLine>) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index = self.snapshots.len() - 1;
    }

    /// Returns true if there is a state before the current one.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Returns true if there is a state after the current one.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Steps back one state and returns the snapshot to restore.
    ///
    /// No-op returning `None` at the bottom of the stack.
    pub fn undo(&mut self) -> Option<&[TextLine]> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Steps forward one state and returns the snapshot to restore.
    ///
    /// No-op returning `None` at the top of the stack.
    pub fn redo(&mut self) -> Option<&[TextLine]> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    /// Every snapshot, oldest first.
    pub fn snapshots(&self) -> &[Vec<TextLine>] {
        &self.snapshots
    }

    /// Index of the live snapshot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of snapshots on the stack.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the stack keeps its seed state forever.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copybook_sheet::{LetterStyle, LineId, TextLine};

    fn snap(n: usize) -> Vec<TextLine> {
        (0..n)
            .map(|i| {
                TextLine::new(
                    LineId::from_index(i),
                    120.0 + i as f32 * 50.0,
                    LetterStyle::Solid,
                    16.0,
                    "Kalam, cursive",
                )
            })
            .collect()
    }

    #[test]
    fn undo_at_seed_is_noop() {
        let mut history = History::new(snap(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn record_then_undo_returns_prior_state() {
        let mut history = History::new(snap(0));
        history.record(snap(1));
        assert!(history.can_undo());
        assert_eq!(history.undo().unwrap().len(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn redo_restores_the_undone_state() {
        let mut history = History::new(snap(0));
        history.record(snap(1));
        history.undo();
        assert!(history.can_redo());
        assert_eq!(history.redo().unwrap().len(), 1);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn record_after_undo_discards_redo_branch() {
        let mut history = History::new(snap(0));
        history.record(snap(1));
        history.record(snap(2));
        history.undo();
        history.undo();
        history.record(snap(3));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.snapshots()[1].len(), 3);
    }

    #[test]
    fn from_parts_validates_invariants() {
        assert!(History::from_parts(vec![], 0).is_none());
        assert!(History::from_parts(vec![snap(0)], 1).is_none());
        let history = History::from_parts(vec![snap(0), snap(1)], 1).unwrap();
        assert_eq!(history.index(), 1);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }
}
