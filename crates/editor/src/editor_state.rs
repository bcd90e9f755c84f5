// Chunk: docs/chunks/editing_session - Editing session state machine
// Chunk: docs/chunks/mouse_hit_testing - Mouse click caret placement and drag selection

//! The editing session: one context object holding all mutable state.
//!
//! Everything the sheet widget mutates lives here — the sheet buffer,
//! the caret, the selection, the current pen, and the history — so the
//! whole state machine is testable in isolation and nothing is ambient.
//! All mutations are synchronous on the event thread: an event is fully
//! applied (including its history record) before the next one is looked
//! at, so a history snapshot never captures a transient buffer.
//!
//! ## Focus states
//!
//! - `Idle`: no caret; every key event is ignored.
//! - `Editing`: a caret is placed; no active selection.
//! - `Selecting`: a caret plus an active selection, or a mouse drag in
//!   progress that may become one.
//!
//! Focus is derived from the caret/selection/drag fields rather than
//! stored, so it cannot fall out of sync with them.

use copybook_input::{KeyEvent, MouseEvent, MouseEventKind};
use copybook_sheet::{
    Character, FormatPatch, LetterStyle, LineGrid, LineId, Pen, Sheet, SheetPoint, TextLine,
};

use crate::cursor::{Cursor, Selection};
use crate::history::History;
use crate::hit_test;
use crate::metrics::GlyphMetrics;
use crate::settings::{SheetSettings, HANDWRITING_FONT, START_Y};
use crate::sheet_target::{self, Handled};

/// Duration in milliseconds between caret blink toggles.
pub const CURSOR_BLINK_INTERVAL_MS: u64 = 500;

/// Which state the cursor/selection machine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// No caret; key events are ignored
    Idle,
    /// Caret placed, no active selection
    Editing,
    /// Caret plus an active selection or an armed drag
    Selecting,
}

/// One editing session over one practice sheet.
///
/// Exclusively owns the sheet, caret, selection, pen, and history; the
/// renderer observes it read-only. Text measurement is injected at
/// construction so the session never touches a real drawing surface.
pub struct EditorSession {
    sheet: Sheet,
    cursor: Option<Cursor>,
    selection: Option<Selection>,
    pen: Pen,
    font_size: f32,
    line_style: LetterStyle,
    title: String,
    settings: SheetSettings,
    grid: LineGrid,
    history: History,
    dragging: bool,
    metrics: Box<dyn GlyphMetrics>,
}

impl EditorSession {
    /// Creates an empty session with default settings.
    pub fn new(metrics: Box<dyn GlyphMetrics>) -> Self {
        Self::with_settings(SheetSettings::default(), metrics)
    }

    /// Creates an empty session with the given settings.
    pub fn with_settings(settings: SheetSettings, metrics: Box<dyn GlyphMetrics>) -> Self {
        let grid = settings.grid();
        let sheet = Sheet::new();
        let history = History::new(sheet.snapshot());
        let pen = Pen::default();
        let font_size = pen.font_size;
        Self {
            sheet,
            cursor: None,
            selection: None,
            pen,
            font_size,
            line_style: LetterStyle::default(),
            title: String::new(),
            settings,
            grid,
            history,
            dragging: false,
            metrics,
        }
    }

    // ==================== Accessors ====================

    /// The sheet buffer.
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// The caret, if a line is focused.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// The selection, if one exists.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The current pen (formatting applied to newly typed characters).
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// The session font size.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// The page settings.
    pub fn settings(&self) -> &SheetSettings {
        &self.settings
    }

    /// The ruled-line grid for the current settings.
    pub fn grid(&self) -> &LineGrid {
        &self.grid
    }

    /// The page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The undo/redo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The injected text-measurement capability.
    pub fn metrics(&self) -> &dyn GlyphMetrics {
        self.metrics.as_ref()
    }

    /// The current state of the cursor/selection machine.
    pub fn focus(&self) -> FocusState {
        if self.cursor.is_none() {
            return FocusState::Idle;
        }
        let selecting = self.dragging || self.selection.as_ref().is_some_and(|s| s.active);
        if selecting {
            FocusState::Selecting
        } else {
            FocusState::Editing
        }
    }

    // ==================== Chrome setters ====================

    /// Sets the page title. Presentation only; not part of history.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Sets the default letter style for newly created lines.
    pub fn set_line_style(&mut self, style: LetterStyle) {
        self.line_style = style;
    }

    // ==================== Mouse ====================

    /// Routes a mouse event through the hit-tester into the state
    /// machine. Events that land outside every rule's capture zone are
    /// ignored; a click outside the canvas entirely is the host's to
    /// detect and should call [`EditorSession::clear_focus`].
    pub fn handle_mouse(&mut self, event: &MouseEvent) {
        match event.kind {
            MouseEventKind::Down => self.mouse_down(event),
            MouseEventKind::Moved => self.mouse_moved(event),
            MouseEventKind::Up => {
                self.dragging = false;
                // A drag that never swept over a character leaves nothing
                // worth keeping selected
                if self.selection.as_ref().is_some_and(|s| s.is_empty()) {
                    self.selection = None;
                }
            }
        }
    }

    fn mouse_down(&mut self, event: &MouseEvent) {
        let (x, y) = (event.position.0 as f32, event.position.1 as f32);
        let Some(slot) = self.grid.slot_near(y).cloned() else {
            return;
        };

        let created =
            self.sheet
                .ensure_line(&slot, self.line_style, self.font_size, HANDWRITING_FONT);
        self.sheet.activate(slot.id);

        let offset = match self.sheet.line(slot.id) {
            Some(line) => hit_test::offset_for_x(x, line, self.metrics.as_ref()),
            None => return,
        };

        let previous = self.cursor.take();
        self.place_cursor(slot.id, offset);
        self.dragging = true;

        if event.modifiers.shift {
            match &mut self.selection {
                Some(selection) => {
                    selection.end_line = slot.id;
                    selection.end = offset;
                    selection.active = true;
                }
                None => {
                    // Anchor at the caret position before this click, or at
                    // the click itself when there was no caret
                    let (anchor_line, anchor_offset) = previous
                        .map(|c| (c.line, c.position))
                        .unwrap_or((slot.id, offset));
                    self.selection = Some(Selection {
                        start_line: anchor_line,
                        end_line: slot.id,
                        start: anchor_offset,
                        end: offset,
                        active: true,
                    });
                }
            }
        } else {
            self.selection = None;
        }

        if created {
            self.record_history();
        }
    }

    fn mouse_moved(&mut self, event: &MouseEvent) {
        if !self.dragging {
            return;
        }
        let (x, y) = (event.position.0 as f32, event.position.1 as f32);
        let Some(slot) = self.grid.slot_near(y).cloned() else {
            return;
        };
        // Dragging only sweeps over lines that already exist
        let Some(line) = self.sheet.line(slot.id) else {
            return;
        };
        let offset = hit_test::offset_for_x(x, line, self.metrics.as_ref());

        let previous = self.cursor.take();
        self.place_cursor(slot.id, offset);

        match &mut self.selection {
            Some(selection) => {
                selection.end_line = slot.id;
                selection.end = offset;
                selection.active = true;
            }
            None => {
                let (anchor_line, anchor_offset) = previous
                    .map(|c| (c.line, c.position))
                    .unwrap_or((slot.id, 0));
                self.selection = Some(Selection {
                    start_line: anchor_line,
                    end_line: slot.id,
                    start: anchor_offset,
                    end: offset,
                    active: true,
                });
            }
        }
    }

    /// Drops the caret and selection and returns to `Idle`. Called for
    /// Escape and for clicks outside the canvas and floating panels.
    pub fn clear_focus(&mut self) {
        self.cursor = None;
        self.selection = None;
        self.dragging = false;
        self.sheet.deactivate_all();
    }

    // ==================== Keyboard ====================

    /// Routes a key event into the session. Returns [`Handled::Yes`]
    /// when the event was consumed and the host must suppress its
    /// default handling; everything is ignored while `Idle`.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Handled {
        sheet_target::handle_key(self, event)
    }

    /// Inserts a typed character at the caret using the current pen.
    ///
    /// With an active selection this is replace-on-type: the selected
    /// range is deleted and the character lands at the resulting caret,
    /// all under a single history record.
    pub fn insert_char(&mut self, ch: char) {
        if self.has_active_selection() {
            let Some(landing) = self.delete_active_selection() else {
                return;
            };
            let cell = Character::from_char(ch, &self.pen, HANDWRITING_FONT);
            let Some(line) = self.sheet.line_mut(landing.line) else {
                return;
            };
            let at = line.insert(landing.offset, cell);
            line.cursor_position = at + 1;
            self.place_cursor(landing.line, at + 1);
            self.record_history();
            return;
        }

        let Some(cursor) = self.cursor.clone() else {
            return;
        };
        let cell = Character::from_char(ch, &self.pen, HANDWRITING_FONT);
        let Some(line) = self.sheet.line_mut(cursor.line) else {
            self.cursor = None;
            return;
        };
        let at = line.insert(cursor.position, cell);
        line.cursor_position = at + 1;
        self.place_cursor(cursor.line, at + 1);
        self.record_history();
    }

    /// Backspace: deletes the selection, or the character before the
    /// caret. No-op at offset 0 (no cross-line merging — lines are fixed
    /// ruled slots).
    pub fn delete_backward(&mut self) {
        if self.has_active_selection() {
            if self.delete_active_selection().is_some() {
                self.record_history();
            }
            return;
        }

        let Some(cursor) = self.cursor.clone() else {
            return;
        };
        let Some(line) = self.sheet.line_mut(cursor.line) else {
            self.cursor = None;
            return;
        };
        let offset = line.clamp_offset(cursor.position);
        if line.remove_before(offset).is_some() {
            line.cursor_position = offset - 1;
            self.place_cursor(cursor.line, offset - 1);
            self.record_history();
        }
    }

    /// Forward delete: deletes the selection, or the character at the
    /// caret. No-op at the end of the line.
    pub fn delete_forward(&mut self) {
        if self.has_active_selection() {
            if self.delete_active_selection().is_some() {
                self.record_history();
            }
            return;
        }

        let Some(cursor) = self.cursor.clone() else {
            return;
        };
        let Some(line) = self.sheet.line_mut(cursor.line) else {
            self.cursor = None;
            return;
        };
        let offset = line.clamp_offset(cursor.position);
        if line.remove(offset).is_some() {
            line.cursor_position = offset;
            self.place_cursor(cursor.line, offset);
            self.record_history();
        }
    }

    /// Moves the caret one offset left, clamped to the line start.
    /// Plain movement clears the selection; with `extend` the selection
    /// grows (or starts) between the pre-move and post-move offsets.
    pub fn move_left(&mut self, extend: bool) {
        self.move_horizontal(extend, |offset, _len| offset.saturating_sub(1));
    }

    /// Moves the caret one offset right, clamped to the line end.
    pub fn move_right(&mut self, extend: bool) {
        self.move_horizontal(extend, |offset, len| (offset + 1).min(len));
    }

    /// Moves the caret to the line start. With `extend`, selects from the
    /// start to the caret's old position and keeps the caret in place.
    pub fn move_to_line_start(&mut self, extend: bool) {
        let Some(cursor) = self.cursor.clone() else {
            return;
        };
        if extend {
            self.selection = Some(Selection {
                start_line: cursor.line,
                end_line: cursor.line,
                start: 0,
                end: cursor.position,
                active: true,
            });
        } else {
            self.selection = None;
            self.place_cursor(cursor.line, 0);
        }
    }

    /// Moves the caret to the line end. With `extend`, selects from the
    /// caret's old position to the end and keeps the caret in place.
    pub fn move_to_line_end(&mut self, extend: bool) {
        let Some(cursor) = self.cursor.clone() else {
            return;
        };
        let Some(line) = self.sheet.line(cursor.line) else {
            self.cursor = None;
            return;
        };
        let len = line.len();
        if extend {
            self.selection = Some(Selection {
                start_line: cursor.line,
                end_line: cursor.line,
                start: cursor.position,
                end: len,
                active: true,
            });
        } else {
            self.selection = None;
            self.place_cursor(cursor.line, len);
        }
    }

    fn move_horizontal(&mut self, extend: bool, step: impl Fn(usize, usize) -> usize) {
        let Some(cursor) = self.cursor.clone() else {
            return;
        };
        let Some(line) = self.sheet.line(cursor.line) else {
            self.cursor = None;
            return;
        };
        let old = line.clamp_offset(cursor.position);
        let new = step(old, line.len());

        if extend {
            if new == old {
                return;
            }
            match &mut self.selection {
                Some(selection) => {
                    selection.end_line = cursor.line;
                    selection.end = new;
                    selection.active = true;
                }
                None => {
                    self.selection = Some(Selection {
                        start_line: cursor.line,
                        end_line: cursor.line,
                        start: old,
                        end: new,
                        active: true,
                    });
                }
            }
            self.place_cursor(cursor.line, new);
        } else {
            self.selection = None;
            self.place_cursor(cursor.line, new);
        }
    }

    // ==================== History ====================

    /// Steps the history back one state and restores it.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            let snapshot = snapshot.to_vec();
            self.sheet.restore(snapshot);
            self.reconcile_after_restore();
        }
    }

    /// Steps the history forward one state and restores it.
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            let snapshot = snapshot.to_vec();
            self.sheet.restore(snapshot);
            self.reconcile_after_restore();
        }
    }

    fn record_history(&mut self) {
        self.history.record(self.sheet.snapshot());
    }

    /// A restored snapshot may predate the caret's line. The caret is
    /// invalidated in the same transaction; a surviving caret is clamped
    /// to the restored line length.
    fn reconcile_after_restore(&mut self) {
        if let Some(cursor) = self.cursor.clone() {
            match self.sheet.line(cursor.line) {
                Some(line) => {
                    let offset = line.clamp_offset(cursor.position);
                    self.place_cursor(cursor.line, offset);
                }
                None => {
                    self.cursor = None;
                    self.dragging = false;
                }
            }
        }
        if let Some(selection) = &self.selection {
            if !self.sheet.contains(selection.start_line)
                || !self.sheet.contains(selection.end_line)
            {
                self.selection = None;
            }
        }
    }

    // ==================== Formatting panel ====================

    /// Sets the pen style; an active selection is restyled immediately.
    pub fn set_style(&mut self, style: LetterStyle) {
        self.pen.style = style;
        self.apply_to_selection(FormatPatch::style(style));
    }

    /// Sets the pen color; an active selection is recolored immediately.
    pub fn set_color(&mut self, color: &str) {
        self.pen.color = color.to_string();
        self.apply_to_selection(FormatPatch::color(color));
    }

    /// Sets the session font size and the pen size; an active selection
    /// is resized immediately.
    pub fn set_font_size(&mut self, font_size: f32) {
        let font_size = font_size.max(1.0);
        self.font_size = font_size;
        self.pen.font_size = font_size;
        self.apply_to_selection(FormatPatch::font_size(font_size));
    }

    fn apply_to_selection(&mut self, patch: FormatPatch) {
        let Some(selection) = self.selection.clone().filter(|s| s.active) else {
            return;
        };
        if self
            .sheet
            .format_span(selection.start_point(), selection.end_point(), &patch)
        {
            self.record_history();
        }
    }

    // ==================== Settings changes ====================

    /// Changes the line spacing: rebuilds the grid and re-projects every
    /// existing line's y (and the caret's) via the slot-index arithmetic,
    /// keeping every id stable.
    pub fn set_line_spacing(&mut self, line_spacing: f32) {
        self.settings.line_spacing = line_spacing.max(1.0);
        self.grid = self.settings.grid();
        self.sheet.reproject(START_Y, self.grid.spacing());
        if let Some(cursor) = &mut self.cursor {
            cursor.y = START_Y + cursor.line.index() as f32 * self.grid.spacing();
        }
        self.record_history();
    }

    /// Toggles the faint guideline pair around each rule.
    pub fn set_show_guidelines(&mut self, show: bool) {
        self.settings.show_guidelines = show;
    }

    // ==================== Blink ====================

    /// Toggles caret visibility; called by the host every
    /// [`CURSOR_BLINK_INTERVAL_MS`]. Cosmetic only — never touches any
    /// offset or position state.
    pub fn tick_blink(&mut self) {
        if let Some(cursor) = &mut self.cursor {
            cursor.visible = !cursor.visible;
        }
    }

    // ==================== Internals ====================

    fn has_active_selection(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| s.active)
    }

    /// Deletes the active selection and parks the caret at the landing
    /// point. Returns `None` (leaving everything untouched) if an
    /// endpoint line is missing.
    fn delete_active_selection(&mut self) -> Option<SheetPoint> {
        let selection = self.selection.clone().filter(|s| s.active)?;
        let landing = self
            .sheet
            .delete_span(selection.start_point(), selection.end_point())?;
        self.selection = None;
        self.place_cursor(landing.line, landing.offset);
        Some(landing)
    }

    /// Places the caret at (line, offset), recomputing its derived pixel
    /// position and resetting the blink phase to visible.
    fn place_cursor(&mut self, id: LineId, offset: usize) {
        let Some(line) = self.sheet.line(id) else {
            self.cursor = None;
            return;
        };
        let offset = line.clamp_offset(offset);
        self.cursor = Some(Cursor {
            x: hit_test::x_for_offset(offset, line, self.metrics.as_ref()),
            y: line.y,
            line: id,
            position: offset,
            visible: true,
        });
    }

    /// Restores persisted parts wholesale. The caret and selection never
    /// survive a restore; line positions are re-projected onto the
    /// current grid.
    pub(crate) fn restore_parts(
        &mut self,
        lines: Vec<TextLine>,
        history: History,
        font_size: f32,
        pen: Pen,
    ) {
        self.sheet = Sheet::from_lines(lines);
        self.sheet.reproject(START_Y, self.grid.spacing());
        self.history = history;
        self.font_size = font_size;
        self.pen = pen;
        self.cursor = None;
        self.selection = None;
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FixedMetrics;
    use copybook_input::Key;

    fn session() -> EditorSession {
        EditorSession::new(Box::new(FixedMetrics::new()))
    }

    fn slot_y(session: &EditorSession, index: usize) -> f64 {
        session.grid().slots()[index].y as f64
    }

    #[test]
    fn starts_idle_and_ignores_keys() {
        let mut s = session();
        assert_eq!(s.focus(), FocusState::Idle);
        assert_eq!(s.handle_key(&KeyEvent::char('a')), Handled::No);
        assert!(s.sheet().lines().is_empty());
    }

    #[test]
    fn click_creates_line_and_focuses() {
        let mut s = session();
        let y = slot_y(&s, 2);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y));

        assert_eq!(s.focus(), FocusState::Editing);
        let cursor = s.cursor().unwrap();
        assert_eq!(cursor.line, LineId::from_index(2));
        assert_eq!(cursor.position, 0);
        assert!(s.sheet().contains(LineId::from_index(2)));
        assert!(s.sheet().line(LineId::from_index(2)).unwrap().is_active);
        // Line creation is undoable
        assert!(s.history().can_undo());
    }

    #[test]
    fn click_between_rules_is_ignored() {
        let mut s = session();
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, 95.0));
        assert_eq!(s.focus(), FocusState::Idle);
        assert!(s.sheet().lines().is_empty());
    }

    #[test]
    fn escape_returns_to_idle() {
        let mut s = session();
        let y = slot_y(&s, 0);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y));
        assert_eq!(s.focus(), FocusState::Editing);

        assert_eq!(
            s.handle_key(&KeyEvent::new(Key::Escape, Default::default())),
            Handled::Yes
        );
        assert_eq!(s.focus(), FocusState::Idle);
        assert!(s.cursor().is_none());
        assert!(s.selection().is_none());
    }

    #[test]
    fn drag_over_existing_line_selects() {
        let mut s = session();
        let y0 = slot_y(&s, 0);
        // Create the line and type two characters
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y0));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y0));
        s.insert_char('h');
        s.insert_char('i');

        // Press at the far left and sweep right across both cells
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 40.0, y0));
        assert_eq!(s.focus(), FocusState::Selecting);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Moved, 400.0, y0));
        let selection = s.selection().unwrap();
        assert_eq!(selection.start, 0);
        assert_eq!(selection.end, 2);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 400.0, y0));
        assert!(s.selection().is_some());
        assert_eq!(s.focus(), FocusState::Selecting);
    }

    #[test]
    fn empty_drag_leaves_no_selection() {
        let mut s = session();
        let y0 = slot_y(&s, 0);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y0));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Moved, 100.0, y0));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y0));
        assert!(s.selection().is_none());
        assert_eq!(s.focus(), FocusState::Editing);
    }

    #[test]
    fn blink_toggles_without_touching_position() {
        let mut s = session();
        let y = slot_y(&s, 1);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y));

        let before = s.cursor().unwrap().clone();
        assert!(before.visible);
        s.tick_blink();
        let after = s.cursor().unwrap();
        assert!(!after.visible);
        assert_eq!(after.position, before.position);
        assert_eq!(after.line, before.line);
        s.tick_blink();
        assert!(s.cursor().unwrap().visible);
    }

    #[test]
    fn typing_resets_blink_phase_to_visible() {
        let mut s = session();
        let y = slot_y(&s, 0);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y));
        s.tick_blink();
        assert!(!s.cursor().unwrap().visible);
        s.insert_char('a');
        assert!(s.cursor().unwrap().visible);
    }

    #[test]
    fn shift_click_anchors_at_previous_caret() {
        let mut s = session();
        let y = slot_y(&s, 0);
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y));
        for ch in "hello".chars() {
            s.insert_char(ch);
        }
        // Caret sits at offset 5; shift-click back at the left margin
        s.handle_mouse(&MouseEvent::down_shifted(40.0, y));
        let selection = s.selection().unwrap();
        assert_eq!(selection.start, 5);
        assert_eq!(selection.end, 0);
        assert!(selection.active);
    }
}
