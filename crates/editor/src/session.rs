// Chunk: docs/chunks/page_state_persistence - Page state persistence

//! Page state persistence.
//!
//! This module provides serialization and deserialization of the full
//! editing state, allowing the host to save the sheet between visits and
//! restore it on the next launch.
//!
//! ## Data Model
//!
//! The page file captures:
//! - Every text line with its characters and per-cell formatting
//! - The full undo/redo history (as whole line-list snapshots) and index
//! - The session font size and the current pen
//!
//! The caret and selection are NOT persisted (they are session-lived and
//! meaningless without a pointer).
//!
//! ## File Location
//!
//! The page file is stored under the platform data directory, e.g.
//! `~/.local/share/copybook/page.json` on Linux.
//!
//! ## Schema Version
//!
//! The page file includes a schema version. If the version doesn't match
//! the current code, the file is discarded (graceful degradation to a
//! fresh sheet).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use copybook_sheet::{first_grapheme, Character, LetterStyle, LineId, Pen, TextLine};

use crate::editor_state::EditorSession;
use crate::history::History;

/// Current schema version for the page file.
///
/// Increment this when making breaking changes to the page format.
const SCHEMA_VERSION: u32 = 1;

/// Application name used for the data directory.
const APP_NAME: &str = "copybook";

/// Page file name.
const PAGE_FILENAME: &str = "page.json";

// =============================================================================
// Serializable Data Types
// =============================================================================

/// Root page state structure.
///
/// This is the top-level structure serialized to the page file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStateData {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Every text line on the sheet.
    pub text_lines: Vec<TextLineData>,
    /// The undo/redo stack as full line-list snapshots.
    pub history: Vec<Vec<TextLineData>>,
    /// Index of the live history snapshot.
    pub history_index: usize,
    /// The session font size.
    pub font_size: f32,
    /// The current pen.
    pub current_formatting: PenData,
}

/// Serializable representation of a text line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLineData {
    /// External line id (`line_<index>`).
    pub id: String,
    /// Baseline y position at save time.
    pub y: f32,
    /// The character cells, left to right.
    pub characters: Vec<CharacterData>,
    /// Last-known caret offset within this line.
    pub cursor_position: usize,
    /// Whether the line held the caret at save time.
    pub is_active: bool,
    /// Line-level default style.
    pub line_style: LetterStyleData,
    /// Line-level default font size.
    pub line_font_size: f32,
    /// Line-level default font family.
    pub line_font_family: String,
}

/// Serializable representation of one character cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterData {
    /// The glyph (one grapheme cluster).
    #[serde(rename = "char")]
    pub glyph: String,
    /// Rendering style.
    pub style: LetterStyleData,
    /// Font size in pixels.
    pub font_size: f32,
    /// Font family.
    pub font_family: String,
    /// CSS color.
    pub color: String,
    /// Bold attribute.
    pub is_bold: bool,
    /// Italic attribute.
    pub is_italic: bool,
}

/// Serializable representation of a letter style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LetterStyleData {
    Solid,
    Dashed,
    Dotted,
}

impl From<LetterStyle> for LetterStyleData {
    fn from(style: LetterStyle) -> Self {
        match style {
            LetterStyle::Solid => LetterStyleData::Solid,
            LetterStyle::Dashed => LetterStyleData::Dashed,
            LetterStyle::Dotted => LetterStyleData::Dotted,
        }
    }
}

impl From<LetterStyleData> for LetterStyle {
    fn from(style: LetterStyleData) -> Self {
        match style {
            LetterStyleData::Solid => LetterStyle::Solid,
            LetterStyleData::Dashed => LetterStyle::Dashed,
            LetterStyleData::Dotted => LetterStyle::Dotted,
        }
    }
}

/// Serializable representation of the pen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenData {
    /// Style for newly typed characters.
    pub style: LetterStyleData,
    /// Font size for newly typed characters.
    pub font_size: f32,
    /// Color for newly typed characters.
    pub color: String,
}

impl From<&Pen> for PenData {
    fn from(pen: &Pen) -> Self {
        PenData {
            style: pen.style.into(),
            font_size: pen.font_size,
            color: pen.color.clone(),
        }
    }
}

impl From<PenData> for Pen {
    fn from(data: PenData) -> Self {
        Pen {
            style: data.style.into(),
            font_size: data.font_size,
            color: data.color,
        }
    }
}

// =============================================================================
// Page File Path
// =============================================================================

/// Returns the path to the page file.
///
/// Returns `None` if the platform data directory cannot be determined.
/// Creates the `copybook` subdirectory if it doesn't exist.
pub fn page_state_path() -> Option<PathBuf> {
    let data_dir = dirs::data_dir()?;
    let app_dir = data_dir.join(APP_NAME);

    // Create the app directory if it doesn't exist
    if !app_dir.exists() {
        if let Err(e) = fs::create_dir_all(&app_dir) {
            eprintln!("Failed to create page state directory {:?}: {}", app_dir, e);
            return None;
        }
    }

    Some(app_dir.join(PAGE_FILENAME))
}

// =============================================================================
// PageStateData Construction
// =============================================================================

impl PageStateData {
    /// Captures the serializable state of a live session.
    pub fn from_session(session: &EditorSession) -> Self {
        let text_lines = session
            .sheet()
            .lines()
            .iter()
            .map(TextLineData::from_line)
            .collect();

        let history = session
            .history()
            .snapshots()
            .iter()
            .map(|snapshot| snapshot.iter().map(TextLineData::from_line).collect())
            .collect();

        PageStateData {
            schema_version: SCHEMA_VERSION,
            text_lines,
            history,
            history_index: session.history().index(),
            font_size: session.font_size(),
            current_formatting: session.pen().into(),
        }
    }
}

impl TextLineData {
    /// Captures a live text line.
    fn from_line(line: &TextLine) -> Self {
        TextLineData {
            id: line.id.to_string(),
            y: line.y,
            characters: line
                .characters()
                .iter()
                .map(CharacterData::from_cell)
                .collect(),
            cursor_position: line.cursor_position,
            is_active: line.is_active,
            line_style: line.line_style.into(),
            line_font_size: line.line_font_size,
            line_font_family: line.line_font_family.clone(),
        }
    }

    /// Rebuilds a live text line.
    ///
    /// Returns `None` if the id doesn't parse — a line without a valid
    /// slot identity has no position on any grid. Cells whose glyphs
    /// fail validation even after clamping are skipped.
    fn into_line(self) -> Option<TextLine> {
        let id = LineId::parse(&self.id)?;
        let mut line = TextLine::new(
            id,
            self.y,
            self.line_style.into(),
            self.line_font_size,
            &self.line_font_family,
        );
        let mut at = 0;
        for cell in self.characters {
            if let Some(cell) = cell.into_cell() {
                at = line.insert(at, cell) + 1;
            }
        }
        line.cursor_position = line.clamp_offset(self.cursor_position);
        line.is_active = self.is_active;
        Some(line)
    }
}

impl CharacterData {
    /// Captures a live cell.
    fn from_cell(cell: &Character) -> Self {
        CharacterData {
            glyph: cell.glyph().to_string(),
            style: cell.style.into(),
            font_size: cell.font_size,
            font_family: cell.font_family.clone(),
            color: cell.color.clone(),
            is_bold: cell.is_bold,
            is_italic: cell.is_italic,
        }
    }

    /// Rebuilds a live cell, clamping an over-long glyph to its first
    /// grapheme cluster. Returns `None` for an empty glyph.
    fn into_cell(self) -> Option<Character> {
        let glyph = first_grapheme(&self.glyph)?;
        Character::with_attributes(
            glyph,
            self.style.into(),
            self.font_size,
            &self.font_family,
            &self.color,
            self.is_bold,
            self.is_italic,
        )
    }
}

// =============================================================================
// Save
// =============================================================================

/// Saves the session's page state to the platform location.
///
/// Uses atomic write (write to temp file, then rename) to prevent
/// corruption.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined or the
/// file cannot be written.
pub fn save_page_state(session: &EditorSession) -> io::Result<()> {
    let path = page_state_path().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine page state path")
    })?;
    save_page_state_to(&path, session)
}

/// Saves the session's page state to an explicit path.
pub fn save_page_state_to(path: &Path, session: &EditorSession) -> io::Result<()> {
    let data = PageStateData::from_session(session);
    let json = serde_json::to_string_pretty(&data)?;

    // Atomic write: write to temp file, then rename
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

// =============================================================================
// Load
// =============================================================================

/// Loads the page state from the platform location.
///
/// Returns `None` if the file doesn't exist, can't be read or parsed, or
/// carries a different schema version. Any failure degrades gracefully
/// to a fresh sheet.
pub fn load_page_state() -> Option<PageStateData> {
    load_page_state_from(&page_state_path()?)
}

/// Loads the page state from an explicit path.
pub fn load_page_state_from(path: &Path) -> Option<PageStateData> {
    if !path.exists() {
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read page state file: {}", e);
            return None;
        }
    };

    let data: PageStateData = match serde_json::from_str(&contents) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to parse page state file: {}", e);
            return None;
        }
    };

    // Check schema version
    if data.schema_version != SCHEMA_VERSION {
        eprintln!(
            "Page state schema version mismatch (expected {}, got {})",
            SCHEMA_VERSION, data.schema_version
        );
        return None;
    }

    Some(data)
}

// =============================================================================
// Restore
// =============================================================================

/// Applies loaded page state to a session.
///
/// Lines with unparseable ids are dropped; a history that violates its
/// invariants is replaced by a fresh one seeded with the restored lines,
/// so the session is always left in a valid state.
pub fn apply_page_state(session: &mut EditorSession, data: PageStateData) {
    let lines: Vec<TextLine> = data
        .text_lines
        .into_iter()
        .filter_map(TextLineData::into_line)
        .collect();

    let snapshots: Vec<Vec<TextLine>> = data
        .history
        .into_iter()
        .map(|snapshot| {
            snapshot
                .into_iter()
                .filter_map(TextLineData::into_line)
                .collect()
        })
        .collect();

    let history = History::from_parts(snapshots, data.history_index)
        .unwrap_or_else(|| History::new(lines.clone()));

    let font_size = data.font_size.max(1.0);
    let pen = Pen::from(data.current_formatting);

    session.restore_parts(lines, history, font_size, pen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FixedMetrics;
    use copybook_input::{MouseEvent, MouseEventKind};

    fn session_with_content() -> EditorSession {
        let mut s = EditorSession::new(Box::new(FixedMetrics::new()));
        let y = s.grid().slots()[1].y as f64;
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Down, 100.0, y));
        s.handle_mouse(&MouseEvent::new(MouseEventKind::Up, 100.0, y));
        s.set_style(LetterStyle::Dashed);
        for ch in "abc".chars() {
            s.insert_char(ch);
        }
        s
    }

    #[test]
    fn conversion_round_trips_content_and_history() {
        let original = session_with_content();
        let data = PageStateData::from_session(&original);

        let mut restored = EditorSession::new(Box::new(FixedMetrics::new()));
        apply_page_state(&mut restored, data);

        assert_eq!(restored.sheet(), original.sheet());
        assert_eq!(restored.history().len(), original.history().len());
        assert_eq!(restored.history().index(), original.history().index());
        assert_eq!(restored.font_size(), original.font_size());
        assert_eq!(restored.pen(), original.pen());
        // The caret never survives a restore
        assert!(restored.cursor().is_none());
    }

    #[test]
    fn restored_history_still_undoes() {
        let original = session_with_content();
        let data = PageStateData::from_session(&original);

        let mut restored = EditorSession::new(Box::new(FixedMetrics::new()));
        apply_page_state(&mut restored, data);

        // Undo the last typed character
        restored.undo();
        let line = restored.sheet().line(LineId::from_index(1)).unwrap();
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn bad_line_ids_are_dropped() {
        let original = session_with_content();
        let mut data = PageStateData::from_session(&original);
        data.text_lines[0].id = "not_a_line".to_string();

        let mut restored = EditorSession::new(Box::new(FixedMetrics::new()));
        apply_page_state(&mut restored, data);
        assert!(restored.sheet().lines().is_empty());
    }

    #[test]
    fn over_long_glyphs_are_clamped_to_first_cluster() {
        let original = session_with_content();
        let mut data = PageStateData::from_session(&original);
        data.text_lines[0].characters[0].glyph = "xyz".to_string();

        let mut restored = EditorSession::new(Box::new(FixedMetrics::new()));
        apply_page_state(&mut restored, data);
        let line = restored.sheet().line(LineId::from_index(1)).unwrap();
        assert_eq!(line.character(0).unwrap().glyph(), "x");
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn invalid_history_falls_back_to_seeded_stack() {
        let original = session_with_content();
        let mut data = PageStateData::from_session(&original);
        data.history_index = 99;

        let mut restored = EditorSession::new(Box::new(FixedMetrics::new()));
        apply_page_state(&mut restored, data);
        assert!(!restored.history().can_undo());
        assert!(!restored.history().can_redo());
        // Content survives even when the history doesn't
        assert_eq!(restored.sheet().lines().len(), 1);
    }
}
