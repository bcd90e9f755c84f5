// Chunk: docs/chunks/sheet_model - Sheet buffer and multi-line range algorithms

//! Integration tests for realistic sheet editing sequences.
//!
//! These tests drive the model the way the editing engine does: lines
//! created lazily per ruled slot, characters inserted at the caret,
//! spans deleted and formatted across lines.

use copybook_sheet::{
    Character, FormatPatch, LetterStyle, LineGrid, LineId, Pen, Sheet, SheetPoint,
};

const FONT: &str = "Kalam, cursive";

fn grid() -> LineGrid {
    LineGrid::new(1123.0, 120.0, 50.0, 50.0)
}

fn type_on(sheet: &mut Sheet, grid: &LineGrid, slot_index: usize, text: &str) {
    let slot = grid.slots()[slot_index].clone();
    sheet.ensure_line(&slot, LetterStyle::Solid, 16.0, FONT);
    let pen = Pen::default();
    let line = sheet.line_mut(slot.id).unwrap();
    let mut at = line.cursor_position;
    for ch in text.chars() {
        at = line.insert(at, Character::from_char(ch, &pen, FONT)) + 1;
    }
    line.cursor_position = at;
}

fn content(sheet: &Sheet, index: usize) -> String {
    sheet
        .line(LineId::from_index(index))
        .unwrap()
        .characters()
        .iter()
        .map(|c| c.glyph())
        .collect()
}

#[test]
fn test_type_word_then_delete_entirely() {
    let grid = grid();
    let mut sheet = Sheet::new();

    type_on(&mut sheet, &grid, 2, "Hi");
    let id = LineId::from_index(2);
    assert_eq!(content(&sheet, 2), "Hi");
    assert_eq!(sheet.line(id).unwrap().cursor_position, 2);

    // Backspace twice
    let line = sheet.line_mut(id).unwrap();
    assert!(line.remove_before(2).is_some());
    assert!(line.remove_before(1).is_some());
    line.cursor_position = 0;

    assert_eq!(content(&sheet, 2), "");
    // The emptied line keeps its identity and position
    assert!(sheet.contains(id));
    assert_eq!(sheet.line(id).unwrap().y, grid.slots()[2].y);
}

#[test]
fn test_typing_with_corrections() {
    let grid = grid();
    let mut sheet = Sheet::new();
    let id = LineId::from_index(0);

    type_on(&mut sheet, &grid, 0, "teh");
    let line = sheet.line_mut(id).unwrap();
    line.remove_before(3);
    line.remove_before(2);
    let pen = Pen::default();
    line.insert(1, Character::from_char('h', &pen, FONT));
    line.insert(2, Character::from_char('e', &pen, FONT));

    assert_eq!(content(&sheet, 0), "the");
}

#[test]
fn test_multi_line_selection_delete_scenario() {
    let grid = grid();
    let mut sheet = Sheet::new();
    type_on(&mut sheet, &grid, 0, "first line");
    type_on(&mut sheet, &grid, 1, "second");
    type_on(&mut sheet, &grid, 2, "third");

    // Select from line_0 offset 3 through line_2 offset 2, then delete.
    let landing = sheet
        .delete_span(
            SheetPoint::new(LineId::from_index(0), 3),
            SheetPoint::new(LineId::from_index(2), 2),
        )
        .unwrap();

    assert_eq!(landing, SheetPoint::new(LineId::from_index(0), 3));
    assert_eq!(content(&sheet, 0), "fir");
    assert_eq!(content(&sheet, 1), "");
    assert_eq!(content(&sheet, 2), "ird");
    for index in 0..3 {
        assert!(sheet.contains(LineId::from_index(index)));
    }
}

#[test]
fn test_backward_selection_matches_forward() {
    let grid = grid();
    let mut forward = Sheet::new();
    let mut backward = Sheet::new();
    for sheet in [&mut forward, &mut backward] {
        type_on(sheet, &grid, 0, "practice");
        type_on(sheet, &grid, 3, "makes perfect");
    }

    let a = SheetPoint::new(LineId::from_index(0), 5);
    let b = SheetPoint::new(LineId::from_index(3), 6);
    forward.delete_span(a, b).unwrap();
    backward.delete_span(b, a).unwrap();

    assert_eq!(forward, backward);
}

#[test]
fn test_format_then_delete_leaves_untouched_cells_alone() {
    let grid = grid();
    let mut sheet = Sheet::new();
    type_on(&mut sheet, &grid, 1, "trace me");
    let id = LineId::from_index(1);

    sheet.format_span(
        SheetPoint::new(id, 0),
        SheetPoint::new(id, 5),
        &FormatPatch::style(LetterStyle::Dashed),
    );
    sheet.delete_span(SheetPoint::new(id, 0), SheetPoint::new(id, 2)).unwrap();

    let styles: Vec<LetterStyle> = sheet
        .line(id)
        .unwrap()
        .characters()
        .iter()
        .map(|c| c.style)
        .collect();
    // "ace me": three formatted cells survive the delete, the rest solid
    assert_eq!(content(&sheet, 1), "ace me");
    assert_eq!(
        styles,
        vec![
            LetterStyle::Dashed,
            LetterStyle::Dashed,
            LetterStyle::Dashed,
            LetterStyle::Solid,
            LetterStyle::Solid,
            LetterStyle::Solid,
        ]
    );
}

#[test]
fn test_spacing_change_reprojects_every_line() {
    let grid = grid();
    let mut sheet = Sheet::new();
    type_on(&mut sheet, &grid, 0, "a");
    type_on(&mut sheet, &grid, 4, "b");

    sheet.reproject(120.0, 70.0);

    assert_eq!(sheet.line(LineId::from_index(0)).unwrap().y, 120.0);
    assert_eq!(sheet.line(LineId::from_index(4)).unwrap().y, 120.0 + 4.0 * 70.0);
    // Ids unchanged
    assert!(sheet.contains(LineId::from_index(0)));
    assert!(sheet.contains(LineId::from_index(4)));
}
