// Chunk: docs/chunks/paint_ops - Paint-op renderer glue

//! The renderer: current state → an ordered list of paint ops.
//!
//! The engine never touches a drawing surface. [`render`] walks the
//! session read-only and emits primitive [`PaintOp`]s — rules, the title
//! block, every character under its own stored attributes, the caret,
//! and the selection highlight. A [`Frame`] is the off-screen raster
//! capability: export tooling replays the ops onto whatever surface it
//! owns. If no surface is available the frame is simply dropped; state
//! is unaffected.

use copybook_sheet::LetterStyle;

use crate::editor_state::EditorSession;
use crate::hit_test;
use crate::settings::{MARGIN_LEFT, MARGIN_RIGHT};

/// Dash pattern for [`LetterStyle::Dashed`] outlines.
pub const DASHED_PATTERN: [f32; 2] = [3.0, 2.0];

/// Dash pattern for [`LetterStyle::Dotted`] outlines.
pub const DOTTED_PATTERN: [f32; 2] = [1.0, 2.0];

/// Selection highlight fill.
const SELECTION_FILL: &str = "rgba(0, 123, 255, 0.3)";

/// Selection highlight border.
const SELECTION_STROKE: &str = "rgba(0, 123, 255, 0.5)";

/// One drawing primitive.
///
/// Coordinates are page pixels; glyph ops position the baseline like a
/// canvas `fillText`/`strokeText` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// Fill the whole page with a color
    Clear {
        color: String,
    },
    /// Stroke a straight line segment
    StrokeLine {
        from: (f32, f32),
        to: (f32, f32),
        color: String,
        width: f32,
        alpha: f32,
    },
    /// Fill a rectangle
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    /// Stroke a rectangle outline
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
        line_width: f32,
    },
    /// Fill a run of chrome text (title block); `font` is a CSS font
    /// shorthand like `bold 24px Arial`
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: String,
        color: String,
        centered: bool,
    },
    /// Fill one glyph (solid letter style)
    FillGlyph {
        glyph: String,
        x: f32,
        y: f32,
        font_size: f32,
        font_family: String,
        color: String,
    },
    /// Stroke one glyph outline with a dash pattern (dashed/dotted
    /// letter styles); the fill is never painted
    StrokeGlyph {
        glyph: String,
        x: f32,
        y: f32,
        font_size: f32,
        font_family: String,
        color: String,
        line_width: f32,
        dash: [f32; 2],
    },
}

/// One rendered frame: the page dimensions plus the ordered ops.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Page width in pixels
    pub width: f32,
    /// Page height in pixels
    pub height: f32,
    /// Paint ops in draw order
    pub ops: Vec<PaintOp>,
}

/// Renders the current session state into a frame.
///
/// Pure over the model: calling this never mutates the session, and the
/// same state always produces the same frame.
pub fn render(session: &EditorSession) -> Frame {
    let settings = session.settings();
    let width = settings.page_width();
    let height = settings.page_height();
    let mut ops = Vec::new();

    ops.push(PaintOp::Clear {
        color: settings.background_color.clone(),
    });

    paint_rules(session, width, &mut ops);
    paint_title(session, width, &mut ops);
    paint_characters(session, &mut ops);
    paint_caret(session, &mut ops);
    paint_selection(session, width, &mut ops);

    Frame { width, height, ops }
}

fn paint_rules(session: &EditorSession, width: f32, ops: &mut Vec<PaintOp>) {
    let settings = session.settings();
    let spacing = session.grid().spacing();

    for slot in session.grid().slots() {
        ops.push(PaintOp::StrokeLine {
            from: (MARGIN_LEFT, slot.y),
            to: (width - MARGIN_RIGHT, slot.y),
            color: settings.line_color.clone(),
            width: 1.0,
            alpha: 1.0,
        });

        if settings.show_guidelines {
            for offset in [-spacing / 3.0, spacing / 3.0] {
                ops.push(PaintOp::StrokeLine {
                    from: (MARGIN_LEFT, slot.y + offset),
                    to: (width - MARGIN_RIGHT, slot.y + offset),
                    color: settings.line_color.clone(),
                    width: 0.5,
                    alpha: 0.3,
                });
            }
        }
    }
}

fn paint_title(session: &EditorSession, width: f32, ops: &mut Vec<PaintOp>) {
    ops.push(PaintOp::FillText {
        text: session.title().to_string(),
        x: width / 2.0,
        y: 40.0,
        font: "bold 24px Arial".to_string(),
        color: "#000000".to_string(),
        centered: true,
    });
    ops.push(PaintOp::FillText {
        text: "Name:  _________________________________".to_string(),
        x: MARGIN_LEFT,
        y: 70.0,
        font: "16px Arial".to_string(),
        color: "#000000".to_string(),
        centered: false,
    });
    ops.push(PaintOp::FillText {
        text: "Date:  _______________".to_string(),
        x: width - 200.0,
        y: 70.0,
        font: "16px Arial".to_string(),
        color: "#000000".to_string(),
        centered: false,
    });
}

fn paint_characters(session: &EditorSession, ops: &mut Vec<PaintOp>) {
    for line in session.sheet().lines() {
        let mut x = MARGIN_LEFT;
        for cell in line.characters() {
            let op = match cell.style {
                LetterStyle::Solid => PaintOp::FillGlyph {
                    glyph: cell.glyph().to_string(),
                    x,
                    y: line.y,
                    font_size: cell.font_size,
                    font_family: cell.font_family.clone(),
                    color: cell.color.clone(),
                },
                LetterStyle::Dashed => PaintOp::StrokeGlyph {
                    glyph: cell.glyph().to_string(),
                    x,
                    y: line.y,
                    font_size: cell.font_size,
                    font_family: cell.font_family.clone(),
                    color: cell.color.clone(),
                    line_width: 1.0,
                    dash: DASHED_PATTERN,
                },
                LetterStyle::Dotted => PaintOp::StrokeGlyph {
                    glyph: cell.glyph().to_string(),
                    x,
                    y: line.y,
                    font_size: cell.font_size,
                    font_family: cell.font_family.clone(),
                    color: cell.color.clone(),
                    line_width: 1.0,
                    dash: DOTTED_PATTERN,
                },
            };
            ops.push(op);
            x += session.metrics().advance(cell);
        }
    }
}

fn paint_caret(session: &EditorSession, ops: &mut Vec<PaintOp>) {
    let Some(cursor) = session.cursor() else {
        return;
    };
    if !cursor.visible {
        return;
    }
    let Some(line) = session.sheet().line(cursor.line) else {
        return;
    };

    let x = hit_test::x_for_offset(cursor.position, line, session.metrics());
    ops.push(PaintOp::StrokeLine {
        from: (x, line.y - session.font_size()),
        to: (x, line.y),
        color: "#000000".to_string(),
        width: 2.0,
        alpha: 1.0,
    });
}

fn paint_selection(session: &EditorSession, width: f32, ops: &mut Vec<PaintOp>) {
    let Some(selection) = session.selection() else {
        return;
    };
    if !selection.active {
        return;
    }
    // Normalize to document order so a backward drag highlights the same
    // region as its forward twin
    let Some((start, end)) = session
        .sheet()
        .normalize_span(selection.start_point(), selection.end_point())
    else {
        return;
    };

    let height = session.font_size() + 4.0;

    if start.line == end.line {
        let Some(line) = session.sheet().line(start.line) else {
            return;
        };
        let start_x = hit_test::x_for_offset(start.offset, line, session.metrics());
        let end_x = hit_test::x_for_offset(end.offset, line, session.metrics());
        push_highlight(ops, start_x, line.y - height, end_x - start_x, height);
        return;
    }

    // Start line: selection start to the right margin
    if let Some(line) = session.sheet().line(start.line) {
        let start_x = hit_test::x_for_offset(start.offset, line, session.metrics());
        push_highlight(
            ops,
            start_x,
            line.y - height,
            width - MARGIN_RIGHT - start_x,
            height,
        );
    }

    // Full-width rectangles for every line strictly between
    for line in session.sheet().lines() {
        if line.id.index() > start.line.index() && line.id.index() < end.line.index() {
            push_highlight(
                ops,
                MARGIN_LEFT,
                line.y - height,
                width - MARGIN_LEFT - MARGIN_RIGHT,
                height,
            );
        }
    }

    // End line: left margin to the selection end
    if let Some(line) = session.sheet().line(end.line) {
        let end_x = hit_test::x_for_offset(end.offset, line, session.metrics());
        push_highlight(ops, MARGIN_LEFT, line.y - height, end_x - MARGIN_LEFT, height);
    }
}

fn push_highlight(ops: &mut Vec<PaintOp>, x: f32, y: f32, width: f32, height: f32) {
    ops.push(PaintOp::FillRect {
        x,
        y,
        width,
        height,
        color: SELECTION_FILL.to_string(),
    });
    ops.push(PaintOp::StrokeRect {
        x,
        y,
        width,
        height,
        color: SELECTION_STROKE.to_string(),
        line_width: 1.0,
    });
}
