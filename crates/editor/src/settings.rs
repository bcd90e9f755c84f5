// Chunk: docs/chunks/page_geometry - Page geometry and sheet settings

//! Page geometry constants and the sheet settings record.

use copybook_sheet::LineGrid;

/// Left page margin in pixels; rules and text start here.
pub const MARGIN_LEFT: f32 = 40.0;

/// Right page margin in pixels.
pub const MARGIN_RIGHT: f32 = 40.0;

/// Baseline of the first ruled line.
pub const START_Y: f32 = 120.0;

/// Rules stop this many pixels above the page bottom.
pub const BOTTOM_MARGIN: f32 = 50.0;

/// Font family newly typed characters are rendered in.
pub const HANDWRITING_FONT: &str = "Kalam, cursive";

/// Supported page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    /// A4 portrait at 96 dpi
    #[default]
    A4,
}

impl PaperSize {
    /// Page width in pixels.
    pub fn width(self) -> f32 {
        match self {
            PaperSize::A4 => 794.0,
        }
    }

    /// Page height in pixels.
    pub fn height(self) -> f32 {
        match self {
            PaperSize::A4 => 1123.0,
        }
    }
}

/// Presentation settings for the practice sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSettings {
    /// Distance between ruled lines in pixels
    pub line_spacing: f32,
    /// Color of the ruled lines
    pub line_color: String,
    /// Page background color
    pub background_color: String,
    /// Page dimensions
    pub paper_size: PaperSize,
    /// Whether the faint guideline pair is drawn around each rule
    pub show_guidelines: bool,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            line_spacing: 50.0,
            line_color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            paper_size: PaperSize::A4,
            show_guidelines: true,
        }
    }
}

impl SheetSettings {
    /// Page width in pixels.
    pub fn page_width(&self) -> f32 {
        self.paper_size.width()
    }

    /// Page height in pixels.
    pub fn page_height(&self) -> f32 {
        self.paper_size.height()
    }

    /// Builds the ruled-line grid these settings describe.
    pub fn grid(&self) -> LineGrid {
        LineGrid::new(
            self.page_height(),
            START_Y,
            BOTTOM_MARGIN,
            self.line_spacing,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_covers_the_page() {
        let settings = SheetSettings::default();
        let grid = settings.grid();
        assert_eq!(grid.spacing(), 50.0);
        assert_eq!(grid.slots()[0].y, START_Y);
        let last = grid.slots().last().unwrap();
        assert!(last.y < settings.page_height() - BOTTOM_MARGIN);
    }

    #[test]
    fn wider_spacing_means_fewer_slots() {
        let narrow = SheetSettings::default().grid();
        let wide = SheetSettings {
            line_spacing: 70.0,
            ..Default::default()
        }
        .grid();
        assert!(wide.len() < narrow.len());
    }
}
