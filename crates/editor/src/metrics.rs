// Chunk: docs/chunks/glyph_metrics - Injected text measurement capability

//! Text measurement as an injected capability.
//!
//! The sheet draws every character under its own stored font attributes,
//! so the only question the engine ever asks a text system is "how wide
//! is this glyph at this size in this family". Abstracting that one
//! question behind a trait keeps the hit-tester and renderer free of any
//! real drawing surface.

use copybook_sheet::Character;

/// Measures rendered glyph advances.
///
/// Implementations are pure from the engine's point of view: the same
/// inputs must return the same width for the lifetime of a session.
pub trait GlyphMetrics {
    /// Width in pixels of `glyph` rendered at `font_size` in `font_family`.
    fn measure(&self, glyph: &str, font_size: f32, font_family: &str) -> f32;

    /// Width of a character cell, measured under the cell's own stored
    /// attributes (never the session's current pen).
    fn advance(&self, cell: &Character) -> f32 {
        self.measure(cell.glyph(), cell.font_size, &cell.font_family)
    }
}

/// Deterministic fixed-advance metrics: every glyph is a fixed fraction
/// of its font size.
///
/// Used by the test suites and useful for headless layout where no text
/// system is available.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    em_fraction: f32,
}

impl FixedMetrics {
    /// Metrics with the default 0.6 em advance.
    pub fn new() -> Self {
        Self { em_fraction: 0.6 }
    }

    /// Metrics with a custom advance fraction.
    pub fn with_em_fraction(em_fraction: f32) -> Self {
        Self { em_fraction }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphMetrics for FixedMetrics {
    fn measure(&self, _glyph: &str, font_size: f32, _font_family: &str) -> f32 {
        font_size * self.em_fraction
    }
}
