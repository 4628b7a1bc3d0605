//! Text measurement.

/// Measures text in surface pixels. Supplied by the rendering surface.
pub trait TextMetrics {
    /// Width of a single line of text.
    fn measure(&self, line: &str) -> f64;

    /// Height of one line of text.
    fn line_height(&self) -> f64;
}

/// Character-count estimate used when no font backend is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateMetrics {
    pub font_size: f64,
    /// Average glyph width as a fraction of the font size.
    pub char_width_factor: f64,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f64,
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

impl TextMetrics for ApproximateMetrics {
    fn measure(&self, line: &str) -> f64 {
        line.chars().count() as f64 * self.font_size * self.char_width_factor
    }

    fn line_height(&self) -> f64 {
        self.font_size * self.line_height_factor
    }
}
