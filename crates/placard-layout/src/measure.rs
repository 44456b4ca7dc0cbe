//! String measurement from glyph metrics, no rasterization required.

use placard_fontdb::FontHandle;

/// Measures strings against a resolved font handle.
///
/// All results are pure functions of the handle's metrics; the same
/// (text, font, size) triple always measures identically.
pub struct TextMeasurer;

impl TextMeasurer {
    /// Advance width and bounding height of `text`
    pub fn measure(text: &str, font: &FontHandle) -> (f32, f32) {
        (Self::advance_width(text, font), font.line_height())
    }

    /// Sum of per-character advances
    pub fn advance_width(text: &str, font: &FontHandle) -> f32 {
        text.chars().map(|ch| font.char_advance(ch)).sum()
    }

    /// Mean advance of the 26 lowercase Latin letters.
    ///
    /// A deliberate heuristic: real text mixes wider and narrower glyphs,
    /// but the mean is close enough to estimate characters-per-line before
    /// actual wrapping. Recompute whenever font or size changes.
    pub fn average_char_width(font: &FontHandle) -> f32 {
        let total: f32 = ('a'..='z').map(|ch| font.char_advance(ch)).sum();
        total / 26.0
    }

    /// Estimated character budget for one line on a canvas of `canvas_width`,
    /// leaving 10% of the width as breathing room
    pub fn max_chars_per_line(canvas_width: u32, font: &FontHandle) -> usize {
        let average = Self::average_char_width(font);
        if average <= 0.0 {
            return 1;
        }
        (((canvas_width as f32 * 0.9) / average).floor() as usize).max(1)
    }
}
