//! Downward search for the largest body font size that fits.
//!
//! A linear walk rather than a binary search: wrap points shift discretely
//! as the size changes, so the height function is not smoothly monotonic,
//! and the range is small enough (≤ ~15 steps) that correctness is worth
//! more than search speed.

use placard_core::error::FontLoadError;
use placard_core::{FontRole, RenderConfig};
use placard_fontdb::FontCatalog;

use crate::measure::TextMeasurer;
use crate::wrap::wrap_block;

/// Fixed decrement between candidate sizes, in pixels
pub const FONT_STEP: u32 = 2;

/// Outcome of the size search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Committed body font size
    pub size: u32,
    /// Estimated height of the wrapped block at that size
    pub estimated_height: f32,
    /// True when the block still exceeds the available space at the
    /// minimum size; rendering proceeds at the floor regardless
    pub overflow: bool,
}

/// Find the largest size in `[min_font_size, initial_font_size]` whose
/// wrapped block fits `available_height`, stepping down by [`FONT_STEP`].
///
/// The loop carries a hard iteration ceiling derived from the size range,
/// so termination never depends on the estimate behaving.
pub fn fit(
    text: &str,
    config: &RenderConfig,
    available_height: f32,
    catalog: &FontCatalog,
) -> Result<FitResult, FontLoadError> {
    let ceiling = (config.initial_font_size.saturating_sub(config.min_font_size)) / FONT_STEP + 1;

    let mut size = config.initial_font_size;
    let mut estimated = estimate_block_height(text, size, config, catalog)?;

    for _ in 0..ceiling {
        if estimated <= available_height || size <= config.min_font_size {
            break;
        }
        size = size.saturating_sub(FONT_STEP).max(config.min_font_size);
        estimated = estimate_block_height(text, size, config, catalog)?;
        log::debug!(
            "fit: trying {}px, block {:.0}px of {:.0}px available",
            size,
            estimated,
            available_height
        );
    }

    let overflow = estimated > available_height;
    if overflow {
        log::warn!(
            "body text overflows its band even at the minimum size {}px ({:.0}px of {:.0}px); rendering at the floor",
            size,
            estimated,
            available_height
        );
    }

    Ok(FitResult {
        size,
        estimated_height: estimated,
        overflow,
    })
}

/// Wrapped-block height estimate at one candidate size: line count times
/// `size × line_spacing_factor`, blank separator lines included
fn estimate_block_height(
    text: &str,
    size: u32,
    config: &RenderConfig,
    catalog: &FontCatalog,
) -> Result<f32, FontLoadError> {
    let font = catalog.resolve(FontRole::Body, size)?;
    let max_chars = TextMeasurer::max_chars_per_line(config.width, &font);
    let line_height = size as f32 * config.line_spacing_factor;
    Ok(wrap_block(text, max_chars).len() as f32 * line_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn short_text_keeps_the_initial_size() {
        let catalog = FontCatalog::new();
        let result = fit("Hello world", &config(), 500.0, &catalog).unwrap();
        assert_eq!(result.size, 40);
        assert!(!result.overflow);
    }

    #[test]
    fn result_never_leaves_the_configured_range() {
        let catalog = FontCatalog::new();
        let long_text = "lorem ipsum dolor sit amet ".repeat(100);
        let result = fit(&long_text, &config(), 400.0, &catalog).unwrap();
        assert!(result.size >= config().min_font_size);
        assert!(result.size <= config().initial_font_size);
    }

    #[test]
    fn impossible_text_sets_the_overflow_flag() {
        let catalog = FontCatalog::new();
        let long_text = "word ".repeat(500);
        let result = fit(&long_text, &config(), 300.0, &catalog).unwrap();
        assert_eq!(result.size, config().min_font_size);
        assert!(result.overflow);
        assert!(result.estimated_height > 300.0);
    }

    #[test]
    fn tight_space_steps_the_size_down() {
        let catalog = FontCatalog::new();
        let text = "a paragraph that needs several lines once the canvas gets narrow enough to matter";
        let roomy = fit(text, &config(), 600.0, &catalog).unwrap();
        let tight = fit(text, &config(), 120.0, &catalog).unwrap();
        assert!(tight.size <= roomy.size);
    }

    #[test]
    fn empty_text_fits_trivially() {
        let catalog = FontCatalog::new();
        let result = fit("", &config(), 500.0, &catalog).unwrap();
        assert_eq!(result.size, 40);
        assert!(!result.overflow);
    }
}
