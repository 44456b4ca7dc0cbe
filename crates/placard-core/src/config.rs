//! Typed render configuration with explicit defaults.
//!
//! Every knob the compositor honors lives here, validated once at
//! construction. Invalid values are rejected up front rather than surfacing
//! halfway through a layout pass.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::{CanvasSpec, Color};

pub const DEFAULT_WIDTH: u32 = 700;
pub const DEFAULT_HEIGHT: u32 = 700;
pub const DEFAULT_FONT_SIZE: u32 = 40;
pub const MIN_FONT_SIZE: u32 = 24;
pub const LINE_SPACING_FACTOR: f32 = 1.3;
pub const EMOJI_CELL_WIDTH_FACTOR: f32 = 1.2;
pub const MARGIN_FRACTION: f32 = 0.05;
pub const HEADER_FONT_SCALE: f32 = 0.6;
pub const MIN_HEADER_FONT_SIZE: u32 = 16;

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::rgb(248, 248, 248);
pub const DEFAULT_TEXT_COLOR: Color = Color::black();
pub const DEFAULT_CAPTION_COLOR: Color = Color::rgb(0x44, 0x44, 0x44);

/// Immutable input to a single render call.
///
/// Construct through [`RenderConfig::builder`]; `build` rejects impossible
/// combinations (zero dimensions, `min_font_size > initial_font_size`, ...)
/// so downstream stages never have to re-validate.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub initial_font_size: u32,
    pub min_font_size: u32,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub background_image_path: Option<PathBuf>,
    pub line_spacing_factor: f32,
    pub emoji_cell_width_factor: f32,
    pub margin_fraction: f32,
    pub background_color: Color,
    pub text_color: Color,
    pub caption_color: Color,
    /// Preferred face for the body role, tried before the system fallbacks
    pub body_font_path: Option<PathBuf>,
    /// Preferred face for header and footer captions
    pub header_font_path: Option<PathBuf>,
    /// Preferred color-capable face for emoji
    pub emoji_font_path: Option<PathBuf>,
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    pub fn canvas_spec(&self) -> CanvasSpec {
        CanvasSpec {
            width: self.width,
            height: self.height,
            background: self.background_color,
            margin_fraction: self.margin_fraction,
        }
    }

    /// Caption size derived from the body size, with a readability floor
    pub fn header_font_size(&self) -> u32 {
        ((self.initial_font_size as f32 * HEADER_FONT_SCALE) as u32).max(MIN_HEADER_FONT_SIZE)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_font_size: DEFAULT_FONT_SIZE,
            min_font_size: MIN_FONT_SIZE,
            header: None,
            footer: None,
            background_image_path: None,
            line_spacing_factor: LINE_SPACING_FACTOR,
            emoji_cell_width_factor: EMOJI_CELL_WIDTH_FACTOR,
            margin_fraction: MARGIN_FRACTION,
            background_color: DEFAULT_BACKGROUND_COLOR,
            text_color: DEFAULT_TEXT_COLOR,
            caption_color: DEFAULT_CAPTION_COLOR,
            body_font_path: None,
            header_font_path: None,
            emoji_font_path: None,
        }
    }
}

/// Builder for [`RenderConfig`] with validation at `build`
#[derive(Debug, Clone, Default)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn initial_font_size(mut self, size: u32) -> Self {
        self.config.initial_font_size = size;
        self
    }

    pub fn min_font_size(mut self, size: u32) -> Self {
        self.config.min_font_size = size;
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.config.header = Some(header.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.config.footer = Some(footer.into());
        self
    }

    pub fn background_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.background_image_path = Some(path.into());
        self
    }

    pub fn line_spacing_factor(mut self, factor: f32) -> Self {
        self.config.line_spacing_factor = factor;
        self
    }

    pub fn emoji_cell_width_factor(mut self, factor: f32) -> Self {
        self.config.emoji_cell_width_factor = factor;
        self
    }

    pub fn margin_fraction(mut self, fraction: f32) -> Self {
        self.config.margin_fraction = fraction;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.config.text_color = color;
        self
    }

    pub fn caption_color(mut self, color: Color) -> Self {
        self.config.caption_color = color;
        self
    }

    pub fn body_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.body_font_path = Some(path.into());
        self
    }

    pub fn header_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.header_font_path = Some(path.into());
        self
    }

    pub fn emoji_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.emoji_font_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let c = self.config;

        if c.width == 0 || c.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: c.width,
                height: c.height,
            });
        }
        if c.initial_font_size == 0 {
            return Err(ConfigError::InvalidFontSize(c.initial_font_size));
        }
        if c.min_font_size == 0 {
            return Err(ConfigError::InvalidFontSize(c.min_font_size));
        }
        if c.min_font_size > c.initial_font_size {
            return Err(ConfigError::FontSizeRange {
                min: c.min_font_size,
                initial: c.initial_font_size,
            });
        }
        if !(c.line_spacing_factor > 0.0) {
            return Err(ConfigError::InvalidFactor {
                name: "line_spacing_factor",
                value: c.line_spacing_factor,
            });
        }
        if !(c.emoji_cell_width_factor > 0.0) {
            return Err(ConfigError::InvalidFactor {
                name: "emoji_cell_width_factor",
                value: c.emoji_cell_width_factor,
            });
        }
        if !(c.margin_fraction > 0.0 && c.margin_fraction < 0.5) {
            return Err(ConfigError::InvalidMargin(c.margin_fraction));
        }

        Ok(c)
    }
}
