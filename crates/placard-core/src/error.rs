//! Error types for placard

use crate::FontRole;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacardError>;

/// Main error type for placard
#[derive(Debug, Error)]
pub enum PlacardError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering failed: {0}")]
    Rendering(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors.
///
/// Reaching the caller means the whole fallback chain for a role failed,
/// including the built-in face; text cannot be rendered at all.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data in {0}")]
    InvalidData(String),

    #[error("Every font in the fallback chain failed for role {0:?}")]
    ChainExhausted(FontRole),
}

/// Configuration errors, rejected before any layout work starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Font size must be positive, got {0}")]
    InvalidFontSize(u32),

    #[error("Minimum font size {min} exceeds initial size {initial}")]
    FontSizeRange { min: u32, initial: u32 },

    #[error("{name} must be positive, got {value}")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("Margin fraction {0} outside (0, 0.5)")]
    InvalidMargin(f32),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Glyph rasterization failed: {0}")]
    Glyph(String),
}

/// Background image failures.
///
/// Always recovered locally by falling back to a solid-color canvas;
/// surfaced through logs, never through a render result.
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("Background image not found: {0}")]
    FileNotFound(String),

    #[error("Background image {path} could not be decoded: {reason}")]
    Decode { path: String, reason: String },
}
