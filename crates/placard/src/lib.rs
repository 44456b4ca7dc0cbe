//! Placard - text-to-image card composition
//!
//! Placard turns a block of cleaned plain text into a fixed-size raster
//! card: optional header caption, a word-wrapped and size-fitted body
//! block, optional footer caption, and an optional cover-fitted background
//! image. The pipeline:
//!
//! 1. Background resolution (cover-fit, or a solid color)
//! 2. Font resolution by role through a cached fallback chain
//! 3. Size fitting of the wrapped body block
//! 4. Grapheme-aware segmentation into text and emoji runs
//! 5. Centered line rendering onto the canvas
//!
//! # Example
//!
//! ```no_run
//! use placard::{render_card, RenderConfig};
//!
//! let config = RenderConfig::builder()
//!     .header("Daily Notes")
//!     .footer("2024")
//!     .build()?;
//! let card = render_card("Hello world", config)?;
//! assert_eq!(card.pixmap.width(), 700);
//! # Ok::<(), placard::PlacardError>(())
//! ```

pub use placard_core::{
    config, error, CanvasSpec, Color, ConfigError, FontLoadError, FontRole, LayoutResult,
    PlacardError, PositionedLine, RenderConfig, RenderConfigBuilder, Result, Run, RunKind,
};
pub use placard_render::{BackgroundResolver, Compositor, RenderedCard};

pub use placard_fontdb as fontdb;
pub use placard_layout as layout;
pub use placard_render as render;
pub use placard_unicode as unicode;

/// Render one card with a throwaway compositor.
///
/// Callers rendering many cards should hold a [`Compositor`] instead so the
/// font and background caches carry across calls.
pub fn render_card(text: &str, config: RenderConfig) -> Result<RenderedCard> {
    Compositor::new(config).render(text)
}

/// Common imports for typical usage
pub mod prelude {
    pub use placard_core::{
        error::{PlacardError, Result},
        Color, FontRole, LayoutResult, RenderConfig, Run, RunKind,
    };
    pub use placard_render::{Compositor, RenderedCard};
}
