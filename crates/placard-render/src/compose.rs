//! The compositor: background, caption bands, and the fitted body block.
//!
//! Orchestration only — every decision it stitches together lives in a
//! leaf component: background resolution, font resolution, size fitting,
//! wrapping, segmentation, line rendering.

use std::sync::Arc;

use tiny_skia::Pixmap;

use placard_core::error::PlacardError;
use placard_core::{FontRole, LayoutResult, PositionedLine, RenderConfig};
use placard_fontdb::{FontCatalog, FontHandle};
use placard_layout::{fit, wrap_block, TextMeasurer};
use placard_unicode::GlyphSegmenter;

use crate::background::BackgroundResolver;
use crate::{glyph, line};

/// One finished card: the pixel buffer plus the layout that produced it
#[derive(Debug)]
pub struct RenderedCard {
    pub pixmap: Pixmap,
    pub layout: LayoutResult,
}

impl RenderedCard {
    /// True when the body was rendered at the floor size and still exceeds
    /// its band
    pub fn overflow(&self) -> bool {
        self.layout.overflow
    }
}

/// Top-level card renderer.
///
/// Holds the process-lifetime caches (fonts, backgrounds); everything per
/// render call is local, so one compositor can serve many threads of
/// independent renders.
pub struct Compositor {
    config: RenderConfig,
    catalog: Arc<FontCatalog>,
    backgrounds: BackgroundResolver,
    segmenter: GlyphSegmenter,
}

impl Compositor {
    pub fn new(config: RenderConfig) -> Self {
        let catalog = Arc::new(FontCatalog::with_config(&config));
        Self::with_catalog(config, catalog)
    }

    /// Share an existing catalog, e.g. across the compositors of a batch
    pub fn with_catalog(config: RenderConfig, catalog: Arc<FontCatalog>) -> Self {
        Self {
            config,
            catalog,
            backgrounds: BackgroundResolver::new(),
            segmenter: GlyphSegmenter::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `text` onto a fresh canvas.
    ///
    /// The canvas is always exactly `config.width x config.height`. An empty
    /// body is valid: the card then carries only background, header, and
    /// footer.
    pub fn render(&self, text: &str) -> Result<RenderedCard, PlacardError> {
        let spec = self.config.canvas_spec();
        let margin = spec.margin();

        let base = self.backgrounds.resolve(
            self.config.background_image_path.as_deref(),
            spec.width,
            spec.height,
            spec.background,
        )?;
        // The cached background is shared; composite onto a private copy
        let mut canvas = (*base).clone();

        let caption_font = self
            .catalog
            .resolve(FontRole::Header, self.config.header_font_size())?;

        let mut body_start = margin * 2.0;
        if let Some(header) = self.caption_text(self.config.header.as_deref()) {
            let width = TextMeasurer::advance_width(header, &caption_font);
            let x = (spec.width as f32 - width) / 2.0;
            let (ascent, _) = caption_font.line_metrics();
            glyph::draw_text(
                &mut canvas,
                header,
                x,
                margin + ascent,
                &caption_font,
                self.config.caption_color,
            );
            body_start = margin + caption_font.line_height() + margin;
        }

        let mut body_end = spec.height as f32 - margin * 2.0;
        if let Some(footer) = self.caption_text(self.config.footer.as_deref()) {
            let width = TextMeasurer::advance_width(footer, &caption_font);
            let x = (spec.width as f32 - width) / 2.0;
            let footer_top = spec.height as f32 - margin - caption_font.line_height();
            let (ascent, _) = caption_font.line_metrics();
            glyph::draw_text(
                &mut canvas,
                footer,
                x,
                footer_top + ascent,
                &caption_font,
                self.config.caption_color,
            );
            body_end = footer_top - margin;
        }

        let layout = if text.trim().is_empty() {
            log::debug!("no body text; returning captions and background only");
            LayoutResult {
                font_size: self.config.initial_font_size,
                lines: Vec::new(),
                block_height: 0.0,
                overflow: false,
            }
        } else {
            self.render_body(&mut canvas, text, body_start, body_end)?
        };

        Ok(RenderedCard {
            pixmap: canvas,
            layout,
        })
    }

    fn render_body(
        &self,
        canvas: &mut Pixmap,
        text: &str,
        body_start: f32,
        body_end: f32,
    ) -> Result<LayoutResult, PlacardError> {
        let available = (body_end - body_start).max(0.0);
        let fitted = fit(text, &self.config, available, &self.catalog)?;

        let body_font = self.catalog.resolve(FontRole::Body, fitted.size)?;
        let emoji_font = self.emoji_font(fitted.size);

        let max_chars = TextMeasurer::max_chars_per_line(self.config.width, &body_font);
        let lines = wrap_block(text, max_chars);

        let line_advance = fitted.size as f32 * self.config.line_spacing_factor;
        let block_height = lines.len() as f32 * line_advance;
        let cell = body_font.size() * self.config.emoji_cell_width_factor;

        let mut y = body_start + (available - block_height) / 2.0;
        let mut positioned = Vec::with_capacity(lines.len());

        for text_line in &lines {
            if text_line.trim().is_empty() {
                // Blank separator lines keep their vertical slot
                y += line_advance;
                continue;
            }

            let runs = self.segmenter.segment(text_line);
            let width = line::line_width(&runs, &body_font, cell, &self.segmenter);
            let x = (self.config.width as f32 - width) / 2.0;

            line::render_line(
                canvas,
                &runs,
                y,
                &body_font,
                emoji_font.as_deref(),
                self.config.emoji_cell_width_factor,
                self.config.text_color,
                &self.segmenter,
            );

            positioned.push(PositionedLine { runs, x, y, width });
            y += line_advance;
        }

        Ok(LayoutResult {
            font_size: fitted.size,
            lines: positioned,
            block_height,
            overflow: fitted.overflow,
        })
    }

    /// Caption strings are present only when non-blank
    fn caption_text<'t>(&self, caption: Option<&'t str>) -> Option<&'t str> {
        caption.filter(|text| !text.trim().is_empty())
    }

    /// Emoji sources degrade to none; the renderer then leaves cells blank
    fn emoji_font(&self, size: u32) -> Option<Arc<FontHandle>> {
        match self.catalog.resolve(FontRole::Emoji, size) {
            Ok(font) => Some(font),
            Err(err) => {
                log::debug!("no emoji font available: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_always_matches_the_configured_size() {
        let config = RenderConfig::builder()
            .width(320)
            .height(480)
            .build()
            .unwrap();
        let card = Compositor::new(config).render("Hello world").unwrap();
        assert_eq!((card.pixmap.width(), card.pixmap.height()), (320, 480));
    }

    #[test]
    fn empty_body_renders_without_layout() {
        let config = RenderConfig::builder()
            .header("Brand")
            .footer("2024")
            .build()
            .unwrap();
        let card = Compositor::new(config).render("").unwrap();
        assert!(card.layout.lines.is_empty());
        assert!(!card.overflow());
        assert_eq!(card.layout.block_height, 0.0);
    }

    #[test]
    fn whitespace_only_captions_count_as_absent() {
        let config = RenderConfig::builder().header("   ").build().unwrap();
        let blank_header = Compositor::new(config).render("").unwrap();

        let plain = Compositor::new(RenderConfig::default()).render("").unwrap();
        assert_eq!(blank_header.pixmap.data(), plain.pixmap.data());
    }
}
