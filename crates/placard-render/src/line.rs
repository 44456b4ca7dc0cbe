//! Two-pass line rendering: measure every run, center the line, then draw.
//!
//! Text runs advance by measured width plus one trailing space; emoji
//! clusters occupy fixed square cells (`font size × cell factor`)
//! regardless of their actual bitmap dimensions — predictable layout is
//! worth more than pixel-perfect emoji spacing here.

use tiny_skia::Pixmap;

use placard_core::{Color, Run, RunKind};
use placard_fontdb::FontHandle;
use placard_layout::TextMeasurer;
use placard_unicode::GlyphSegmenter;

use crate::{emoji, glyph};

/// Pixel width of one run
pub fn run_width(run: &Run, body: &FontHandle, cell: f32, segmenter: &GlyphSegmenter) -> f32 {
    match run.kind {
        RunKind::Text => TextMeasurer::advance_width(&run.text, body) + body.char_advance(' '),
        RunKind::Emoji => segmenter.graphemes(&run.text).len() as f32 * cell,
    }
}

/// Total pixel width of a run sequence
pub fn line_width(runs: &[Run], body: &FontHandle, cell: f32, segmenter: &GlyphSegmenter) -> f32 {
    runs.iter()
        .map(|run| run_width(run, body, cell, segmenter))
        .sum()
}

/// Draw a run sequence with its top edge at `y`, centered horizontally on
/// the canvas. The background and any caption ink must already be present;
/// emoji composite over it with alpha blending.
///
/// Returns the total width drawn, for diagnostics and tests.
#[allow(clippy::too_many_arguments)]
pub fn render_line(
    canvas: &mut Pixmap,
    runs: &[Run],
    y: f32,
    body: &FontHandle,
    emoji_font: Option<&FontHandle>,
    cell_factor: f32,
    color: Color,
    segmenter: &GlyphSegmenter,
) -> f32 {
    let cell = body.size() * cell_factor;
    let total = line_width(runs, body, cell, segmenter);
    let mut cursor = (canvas.width() as f32 - total) / 2.0;

    let (ascent, _) = body.line_metrics();
    let baseline = y + ascent;
    let cell_top = y + (body.line_height() - cell) / 2.0;

    for run in runs {
        match run.kind {
            RunKind::Text => {
                glyph::draw_text(canvas, &run.text, cursor, baseline, body, color);
                cursor += run_width(run, body, cell, segmenter);
            }
            RunKind::Emoji => {
                for cluster in segmenter.graphemes(&run.text) {
                    match emoji_font.and_then(|font| emoji::rasterize_cluster(font, cluster)) {
                        Some(bitmap) => {
                            emoji::draw_in_cell(canvas, &bitmap, cursor, cell_top, cell)
                        }
                        None => log::debug!(
                            "no emoji source for cluster {:?}; cell left blank",
                            cluster
                        ),
                    }
                    cursor += cell;
                }
            }
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::solid_canvas;
    use placard_core::FontRole;
    use placard_fontdb::FontCatalog;

    fn setup() -> (std::sync::Arc<FontHandle>, GlyphSegmenter) {
        let font = FontCatalog::new().resolve(FontRole::Body, 40).unwrap();
        (font, GlyphSegmenter::new())
    }

    #[test]
    fn text_run_width_includes_one_trailing_space() {
        let (font, segmenter) = setup();
        let run = Run::text("word");
        let bare = TextMeasurer::advance_width("word", &font);
        let width = run_width(&run, &font, 48.0, &segmenter);
        assert!((width - (bare + font.char_advance(' '))).abs() < 0.001);
    }

    #[test]
    fn emoji_run_width_is_cells_times_clusters() {
        let (font, segmenter) = setup();
        let run = Run::emoji("\u{1F600}\u{1F601}");
        assert_eq!(run_width(&run, &font, 48.0, &segmenter), 96.0);

        let flag = Run::emoji("\u{1F1FA}\u{1F1F8}");
        assert_eq!(run_width(&flag, &font, 48.0, &segmenter), 48.0);
    }

    #[test]
    fn empty_run_sequence_draws_nothing() {
        let (font, segmenter) = setup();
        let mut canvas = solid_canvas(100, 100, Color::white()).unwrap();
        let before = canvas.data().to_vec();
        let total = render_line(
            &mut canvas,
            &[],
            10.0,
            &font,
            None,
            1.2,
            Color::black(),
            &segmenter,
        );
        assert_eq!(total, 0.0);
        assert_eq!(canvas.data(), before.as_slice());
    }

    #[test]
    fn missing_emoji_source_skips_but_reserves_the_cell() {
        let (font, segmenter) = setup();
        let mut canvas = solid_canvas(400, 100, Color::white()).unwrap();
        let runs = vec![Run::emoji("\u{1F600}")];
        let total = render_line(
            &mut canvas,
            &runs,
            10.0,
            &font,
            None,
            1.2,
            Color::black(),
            &segmenter,
        );
        assert_eq!(total, 48.0);
    }

    #[test]
    fn drawn_line_is_centered() {
        let (font, segmenter) = setup();
        let canvas_width = 700.0_f32;
        let runs = vec![Run::text("Hello world")];
        let total = line_width(&runs, &font, 48.0, &segmenter);
        let left = (canvas_width - total) / 2.0;
        let right = canvas_width - left - total;
        assert!((left - right).abs() <= 1.0);
    }
}
