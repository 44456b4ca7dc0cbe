//! Text run rasterization: outline faces become filled tiny-skia paths,
//! the built-in face becomes scaled dot rectangles.

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::MetadataProvider;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use placard_core::Color;
use placard_fontdb::builtin::{BuiltinFont, GLYPH_COLS, GLYPH_ROWS};
use placard_fontdb::{Face, Font, FontHandle};

/// Collects a glyph outline into a tiny-skia path
struct PathPen {
    builder: PathBuilder,
}

impl PathPen {
    fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.builder.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.builder.cubic_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn ink_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Draw `text` with its baseline at (`x`, `baseline_y`), returning the
/// advance consumed.
///
/// Glyphs the face cannot map are skipped but still advance, so a partial
/// face degrades to gaps rather than shifting the rest of the line.
pub fn draw_text(
    canvas: &mut Pixmap,
    text: &str,
    x: f32,
    baseline_y: f32,
    font: &FontHandle,
    color: Color,
) -> f32 {
    match font.face() {
        Face::Outline(outline) => {
            draw_outline_text(canvas, text, x, baseline_y, outline, font.size(), color)
        }
        Face::Builtin(_) => draw_builtin_text(canvas, text, x, baseline_y, font.size(), color),
    }
}

fn draw_outline_text(
    canvas: &mut Pixmap,
    text: &str,
    x: f32,
    baseline_y: f32,
    font: &Font,
    size: f32,
    color: Color,
) -> f32 {
    let paint = ink_paint(color);
    let mut cursor = x;

    let Ok(font_ref) = skrifa::FontRef::from_index(font.data(), font.face_index()) else {
        return 0.0;
    };
    let outlines = font_ref.outline_glyphs();
    let charmap = font_ref.charmap();
    let glyph_metrics = font_ref.glyph_metrics(Size::new(size), LocationRef::default());

    for ch in text.chars() {
        let gid = charmap.map(ch);
        let advance = gid
            .and_then(|gid| glyph_metrics.advance_width(gid))
            .unwrap_or(size * 0.5);

        if let Some(outline) = gid.and_then(|gid| outlines.get(gid)) {
            let mut pen = PathPen::new();
            let settings = DrawSettings::unhinted(Size::new(size), LocationRef::default());
            if outline.draw(settings, &mut pen).is_ok() {
                if let Some(path) = pen.finish() {
                    // Outlines are Y-up around the baseline origin;
                    // flip into canvas space and shift to the cursor.
                    let transform = Transform::from_row(1.0, 0.0, 0.0, -1.0, cursor, baseline_y);
                    canvas.fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
            }
        }

        cursor += advance;
    }

    cursor - x
}

fn draw_builtin_text(
    canvas: &mut Pixmap,
    text: &str,
    x: f32,
    baseline_y: f32,
    size: f32,
    color: Color,
) -> f32 {
    let paint = ink_paint(color);
    let dot = BuiltinFont::dot(size);
    let top = baseline_y - BuiltinFont::ascent(size);
    let mut cursor = x;

    for ch in text.chars() {
        let columns = BuiltinFont::columns(ch);
        for (col, bits) in columns.iter().enumerate().take(GLYPH_COLS) {
            for row in 0..GLYPH_ROWS {
                if bits & (1 << row) == 0 {
                    continue;
                }
                let Some(rect) = Rect::from_xywh(
                    cursor + col as f32 * dot,
                    top + row as f32 * dot,
                    dot,
                    dot,
                ) else {
                    continue;
                };
                canvas.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
        cursor += BuiltinFont::advance(size);
    }

    cursor - x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::solid_canvas;
    use placard_core::FontRole;
    use placard_fontdb::FontCatalog;

    #[test]
    fn drawing_leaves_ink_on_the_canvas() {
        let mut canvas = solid_canvas(200, 100, Color::white()).unwrap();
        let before = canvas.data().to_vec();

        let font = FontCatalog::new().resolve(FontRole::Body, 40).unwrap();
        let advance = draw_text(&mut canvas, "Hi", 10.0, 60.0, &font, Color::black());

        assert!(advance > 0.0);
        assert_ne!(canvas.data(), before.as_slice());
    }

    #[test]
    fn spaces_advance_without_ink() {
        let mut canvas = solid_canvas(100, 50, Color::white()).unwrap();
        let before = canvas.data().to_vec();

        let font = FontCatalog::new().resolve(FontRole::Body, 24).unwrap();
        let advance = draw_text(&mut canvas, "   ", 5.0, 30.0, &font, Color::black());

        assert!(advance > 0.0);
        assert_eq!(canvas.data(), before.as_slice());
    }
}
