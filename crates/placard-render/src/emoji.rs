//! Emoji rasterization from color-capable fonts.
//!
//! Clusters are looked up in the font's bitmap strike tables (sbix on
//! Apple fonts, CBDT/CBLC on Noto) and decoded from PNG, BGRA, or mask
//! data. Every failure path returns `None`: an emoji whose bitmap cannot
//! be produced leaves its reserved cell blank instead of failing the
//! render.

use skrifa::bitmap::{BitmapData, BitmapStrikes};
use skrifa::instance::Size;
use skrifa::MetadataProvider;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use placard_fontdb::{Face, FontHandle};

/// Rasterize one grapheme cluster from the emoji font's bitmap strikes.
///
/// Compound sequences are keyed by their first scalar, which matches the
/// base glyph bitmap in common color fonts; sequences the font only covers
/// via substitution come back `None` and are skipped.
pub fn rasterize_cluster(font: &FontHandle, cluster: &str) -> Option<Pixmap> {
    let Face::Outline(face) = font.face() else {
        return None;
    };

    let base = cluster.chars().next()?;
    let font_ref = skrifa::FontRef::from_index(face.data(), face.face_index()).ok()?;
    let strikes = BitmapStrikes::new(&font_ref);
    if strikes.is_empty() {
        return None;
    }

    let gid = font_ref.charmap().map(base)?;
    let glyph = strikes.glyph_for_size(Size::new(font.size()), gid)?;

    match &glyph.data {
        BitmapData::Png(data) => decode_png(data),
        BitmapData::Bgra(data) => decode_bgra(data, glyph.width, glyph.height),
        BitmapData::Mask(_) => {
            // Monochrome strikes carry no color; let the cell stay blank
            log::debug!("emoji strike for {:?} is a mask, skipping", cluster);
            None
        }
    }
}

/// Composite a rasterized cluster into a square cell, preserving aspect
/// ratio and centering on both axes.
pub fn draw_in_cell(canvas: &mut Pixmap, glyph: &Pixmap, cell_x: f32, cell_y: f32, cell: f32) {
    let glyph_w = glyph.width() as f32;
    let glyph_h = glyph.height() as f32;
    if glyph_w <= 0.0 || glyph_h <= 0.0 {
        return;
    }

    let scale = (cell / glyph_w).min(cell / glyph_h);
    let dx = cell_x + (cell - glyph_w * scale) / 2.0;
    let dy = cell_y + (cell - glyph_h * scale) / 2.0;

    let paint = PixmapPaint {
        quality: tiny_skia::FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let transform = Transform::from_scale(scale, scale).post_translate(dx, dy);
    canvas.draw_pixmap(0, 0, glyph.as_ref(), &paint, transform, None);
}

fn decode_png(data: &[u8]) -> Option<Pixmap> {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder.read_info().ok()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).ok()?;
    let (width, height) = (info.width, info.height);

    let rgba = match info.color_type {
        png::ColorType::Rgba => premultiply_rgba(&buf[..info.buffer_size()]),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
            for chunk in buf[..info.buffer_size()].chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(255);
            }
            rgba
        }
        _ => return None,
    };

    Pixmap::from_vec(rgba, tiny_skia::IntSize::from_wh(width, height)?)
}

fn decode_bgra(data: &[u8], width: u32, height: u32) -> Option<Pixmap> {
    let expected = width as usize * height as usize * 4;
    if data.len() < expected {
        return None;
    }

    // CBDT color data is premultiplied BGRA; swizzle to RGBA
    let mut rgba = Vec::with_capacity(expected);
    for pixel in data[..expected].chunks_exact(4) {
        rgba.extend_from_slice(&[pixel[2], pixel[1], pixel[0], pixel[3]]);
    }

    Pixmap::from_vec(rgba, tiny_skia::IntSize::from_wh(width, height)?)
}

fn premultiply_rgba(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for pixel in out.chunks_exact_mut(4) {
        let alpha = pixel[3] as u16;
        if alpha < 255 {
            pixel[0] = ((pixel[0] as u16 * alpha) / 255) as u8;
            pixel[1] = ((pixel[1] as u16 * alpha) / 255) as u8;
            pixel[2] = ((pixel[2] as u16 * alpha) / 255) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::solid_canvas;
    use placard_core::Color;

    #[test]
    fn builtin_face_has_no_emoji_source() {
        // A catalog with dead override paths may fall back to the built-in
        // face for text roles; that face must never claim emoji coverage.
        let catalog = placard_fontdb::FontCatalog::new();
        let handle = catalog.resolve(placard_core::FontRole::Body, 40).unwrap();
        if handle.is_builtin() {
            assert!(rasterize_cluster(&handle, "\u{1F600}").is_none());
        }
    }

    #[test]
    fn cell_compositing_is_clipped_to_the_canvas() {
        let mut canvas = solid_canvas(50, 50, Color::white()).unwrap();
        let glyph = solid_canvas(16, 16, Color::black()).unwrap();
        // A cell partially off-canvas must not panic or distort
        draw_in_cell(&mut canvas, &glyph, 40.0, 40.0, 20.0);
        assert_eq!((canvas.width(), canvas.height()), (50, 50));
    }

    #[test]
    fn bgra_decode_swizzles_channels() {
        let data = [0u8, 0, 255, 255]; // one blue-channel-first pixel
        let pixmap = decode_bgra(&data, 1, 1).unwrap();
        assert_eq!(pixmap.data(), &[255, 0, 0, 255]); // red in RGBA
    }

    #[test]
    fn short_bgra_buffers_are_rejected() {
        assert!(decode_bgra(&[0, 0, 0], 1, 1).is_none());
    }
}
