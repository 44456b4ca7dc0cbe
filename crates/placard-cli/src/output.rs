//! PNG output using the `image` crate.

use std::path::Path;

use anyhow::Context;
use tiny_skia::Pixmap;

/// Encode a pixmap to PNG bytes.
///
/// Pixmap data is premultiplied RGBA; PNG wants straight alpha, so each
/// pixel is demultiplied on the way out.
pub fn encode_png(pixmap: &Pixmap) -> anyhow::Result<Vec<u8>> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let img: image::RgbaImage =
        image::ImageBuffer::from_raw(pixmap.width(), pixmap.height(), rgba)
            .context("pixel buffer did not match canvas dimensions")?;

    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .context("PNG encoding failed")?;
    Ok(bytes)
}

/// Encode and write a pixmap to disk
pub fn write_png(pixmap: &Pixmap, path: &Path) -> anyhow::Result<()> {
    let bytes = encode_png(pixmap)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
