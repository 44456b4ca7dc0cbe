//! Background resolution: cover-fit images or a solid-color canvas.
//!
//! A background can always be produced. Missing or corrupt files degrade to
//! the configured solid color with a warning; only canvas allocation itself
//! can fail. Successful loads are cached by (path, width, height) and shared
//! immutably, so callers must copy before compositing over them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use tiny_skia::Pixmap;

use placard_core::error::{BackgroundError, RenderError};
use placard_core::Color;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct BackgroundKey {
    path: PathBuf,
    width: u32,
    height: u32,
}

/// Resolves the base canvas for a render, with a process-lifetime cache of
/// cover-fitted bitmaps.
pub struct BackgroundResolver {
    cache: moka::sync::Cache<BackgroundKey, Arc<Pixmap>>,
}

impl BackgroundResolver {
    pub fn new() -> Self {
        Self {
            cache: moka::sync::Cache::new(32),
        }
    }

    /// Produce a canvas of exactly `width`x`height`.
    ///
    /// With a usable image at `path` the result is its cover-fit; otherwise
    /// it is a solid `fallback`-colored canvas. Identical (path, width,
    /// height) requests share one cached bitmap; `get_with` keeps concurrent
    /// misses to a single load.
    pub fn resolve(
        &self,
        path: Option<&Path>,
        width: u32,
        height: u32,
        fallback: Color,
    ) -> Result<Arc<Pixmap>, RenderError> {
        let Some(path) = path else {
            return Ok(Arc::new(solid_canvas(width, height, fallback)?));
        };

        let key = BackgroundKey {
            path: path.to_path_buf(),
            width,
            height,
        };

        let loaded: Result<Arc<Pixmap>, Arc<BackgroundError>> =
            self.cache.try_get_with(key, || {
                load_cover_fit(path, width, height).map(Arc::new)
            });

        match loaded {
            Ok(pixmap) => Ok(pixmap),
            Err(err) => {
                log::warn!(
                    "background {} unusable ({}); using a solid canvas",
                    path.display(),
                    err
                );
                Ok(Arc::new(solid_canvas(width, height, fallback)?))
            }
        }
    }
}

impl Default for BackgroundResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocate a single-color canvas
pub fn solid_canvas(width: u32, height: u32, color: Color) -> Result<Pixmap, RenderError> {
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;
    pixmap.fill(tiny_skia::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    Ok(pixmap)
}

/// Load an image and cover-fit it to the target rectangle.
///
/// The crop happens in source space before resampling, which yields the
/// same mapping as scale-then-crop while keeping the intermediate bounded
/// for degenerate aspect ratios (1xN strips would otherwise scale to
/// enormous intermediates).
fn load_cover_fit(path: &Path, width: u32, height: u32) -> Result<Pixmap, BackgroundError> {
    let img = image::open(path).map_err(|err| match err {
        image::ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            BackgroundError::FileNotFound(path.display().to_string())
        }
        other => BackgroundError::Decode {
            path: path.display().to_string(),
            reason: other.to_string(),
        },
    })?;

    let src_w = img.width().max(1);
    let src_h = img.height().max(1);
    let src_ratio = src_w as f32 / src_h as f32;
    let target_ratio = width as f32 / height as f32;

    let cropped = if src_ratio > target_ratio {
        // Source is relatively wider: keep full height, trim side bands
        let crop_w = ((src_h as f32 * target_ratio).round() as u32).clamp(1, src_w);
        let left = (src_w - crop_w) / 2;
        img.crop_imm(left, 0, crop_w, src_h)
    } else {
        // Source is relatively taller: keep full width, trim top and bottom
        let crop_h = ((src_w as f32 / target_ratio).round() as u32).clamp(1, src_h);
        let top = (src_h - crop_h) / 2;
        img.crop_imm(0, top, src_w, crop_h)
    };

    let resized = cropped.resize_exact(width, height, FilterType::Triangle);
    pixmap_from_rgba(resized.to_rgba8().into_raw(), width, height).ok_or_else(|| {
        BackgroundError::Decode {
            path: path.display().to_string(),
            reason: "pixel buffer did not match its dimensions".into(),
        }
    })
}

/// Straight-alpha RGBA bytes into a premultiplied pixmap
fn pixmap_from_rgba(mut rgba: Vec<u8>, width: u32, height: u32) -> Option<Pixmap> {
    for pixel in rgba.chunks_exact_mut(4) {
        let alpha = pixel[3] as u16;
        if alpha < 255 {
            pixel[0] = ((pixel[0] as u16 * alpha) / 255) as u8;
            pixel[1] = ((pixel[1] as u16 * alpha) / 255) as u8;
            pixel[2] = ((pixel[2] as u16 * alpha) / 255) as u8;
        }
    }
    Pixmap::from_vec(rgba, tiny_skia::IntSize::from_wh(width, height)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static UNIQUE: AtomicU32 = AtomicU32::new(0);

    fn temp_image(width: u32, height: u32) -> PathBuf {
        let n = UNIQUE.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "placard-bg-{}-{}-{}x{}.png",
            std::process::id(),
            n,
            width,
            height
        ));
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 120, 200, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn missing_path_yields_solid_canvas_of_exact_size() {
        let resolver = BackgroundResolver::new();
        let canvas = resolver
            .resolve(
                Some(Path::new("/nonexistent/background.png")),
                700,
                700,
                Color::rgb(248, 248, 248),
            )
            .unwrap();
        assert_eq!((canvas.width(), canvas.height()), (700, 700));
    }

    #[test]
    fn no_path_yields_solid_canvas() {
        let resolver = BackgroundResolver::new();
        let canvas = resolver.resolve(None, 300, 500, Color::white()).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (300, 500));
        // Solid white everywhere, fully opaque
        assert!(canvas.data().chunks_exact(4).all(|px| px == [255; 4]));
    }

    #[test]
    fn wide_source_is_cover_fitted() {
        let path = temp_image(400, 100);
        let resolver = BackgroundResolver::new();
        let canvas = resolver
            .resolve(Some(&path), 200, 200, Color::white())
            .unwrap();
        assert_eq!((canvas.width(), canvas.height()), (200, 200));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn tall_source_is_cover_fitted() {
        let path = temp_image(100, 400);
        let resolver = BackgroundResolver::new();
        let canvas = resolver
            .resolve(Some(&path), 200, 200, Color::white())
            .unwrap();
        assert_eq!((canvas.width(), canvas.height()), (200, 200));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn degenerate_strips_still_fill_the_target() {
        for (w, h) in [(1, 300), (300, 1), (1, 1)] {
            let path = temp_image(w, h);
            let resolver = BackgroundResolver::new();
            let canvas = resolver
                .resolve(Some(&path), 128, 256, Color::white())
                .unwrap();
            assert_eq!((canvas.width(), canvas.height()), (128, 256));
            std::fs::remove_file(path).ok();
        }
    }

    #[test]
    fn identical_requests_share_one_bitmap() {
        let path = temp_image(64, 64);
        let resolver = BackgroundResolver::new();
        let first = resolver
            .resolve(Some(&path), 32, 32, Color::white())
            .unwrap();
        let second = resolver
            .resolve(Some(&path), 32, 32, Color::white())
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        std::fs::remove_file(path).ok();
    }
}
