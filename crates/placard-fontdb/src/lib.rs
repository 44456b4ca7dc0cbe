//! Where fonts come to life: loading and the role catalog for placard
//!
//! Fonts are resolved by role (header, body, emoji) plus pixel size through
//! [`FontCatalog`], which walks a fixed fallback chain and caches every
//! resolved handle for the process lifetime. The terminal fallback for text
//! roles is a built-in bitmap face, so rendering text can only fail when the
//! chain itself is broken.
//!
//! ## Memory Management
//!
//! Faces store their raw data and create `FontRef` on-demand for parsing.
//! This avoids memory leaks from `Box::leak` and properly supports TTC
//! font collections with multiple faces.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::instance::{LocationRef, Size};
use skrifa::MetadataProvider;

use placard_core::error::FontLoadError;

pub mod builtin;
pub mod catalog;

pub use builtin::BuiltinFont;
pub use catalog::{Face, FontCatalog, FontHandle, MIN_RESOLVABLE_SIZE};

/// A font that's been brought into memory, ready to measure and rasterize.
///
/// Stores the raw font data and creates `FontRef` on-demand for parsing.
/// For TTC collections, the `face_index` specifies which face to use.
#[derive(Debug)]
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
}

impl Font {
    /// Opens a font file from disk and makes it usable
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontLoadError> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self, FontLoadError> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;

        Self::from_data_index(data, face_index)
            .map_err(|_| FontLoadError::InvalidData(path.as_ref().display().to_string()))
    }

    /// Turns raw font bytes into something we can work with
    pub fn from_data(data: Vec<u8>) -> Result<Self, FontLoadError> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self, FontLoadError> {
        // Validate the font data by attempting to parse it
        let font_ref = ReadFontRef::from_index(&data, face_index)
            .map_err(|_| FontLoadError::InvalidData("<memory>".into()))?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        Ok(Font {
            data,
            face_index,
            units_per_em,
        })
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// The raw font bytes, for rasterization stages
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Creates a FontRef on-demand for parsing operations
    pub(crate) fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.charmap().map(ch).map(|gid| gid.to_u32()))
    }

    /// Advance width of a single character at the given pixel size.
    ///
    /// Unmapped characters fall back to half an em so measurement stays
    /// usable even when the face misses a glyph.
    pub fn char_advance(&self, ch: char, size: f32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let gid = font.charmap().map(ch)?;
                font.glyph_metrics(Size::new(size), LocationRef::default())
                    .advance_width(gid)
            })
            .unwrap_or(size * 0.5)
    }

    /// Scaled ascent and descent (descent is negative, per font convention)
    pub fn line_metrics(&self, size: f32) -> (f32, f32) {
        self.font_ref()
            .map(|font| {
                let metrics = font.metrics(Size::new(size), LocationRef::default());
                (metrics.ascent, metrics.descent)
            })
            .unwrap_or((size * 0.8, size * -0.2))
    }

    /// Whether the face carries color bitmap strikes (sbix, CBDT/CBLC)
    pub fn has_color_bitmaps(&self) -> bool {
        self.font_ref()
            .map(|font| !skrifa::bitmap::BitmapStrikes::new(&font).is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_data_is_rejected() {
        let result = Font::from_data(vec![0; 100]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = Font::from_file("/nonexistent/face.ttf").unwrap_err();
        assert!(matches!(err, FontLoadError::FileNotFound(_)));
    }
}
