//! Role-based font resolution with a fixed fallback chain.
//!
//! `resolve(role, size)` walks: configured override path, then the role's
//! default candidates, then generic system sans-serif locations, and for
//! text roles finally the built-in bitmap face. The first face that parses
//! wins and is cached for the process lifetime under its (path, size) key.
//! The cache is concurrency-safe: lock-free reads, and the entry API keeps
//! populate-on-miss to a single loader per key.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use placard_core::error::FontLoadError;
use placard_core::{FontRole, RenderConfig};

use crate::builtin::BuiltinFont;
use crate::Font;

/// Sizes below this render unreadably and make metrics unstable; requests
/// are clamped up to it.
pub const MIN_RESOLVABLE_SIZE: f32 = 24.0;

const SANS_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
];

const EMOJI_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
    "/System/Library/Fonts/Apple Color Emoji.ttc",
    "/System/Library/Fonts/AppleColorEmoji.ttf",
];

/// The face behind a handle
#[derive(Clone)]
pub enum Face {
    Outline(Arc<Font>),
    Builtin(BuiltinFont),
}

/// A resolved font resource at a fixed pixel size.
///
/// Handles are shared read-only across renders; the catalog owns them for
/// the process lifetime.
pub struct FontHandle {
    face: Face,
    size: f32,
    source: Option<PathBuf>,
}

impl FontHandle {
    pub fn face(&self) -> &Face {
        &self.face
    }

    /// Pixel size the handle was resolved at (post clamping)
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Path of the resource that produced this handle, absent for the
    /// built-in face
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin(_))
    }

    /// The outline face, when this handle is not the built-in fallback
    pub fn outline(&self) -> Option<&Arc<Font>> {
        match &self.face {
            Face::Outline(font) => Some(font),
            Face::Builtin(_) => None,
        }
    }

    /// Advance width of one character at this handle's size
    pub fn char_advance(&self, ch: char) -> f32 {
        match &self.face {
            Face::Outline(font) => font.char_advance(ch, self.size),
            Face::Builtin(_) => BuiltinFont::advance(self.size),
        }
    }

    /// Scaled ascent (positive) and descent (negative)
    pub fn line_metrics(&self) -> (f32, f32) {
        match &self.face {
            Face::Outline(font) => font.line_metrics(self.size),
            Face::Builtin(_) => (
                BuiltinFont::ascent(self.size),
                BuiltinFont::descent(self.size),
            ),
        }
    }

    /// Bounding height of a line of this face: ascent minus descent
    pub fn line_height(&self) -> f32 {
        let (ascent, descent) = self.line_metrics();
        ascent - descent
    }

    /// Whether the face can produce color emoji bitmaps
    pub fn has_color_bitmaps(&self) -> bool {
        match &self.face {
            Face::Outline(font) => font.has_color_bitmaps(),
            Face::Builtin(_) => false,
        }
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct HandleKey {
    path: String,
    size_bits: u32,
}

impl HandleKey {
    fn new(path: &str, size: f32) -> Self {
        Self {
            path: path.to_string(),
            size_bits: size.to_bits(),
        }
    }
}

/// Process-lifetime font catalog.
///
/// Safe to call from many threads; repeated identical requests are
/// idempotent and return the same shared handle.
pub struct FontCatalog {
    body_override: Option<PathBuf>,
    header_override: Option<PathBuf>,
    emoji_override: Option<PathBuf>,
    /// Parsed faces keyed by path, shared across sizes
    faces: DashMap<String, Arc<Font>>,
    /// Resolved handles keyed by (path, size)
    handles: DashMap<HandleKey, Arc<FontHandle>>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self {
            body_override: None,
            header_override: None,
            emoji_override: None,
            faces: DashMap::new(),
            handles: DashMap::new(),
        }
    }

    /// Catalog with the per-role preferred paths from a render config
    pub fn with_config(config: &RenderConfig) -> Self {
        let mut catalog = Self::new();
        catalog.body_override = config.body_font_path.clone();
        catalog.header_override = config.header_font_path.clone();
        catalog.emoji_override = config.emoji_font_path.clone();
        catalog
    }

    /// Resolve a role at a pixel size, walking the fallback chain.
    ///
    /// Text roles (header, body) cannot fail short of the chain itself being
    /// unbuildable: the built-in face terminates them. The emoji role has no
    /// built-in terminal and reports `ChainExhausted` when nothing loads;
    /// callers treat that as "no emoji source" rather than a fatal error.
    pub fn resolve(&self, role: FontRole, size: u32) -> Result<Arc<FontHandle>, FontLoadError> {
        let size = (size as f32).max(MIN_RESOLVABLE_SIZE);

        for path in self.candidates(role) {
            let key = HandleKey::new(&path.display().to_string(), size);
            if let Some(handle) = self.handles.get(&key) {
                return Ok(Arc::clone(handle.value()));
            }

            let loaded = self
                .handles
                .entry(key)
                .or_try_insert_with(|| -> Result<Arc<FontHandle>, FontLoadError> {
                    let face = self.load_face(&path)?;
                    log::debug!(
                        "loaded {:?} font {} at {}px",
                        role,
                        path.display(),
                        size
                    );
                    Ok(Arc::new(FontHandle {
                        face: Face::Outline(face),
                        size,
                        source: Some(path.clone()),
                    }))
                });

            match loaded {
                Ok(handle) => return Ok(Arc::clone(&handle)),
                Err(err) => {
                    log::debug!("font candidate {} skipped: {}", path.display(), err);
                }
            }
        }

        if role == FontRole::Emoji {
            return Err(FontLoadError::ChainExhausted(FontRole::Emoji));
        }

        let key = HandleKey::new("builtin", size);
        let handle = self
            .handles
            .entry(key)
            .or_insert_with(|| {
                log::warn!(
                    "no {:?} font file usable, falling back to the built-in bitmap face",
                    role
                );
                Arc::new(FontHandle {
                    face: Face::Builtin(BuiltinFont),
                    size,
                    source: None,
                })
            })
            .clone();
        Ok(handle)
    }

    /// Number of cached handles, for diagnostics
    pub fn cached_handles(&self) -> usize {
        self.handles.len()
    }

    fn candidates(&self, role: FontRole) -> Vec<PathBuf> {
        let (override_path, defaults) = match role {
            FontRole::Body => (&self.body_override, SANS_CANDIDATES),
            FontRole::Header => (&self.header_override, SANS_CANDIDATES),
            FontRole::Emoji => (&self.emoji_override, EMOJI_CANDIDATES),
        };

        let mut paths = Vec::with_capacity(defaults.len() + 1);
        if let Some(path) = override_path {
            paths.push(path.clone());
        }
        paths.extend(defaults.iter().map(PathBuf::from));
        paths
    }

    fn load_face(&self, path: &Path) -> Result<Arc<Font>, FontLoadError> {
        let cache_key = path.display().to_string();
        if let Some(face) = self.faces.get(&cache_key) {
            return Ok(Arc::clone(face.value()));
        }

        let face = self
            .faces
            .entry(cache_key)
            .or_try_insert_with(|| Font::from_file(path).map(Arc::new))?;
        Ok(Arc::clone(&face))
    }

    #[cfg(test)]
    fn without_system_candidates() -> Self {
        // Point every override at a path that cannot exist so resolution is
        // deterministic on hosts that do have system fonts installed.
        let mut catalog = Self::new();
        catalog.body_override = Some(PathBuf::from("/nonexistent/body.ttf"));
        catalog.header_override = Some(PathBuf::from("/nonexistent/header.ttf"));
        catalog.emoji_override = Some(PathBuf::from("/nonexistent/emoji.ttf"));
        catalog
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::new()
    }
}
