//! Rasterization and composition for placard.
//!
//! Everything that touches pixels lives here: the cover-fit background
//! resolver, outline and built-in text rasterization, color emoji strike
//! decoding, the two-pass centered line renderer, and the [`Compositor`]
//! that stitches a card together.

pub mod background;
pub mod compose;
pub mod emoji;
pub mod glyph;
pub mod line;

pub use background::{solid_canvas, BackgroundResolver};
pub use compose::{Compositor, RenderedCard};
