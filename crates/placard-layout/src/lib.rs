//! Text layout for placard: measurement, wrapping, and size fitting.
//!
//! Three cooperating pieces, all metric-driven and rasterization-free:
//!
//! - [`TextMeasurer`] turns strings into advance widths and line heights
//! - [`wrap`] / [`wrap_block`] break paragraphs into display lines without
//!   ever splitting a word
//! - [`fit`] searches downward for the largest body size whose wrapped
//!   block fits the available vertical space

pub mod fit;
pub mod measure;
pub mod wrap;

pub use fit::{fit, FitResult, FONT_STEP};
pub use measure::TextMeasurer;
pub use wrap::{split_paragraphs, wrap, wrap_block};
