//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Placard - render text cards from the command line
#[derive(Parser, Debug)]
#[command(name = "placard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one card to a PNG file
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Render many cards from a JSONL job file
    Batch(BatchArgs),
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Body text to render (reads from stdin if omitted)
    pub text: Option<String>,

    /// Read body text from a file instead
    #[arg(short = 'T', long = "text-file", conflicts_with = "text")]
    pub text_file: Option<PathBuf>,

    /// Output PNG path
    #[arg(short = 'o', long = "output", default_value = "card.png")]
    pub output: PathBuf,

    /// Canvas width in pixels
    #[arg(short = 'W', long = "width", default_value_t = 700)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(short = 'H', long = "height", default_value_t = 700)]
    pub height: u32,

    /// Caption drawn in the top margin band
    #[arg(long = "header")]
    pub header: Option<String>,

    /// Caption drawn in the bottom margin band
    #[arg(long = "footer")]
    pub footer: Option<String>,

    /// Background image, cover-fitted to the canvas
    #[arg(short = 'b', long = "background")]
    pub background: Option<PathBuf>,

    /// Starting body font size in pixels
    #[arg(short = 's', long = "font-size", default_value_t = 40)]
    pub font_size: u32,

    /// Smallest body font size the fitter may commit
    #[arg(long = "min-font-size", default_value_t = 24)]
    pub min_font_size: u32,

    /// Line advance as a multiple of the font size
    #[arg(long = "line-spacing", default_value_t = 1.3)]
    pub line_spacing: f32,

    /// Emoji cell width as a multiple of the font size
    #[arg(long = "emoji-cell-width", default_value_t = 1.2)]
    pub emoji_cell_width: f32,

    /// Preferred body font file (.ttf, .otf, .ttc)
    #[arg(long = "body-font")]
    pub body_font: Option<PathBuf>,

    /// Preferred header/footer font file
    #[arg(long = "header-font")]
    pub header_font: Option<PathBuf>,

    /// Preferred color emoji font file
    #[arg(long = "emoji-font")]
    pub emoji_font: Option<PathBuf>,
}

/// Arguments for the batch command
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// JSONL job file: one JSON object per line
    pub jobs: PathBuf,

    /// Directory for output files
    #[arg(short = 'O', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Worker threads (defaults to one per CPU core)
    #[arg(short = 'j', long = "threads")]
    pub threads: Option<usize>,
}
