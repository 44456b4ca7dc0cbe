//! Placard CLI - render text cards from the command line

mod batch;
mod cli;
mod output;
mod render;

use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render::run(&args),
        Commands::Batch(args) => batch::run(&args),
    }
}
