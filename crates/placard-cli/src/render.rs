//! The `render` subcommand: one text in, one PNG out.

use std::io::Read;

use anyhow::Context;

use placard::{render_card, RenderConfig};

use crate::cli::RenderArgs;
use crate::output::write_png;

pub fn run(args: &RenderArgs) -> anyhow::Result<()> {
    let text = read_text(args)?;
    let config = build_config(args)?;

    let card = render_card(&text, config).context("rendering failed")?;
    if card.overflow() {
        log::warn!(
            "body text overflowed its band at the minimum font size; the card may look cramped"
        );
    }

    write_png(&card.pixmap, &args.output)?;
    log::info!(
        "wrote {} ({}x{}, body {}px)",
        args.output.display(),
        card.pixmap.width(),
        card.pixmap.height(),
        card.layout.font_size
    );
    Ok(())
}

pub fn build_config(args: &RenderArgs) -> anyhow::Result<RenderConfig> {
    let mut builder = RenderConfig::builder()
        .width(args.width)
        .height(args.height)
        .initial_font_size(args.font_size)
        .min_font_size(args.min_font_size)
        .line_spacing_factor(args.line_spacing)
        .emoji_cell_width_factor(args.emoji_cell_width);

    if let Some(header) = &args.header {
        builder = builder.header(header.clone());
    }
    if let Some(footer) = &args.footer {
        builder = builder.footer(footer.clone());
    }
    if let Some(background) = &args.background {
        builder = builder.background_image_path(background);
    }
    if let Some(font) = &args.body_font {
        builder = builder.body_font_path(font);
    }
    if let Some(font) = &args.header_font {
        builder = builder.header_font_path(font);
    }
    if let Some(font) = &args.emoji_font {
        builder = builder.emoji_font_path(font);
    }

    builder.build().context("invalid configuration")
}

fn read_text(args: &RenderArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.text_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("reading body text from stdin")?;
    Ok(text)
}
