//! The `batch` subcommand: many cards from a JSONL job file.
//!
//! One JSON object per line describes one card. Jobs are independent, so
//! they render in parallel over a rayon pool with a shared font catalog;
//! a failed job is reported and skipped rather than aborting the rest.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use rayon::prelude::*;
use serde::Deserialize;

use placard::{fontdb::FontCatalog, Compositor, RenderConfig};

use crate::cli::BatchArgs;
use crate::output::write_png;

/// One rendering job from the JSONL file
#[derive(Debug, Clone, Deserialize)]
pub struct BatchJob {
    pub text: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub font_size: Option<u32>,
    #[serde(default)]
    pub min_font_size: Option<u32>,
    #[serde(default)]
    pub background: Option<PathBuf>,
}

impl BatchJob {
    pub fn config(&self) -> anyhow::Result<RenderConfig> {
        let defaults = RenderConfig::default();
        let mut builder = RenderConfig::builder()
            .width(self.width.unwrap_or(defaults.width))
            .height(self.height.unwrap_or(defaults.height))
            .initial_font_size(self.font_size.unwrap_or(defaults.initial_font_size))
            .min_font_size(self.min_font_size.unwrap_or(defaults.min_font_size));

        if let Some(header) = &self.header {
            builder = builder.header(header.clone());
        }
        if let Some(footer) = &self.footer {
            builder = builder.footer(footer.clone());
        }
        if let Some(background) = &self.background {
            builder = builder.background_image_path(background);
        }

        builder.build().context("invalid job configuration")
    }

    fn output_name(&self, index: usize) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("card-{index:04}.png")))
    }
}

pub fn run(args: &BatchArgs) -> anyhow::Result<()> {
    let jobs = load_jobs(args)?;
    if jobs.is_empty() {
        log::warn!("{} contains no jobs", args.jobs.display());
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring the worker pool")?;
    }

    let catalog = Arc::new(FontCatalog::new());
    let total = jobs.len();

    let failures: Vec<String> = jobs
        .par_iter()
        .enumerate()
        .filter_map(|(index, job)| {
            render_job(args, &catalog, index, job)
                .err()
                .map(|err| format!("job {index}: {err:#}"))
        })
        .collect();

    for failure in &failures {
        log::error!("{failure}");
    }
    log::info!(
        "rendered {} of {} cards into {}",
        total - failures.len(),
        total,
        args.output_dir.display()
    );

    if failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} of {} jobs failed", failures.len(), total)
    }
}

fn render_job(
    args: &BatchArgs,
    catalog: &Arc<FontCatalog>,
    index: usize,
    job: &BatchJob,
) -> anyhow::Result<()> {
    let config = job.config()?;
    let compositor = Compositor::with_catalog(config, Arc::clone(catalog));

    let card = compositor.render(&job.text).context("rendering failed")?;
    if card.overflow() {
        log::warn!("job {index}: body text overflowed at the minimum font size");
    }

    let path = args.output_dir.join(job.output_name(index));
    write_png(&card.pixmap, &path)?;
    log::debug!("job {index} -> {}", path.display());
    Ok(())
}

fn load_jobs(args: &BatchArgs) -> anyhow::Result<Vec<BatchJob>> {
    let file = std::fs::File::open(&args.jobs)
        .with_context(|| format!("opening {}", args.jobs.display()))?;

    let mut jobs = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.context("reading job file")?;
        if line.trim().is_empty() {
            continue;
        }
        let job: BatchJob = serde_json::from_str(&line)
            .with_context(|| format!("parsing job on line {}", number + 1))?;
        jobs.push(job);
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jobs_parse_with_minimal_fields() {
        let job: BatchJob = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(job.text, "hello");
        assert!(job.header.is_none());

        let config = job.config().unwrap();
        assert_eq!((config.width, config.height), (700, 700));
    }

    #[test]
    fn job_overrides_flow_into_the_config() {
        let job: BatchJob = serde_json::from_str(
            r#"{"text": "hi", "header": "Brand", "width": 1080, "height": 1350, "font_size": 48}"#,
        )
        .unwrap();
        let config = job.config().unwrap();
        assert_eq!((config.width, config.height), (1080, 1350));
        assert_eq!(config.initial_font_size, 48);
        assert_eq!(config.header.as_deref(), Some("Brand"));
    }

    #[test]
    fn default_output_names_are_indexed() {
        let job: BatchJob = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(job.output_name(7), PathBuf::from("card-0007.png"));
    }

    #[test]
    fn invalid_job_configs_are_reported() {
        let job: BatchJob =
            serde_json::from_str(r#"{"text": "hi", "font_size": 10, "min_font_size": 30}"#)
                .unwrap();
        assert!(job.config().is_err());
    }
}
