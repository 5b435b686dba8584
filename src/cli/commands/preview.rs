//! Preview Command
//!
//! Parse and enrich input, then print the slides without writing any file.

use std::path::PathBuf;

use clap::ValueEnum;
use tokio::runtime::Runtime;

use crate::cli::ui::Output;
use crate::cli::util::{LlmOverrides, load_config, read_input};
use crate::pipeline::{DeckPipeline, PipelineSettings, Preview};
use crate::types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PreviewFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    pub text: Option<String>,
    pub input: Option<PathBuf>,
    pub no_notes: bool,
    pub format: PreviewFormat,
    pub overrides: LlmOverrides,
    pub verbose: bool,
}

pub fn run(options: PreviewOptions) -> Result<()> {
    let text = read_input(options.text, options.input.as_deref())?;
    let config = load_config(&options.overrides)?;

    let mut settings = PipelineSettings::from_config(&config);
    settings.speaker_notes &= !options.no_notes;
    settings.images = false;

    let pipeline = DeckPipeline::from_config(&config, settings)?;
    let rt = Runtime::new()?;
    let preview = rt.block_on(pipeline.preview(&text));

    match options.format {
        PreviewFormat::Json => println!("{}", serde_json::to_string_pretty(&preview)?),
        PreviewFormat::Yaml => print!("{}", serde_yaml::to_string(&preview)?),
        PreviewFormat::Text => print_text(&preview, options.verbose),
    }
    Ok(())
}

fn print_text(preview: &Preview, verbose: bool) {
    let output = Output::new();
    output.header(&format!(
        "{} slides ({})",
        preview.slides.len(),
        preview.shape
    ));
    for (index, slide) in preview.slides.iter().enumerate() {
        output.slide(index + 1, slide, preview.enrichment.get(index));
    }

    if verbose {
        output.section("Metrics");
        println!("{}", preview.metrics.display());
    }
}
