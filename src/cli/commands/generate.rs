//! Generate Command
//!
//! Full pipeline: parse, enrich, acquire images, write the `.pptx` and
//! optionally convert it to PDF.

use std::path::PathBuf;

use tokio::runtime::Runtime;

use crate::cli::ui::Output;
use crate::cli::util::{LlmOverrides, load_config, read_input};
use crate::deck::Theme;
use crate::pipeline::{DeckPipeline, PipelineSettings};
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub text: Option<String>,
    pub input: Option<PathBuf>,
    pub no_notes: bool,
    pub no_images: bool,
    pub pdf: bool,
    pub theme: Option<String>,
    pub output: Option<PathBuf>,
    pub overrides: LlmOverrides,
    pub verbose: bool,
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let text = read_input(options.text, options.input.as_deref())?;
    let config = load_config(&options.overrides)?;

    let mut settings = PipelineSettings::from_config(&config);
    settings.speaker_notes &= !options.no_notes;
    settings.images = !options.no_images;
    settings.export_pdf |= options.pdf;
    if let Some(theme) = &options.theme {
        settings.theme = theme.parse::<Theme>()?;
    }
    if let Some(dir) = options.output {
        settings.output_dir = dir;
    }

    let pipeline = DeckPipeline::from_config(&config, settings)?;
    let output = Output::new();
    if pipeline.is_offline() {
        output.warning("No text-generation provider available; slides use placeholder content");
    }

    let rt = Runtime::new()?;
    let generation = rt.block_on(pipeline.generate(&text))?;
    let artifacts = &generation.artifacts;

    output.success(&format!(
        "Generated {} slides ({})",
        artifacts.slide_count, generation.shape
    ));
    output.key_value("Presentation", &artifacts.pptx_path.display().to_string());
    match &artifacts.pdf_path {
        Some(pdf) => output.key_value("PDF", &pdf.display().to_string()),
        None if pipeline.settings().export_pdf => {
            output.warning("PDF conversion failed; see the log for details")
        }
        None => {}
    }

    let fallbacks = generation.metrics.total_fallbacks();
    if fallbacks > 0 && !pipeline.is_offline() {
        output.info(&format!("{} fields used placeholder content", fallbacks));
    }

    if options.verbose {
        output.section("Metrics");
        println!("{}", generation.metrics.display());
    }
    Ok(())
}
