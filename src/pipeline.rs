//! End-to-end deck generation.
//!
//! Wires the stages together: outline parsing, content enrichment, image
//! acquisition, `.pptx` packaging and optional PDF export. Only packaging
//! can fail; every collaborator failure upstream of it degrades to
//! placeholder content.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::ai::{
    MetricsSummary, OPENAI_API_BASE, SharedMetrics, SharedProvider, create_shared_metrics,
    resolve_provider,
};
use crate::config::Config;
use crate::constants::network::IMAGE_DOWNLOAD_TIMEOUT_SECS;
use crate::deck::{DeckArtifacts, DeckWriter, PdfExporter, Theme};
use crate::enrich::{
    ContentEnricher, EnrichmentOptions, ImageAcquirer, OpenAiImageSettings, OpenAiImageSource,
    SharedImageSource, SlideEnrichment,
};
use crate::outline::{InputShape, ParsedOutline, parse_outline};
use crate::types::{DeckError, Result, Slide};

/// Per-run switches resolved from configuration and CLI flags
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub speaker_notes: bool,
    /// Attach an image reference to slides (model image or placeholder URL)
    pub images: bool,
    pub export_pdf: bool,
    pub theme: Theme,
    pub output_dir: PathBuf,
    pub placeholder_base: String,
    pub call_timeout: Duration,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            speaker_notes: config.enrichment.speaker_notes,
            images: true,
            export_pdf: config.output.export_pdf,
            theme: config.theme(),
            output_dir: config.output.dir.clone(),
            placeholder_base: config.images.placeholder_base.clone(),
            call_timeout: config.call_timeout(),
        }
    }
}

/// Parsed and enriched slides, without any file output
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub shape: InputShape,
    pub slides: Vec<Slide>,
    pub enrichment: Vec<SlideEnrichment>,
    pub metrics: MetricsSummary,
}

/// Result of a full generation run
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub shape: InputShape,
    pub artifacts: DeckArtifacts,
    pub enrichment: Vec<SlideEnrichment>,
    pub metrics: MetricsSummary,
}

pub struct DeckPipeline {
    provider: Option<SharedProvider>,
    image_source: Option<SharedImageSource>,
    exporter: PdfExporter,
    settings: PipelineSettings,
}

impl DeckPipeline {
    pub fn new(
        provider: Option<SharedProvider>,
        image_source: Option<SharedImageSource>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            provider,
            image_source,
            exporter: PdfExporter::default(),
            settings,
        }
    }

    /// Build providers from configuration; missing keys mean offline mode
    pub fn from_config(config: &Config, settings: PipelineSettings) -> Result<Self> {
        let provider = resolve_provider(&config.llm)?;
        if let Some(provider) = &provider {
            info!(
                provider = provider.name(),
                model = provider.model(),
                "Text generation ready"
            );
        }
        let image_source = image_source_from_config(config)?;
        Ok(Self::new(provider, image_source, settings))
    }

    pub fn with_exporter(mut self, exporter: PdfExporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// Parse and enrich `text` without acquiring images or writing files
    #[instrument(skip_all, fields(chars = text.len()))]
    pub async fn preview(&self, text: &str) -> Preview {
        let metrics = new_metrics();
        let ParsedOutline { shape, mut slides } = parse_outline(text);
        let enrichment = self.enricher(metrics.clone()).enrich_slides(&mut slides).await;

        Preview {
            shape,
            slides,
            enrichment,
            metrics: metrics.summary(),
        }
    }

    /// Run every stage and write the deck under the output directory
    #[instrument(skip_all, fields(chars = text.len(), theme = %self.settings.theme))]
    pub async fn generate(&self, text: &str) -> Result<Generation> {
        let metrics = new_metrics();
        let ParsedOutline { shape, mut slides } = parse_outline(text);
        info!(%shape, slides = slides.len(), "Outline parsed");

        let mut enrichment = self.enricher(metrics.clone()).enrich_slides(&mut slides).await;

        if self.settings.images {
            ImageAcquirer::new(
                self.image_source.clone(),
                self.settings.placeholder_base.clone(),
                metrics.clone(),
            )
            .acquire_images(&mut slides, &mut enrichment)
            .await;
        }

        let slide_count = slides.len();
        let writer = DeckWriter::new(self.settings.theme);
        let output_dir = self.settings.output_dir.clone();
        let pptx_path = tokio::task::spawn_blocking(move || writer.save(&slides, &output_dir))
            .await
            .map_err(|e| DeckError::Package(format!("writer task failed: {}", e)))??;

        let pdf_path = if self.settings.export_pdf {
            self.exporter.export(&pptx_path).await
        } else {
            None
        };

        Ok(Generation {
            shape,
            artifacts: DeckArtifacts {
                pptx_path,
                pdf_path,
                slide_count,
            },
            enrichment,
            metrics: metrics.summary(),
        })
    }

    fn enricher(&self, metrics: SharedMetrics) -> ContentEnricher {
        ContentEnricher::new(
            self.provider.clone(),
            metrics,
            EnrichmentOptions {
                speaker_notes: self.settings.speaker_notes,
                call_timeout: self.settings.call_timeout,
            },
        )
    }
}

fn new_metrics() -> SharedMetrics {
    create_shared_metrics(format!("deck-{}", Local::now().format("%Y%m%d_%H%M%S")))
}

/// OpenAI image source when model images are enabled and a key is available
fn image_source_from_config(config: &Config) -> Result<Option<SharedImageSource>> {
    if !config.images.generate {
        return Ok(None);
    }

    let Some(api_key) = config.llm.resolved_api_key() else {
        warn!("Image generation enabled but no OpenAI API key found; using placeholder images");
        return Ok(None);
    };

    let settings = OpenAiImageSettings {
        api_base: config
            .images
            .api_base
            .clone()
            .unwrap_or_else(|| OPENAI_API_BASE.to_string()),
        model: config.images.model.clone(),
        size: config.images.size.clone(),
        timeout: Duration::from_secs(IMAGE_DOWNLOAD_TIMEOUT_SECS),
    };

    let source = OpenAiImageSource::new(api_key, settings, config.output.image_dir())?;
    Ok(Some(Arc::new(source)))
}
