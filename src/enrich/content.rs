//! Content Enricher
//!
//! Fills bullets, speaker notes and image prompts for each slide with one
//! generation call per field. Slides are processed sequentially in
//! presentation order. Each call runs under a per-call timeout, and every
//! failure is classified, logged and replaced with placeholder content for
//! that field only.

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::outcome::{Generated, SlideEnrichment};
use super::placeholder;
use crate::ai::{EnrichmentField, SharedMetrics, SharedProvider, SlidePrompts, with_timeout};
use crate::constants::enrichment::{
    BULLETS_MAX_TOKENS, IMAGE_PROMPT_CONTEXT_BULLETS, IMAGE_PROMPT_MAX_TOKENS, MAX_BULLETS,
    NOTES_MAX_TOKENS,
};
use crate::outline::markers::strip_marker;
use crate::types::{
    ErrorCategory, ErrorClassifier, LlmError, Slide, json_string, json_string_array,
};

/// Enrichment behaviour switches
#[derive(Debug, Clone)]
pub struct EnrichmentOptions {
    /// Generate speaker notes
    pub speaker_notes: bool,
    /// Timeout applied to each generation call
    pub call_timeout: Duration,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            speaker_notes: true,
            call_timeout: Duration::from_secs(crate::constants::network::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Slide content enricher; `provider == None` is offline mode.
pub struct ContentEnricher {
    provider: Option<SharedProvider>,
    metrics: SharedMetrics,
    options: EnrichmentOptions,
}

impl ContentEnricher {
    pub fn new(
        provider: Option<SharedProvider>,
        metrics: SharedMetrics,
        options: EnrichmentOptions,
    ) -> Self {
        Self {
            provider,
            metrics,
            options,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// Enrich every slide in place, returning one record per slide.
    #[instrument(skip_all, fields(slides = slides.len(), offline = self.is_offline()))]
    pub async fn enrich_slides(&self, slides: &mut [Slide]) -> Vec<SlideEnrichment> {
        if self.is_offline() {
            info!("Offline mode: all slide content will use placeholders");
        }

        let mut records = Vec::with_capacity(slides.len());
        for slide in slides.iter_mut() {
            records.push(self.enrich_slide(slide).await);
        }

        let summary = self.metrics.summary();
        info!(
            model_calls = summary.model_calls,
            fallbacks = summary.total_fallbacks(),
            tokens = summary.total_tokens,
            "Enrichment complete"
        );

        records
    }

    /// Enrich one slide in place.
    #[instrument(skip_all, fields(title = %slide.title))]
    pub async fn enrich_slide(&self, slide: &mut Slide) -> SlideEnrichment {
        let bullets = self.generate_bullets(&slide.title, &slide.bullets).await;
        let bullets_source = bullets.source();
        slide.bullets = bullets.into_value();

        let notes_source = if self.options.speaker_notes {
            let notes = self.generate_notes(&slide.title, &slide.bullets).await;
            let source = notes.source();
            slide.speaker_notes = Some(notes.into_value());
            Some(source)
        } else {
            slide.speaker_notes = None;
            None
        };

        let prompt = self.generate_image_prompt(&slide.title, &slide.bullets).await;
        let prompt_source = prompt.source();
        slide.image_prompt = Some(prompt.into_value());

        SlideEnrichment {
            title: slide.title.clone(),
            bullets: bullets_source,
            speaker_notes: notes_source,
            image_prompt: prompt_source,
            image: None,
        }
    }

    // =========================================================================
    // Per-field generation
    // =========================================================================

    async fn generate_bullets(&self, title: &str, existing: &[String]) -> Generated<Vec<String>> {
        let (prompt, schema) = SlidePrompts::bullets(title, existing);
        let result = self
            .call(EnrichmentField::Bullets, title, &prompt, &schema, BULLETS_MAX_TOKENS)
            .await
            .and_then(|content| parse_bullets(&content));

        self.settle(EnrichmentField::Bullets, title, result, || {
            placeholder::bullets_or_existing(title, existing)
        })
    }

    async fn generate_notes(&self, title: &str, bullets: &[String]) -> Generated<String> {
        let (prompt, schema) = SlidePrompts::speaker_notes(title, bullets);
        let result = self
            .call(EnrichmentField::SpeakerNotes, title, &prompt, &schema, NOTES_MAX_TOKENS)
            .await
            .and_then(|content| parse_text(&content, "speaker_notes"));

        self.settle(EnrichmentField::SpeakerNotes, title, result, || {
            placeholder::speaker_notes(title)
        })
    }

    async fn generate_image_prompt(&self, title: &str, bullets: &[String]) -> Generated<String> {
        let context = &bullets[..bullets.len().min(IMAGE_PROMPT_CONTEXT_BULLETS)];
        let (prompt, schema) = SlidePrompts::image_prompt(title, context);
        let result = self
            .call(EnrichmentField::ImagePrompt, title, &prompt, &schema, IMAGE_PROMPT_MAX_TOKENS)
            .await
            .and_then(|content| parse_text(&content, "image_prompt"));

        self.settle(EnrichmentField::ImagePrompt, title, result, || {
            placeholder::image_prompt(title)
        })
    }

    /// One generation call under the per-call timeout, failures classified
    async fn call(
        &self,
        field: EnrichmentField,
        title: &str,
        prompt: &str,
        schema: &Value,
        max_tokens: usize,
    ) -> Result<Value, LlmError> {
        let Some(provider) = &self.provider else {
            return Err(LlmError::offline());
        };

        let operation = format!("{} for '{}'", field, title);
        let response = with_timeout(
            self.options.call_timeout,
            provider.generate_limited(prompt, schema, max_tokens),
            &operation,
        )
        .await
        .map_err(|e| ErrorClassifier::classify_deck_error(&e, provider.name()))?;

        self.metrics.record_response(&response);
        Ok(response.content)
    }

    /// Wrap a call result, recording and logging any fallback
    fn settle<T>(
        &self,
        field: EnrichmentField,
        title: &str,
        result: Result<T, LlmError>,
        fallback: impl FnOnce() -> T,
    ) -> Generated<T> {
        let generated = Generated::from_result(result, fallback);

        if let Some(reason) = generated.reason() {
            self.metrics.record_fallback(field);
            if self.is_offline() {
                debug!(%field, title, "Using placeholder (offline)");
            } else {
                warn!(%field, title, error = %reason, "Generation failed, using placeholder");
            }
        }

        generated
    }
}

// =============================================================================
// Response parsing
// =============================================================================

/// Non-empty list of at most `MAX_BULLETS` cleaned bullets
fn parse_bullets(content: &Value) -> Result<Vec<String>, LlmError> {
    let bullets: Vec<String> = json_string_array(content, "bullets")
        .iter()
        .map(|b| strip_marker(b.trim()))
        .filter(|b| !b.is_empty())
        .take(MAX_BULLETS)
        .map(String::from)
        .collect();

    if bullets.is_empty() {
        return Err(LlmError::new(
            ErrorCategory::ParseError,
            "response contained no bullets",
        ));
    }
    Ok(bullets)
}

/// Non-blank trimmed string field
fn parse_text(content: &Value, key: &str) -> Result<String, LlmError> {
    json_string(content, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            LlmError::new(
                ErrorCategory::ParseError,
                format!("response missing field '{}'", key),
            )
        })
}
