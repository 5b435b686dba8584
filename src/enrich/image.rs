//! Image Acquisition
//!
//! Turns each slide's image prompt into an image reference. With a model
//! source configured, the prompt is sent to an image generation endpoint and
//! the result downloaded under `<output>/images/`. Otherwise, or on any
//! failure, the slide gets a placeholder image URL. Acquisition never fails.

use async_trait::async_trait;
use chrono::Local;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::outcome::{Generated, SlideEnrichment};
use super::placeholder;
use crate::ai::{EnrichmentField, SharedMetrics, with_timeout};
use crate::constants::images::{FILENAME_HASH_CHARS, MAX_FILENAME_TITLE_CHARS};
use crate::constants::network::IMAGE_DOWNLOAD_TIMEOUT_SECS;
use crate::types::{
    DeckError, ErrorCategory, ErrorClassifier, LlmError, Result, Slide, short_hash,
    truncate_chars,
};

/// Source of generated slide images
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Produce an image for `prompt`, returning its local path.
    ///
    /// `key` is unique per image across runs and keeps files from colliding.
    async fn fetch(&self, prompt: &str, title: &str, key: &str) -> Result<PathBuf>;

    /// Source name for logging
    fn name(&self) -> &str;
}

pub type SharedImageSource = Arc<dyn ImageSource>;

/// Prompt wrapper that steers the model toward slide-friendly icons
pub fn enhance_prompt(prompt: &str) -> String {
    format!(
        "Simple, professional, minimalist icon or illustration: {}. Clean design, no text, suitable for presentation slide.",
        prompt
    )
}

/// `<safe title>_<hash>.png`, where the safe title keeps alphanumerics,
/// spaces, `-` and `_`, with spaces replaced by underscores. The hash covers
/// both `title` and `key`.
pub fn image_filename(title: &str, key: &str) -> String {
    let safe: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    format!(
        "{}_{}.png",
        truncate_chars(&safe, MAX_FILENAME_TITLE_CHARS),
        short_hash(&format!("{}|{}", title, key), FILENAME_HASH_CHARS)
    )
}

// =============================================================================
// OpenAI Images
// =============================================================================

/// Image settings for [`OpenAiImageSource`]
#[derive(Debug, Clone)]
pub struct OpenAiImageSettings {
    pub api_base: String,
    pub model: String,
    pub size: String,
    pub timeout: Duration,
}

/// OpenAI images endpoint with download to a local directory
pub struct OpenAiImageSource {
    api_key: SecretString,
    settings: OpenAiImageSettings,
    image_dir: PathBuf,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiImageSource")
            .field("api_key", &"[REDACTED]")
            .field("settings", &self.settings)
            .field("image_dir", &self.image_dir)
            .finish()
    }
}

impl OpenAiImageSource {
    pub fn new(
        api_key: String,
        settings: OpenAiImageSettings,
        image_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| DeckError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            settings: OpenAiImageSettings {
                api_base: settings.api_base.trim_end_matches('/').to_string(),
                ..settings
            },
            image_dir: image_dir.into(),
            client,
        })
    }

    async fn request_image_url(&self, prompt: &str) -> Result<String> {
        let request = ImageRequest {
            model: self.settings.model.clone(),
            prompt: enhance_prompt(prompt),
            size: self.settings.size.clone(),
            quality: "standard".to_string(),
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.settings.api_base))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| DeckError::LlmApi(format!("Image request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Image API error ({}): {}", status, body),
                self.name(),
            )
            .into());
        }

        let body: ImageResponse = response
            .json()
            .await
            .map_err(|e| DeckError::LlmApi(format!("Failed to parse image response: {}", e)))?;

        body.data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| DeckError::LlmApi("Empty response: no image URL".to_string()))
    }

    async fn download(&self, url: &str, path: &Path) -> Result<()> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DeckError::LlmApi(format!("Image download failed: {}", e)))?
            .bytes()
            .await
            .map_err(|e| DeckError::LlmApi(format!("Image download failed: {}", e)))?;

        tokio::fs::create_dir_all(&self.image_dir).await?;
        tokio::fs::write(path, &bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl ImageSource for OpenAiImageSource {
    async fn fetch(&self, prompt: &str, title: &str, key: &str) -> Result<PathBuf> {
        let url = self.request_image_url(prompt).await?;
        let path = self.image_dir.join(image_filename(title, key));
        self.download(&url, &path).await?;
        debug!(path = %path.display(), "Downloaded slide image");
        Ok(path)
    }

    fn name(&self) -> &str {
        "openai-images"
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    size: String,
    quality: String,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

// =============================================================================
// Acquirer
// =============================================================================

/// Attaches an image reference to every slide that has an image prompt
pub struct ImageAcquirer {
    source: Option<SharedImageSource>,
    placeholder_base: String,
    call_timeout: Duration,
    metrics: SharedMetrics,
    /// Nanosecond timestamp taken at construction; one per generation run
    run_id: i64,
}

impl ImageAcquirer {
    pub fn new(
        source: Option<SharedImageSource>,
        placeholder_base: impl Into<String>,
        metrics: SharedMetrics,
    ) -> Self {
        Self {
            source,
            placeholder_base: placeholder_base.into(),
            call_timeout: Duration::from_secs(IMAGE_DOWNLOAD_TIMEOUT_SECS),
            metrics,
            run_id: Local::now().timestamp_nanos_opt().unwrap_or_default(),
        }
    }

    /// Fill `image_path` on each slide with a prompt; records land in the
    /// matching enrichment entries.
    #[instrument(skip_all, fields(slides = slides.len(), source = self.source_name()))]
    pub async fn acquire_images(&self, slides: &mut [Slide], records: &mut [SlideEnrichment]) {
        let mut fetched = 0usize;

        for (index, slide) in slides.iter_mut().enumerate() {
            let Some(prompt) = slide.image_prompt.clone() else {
                continue;
            };

            let key = format!("{}-{}", self.run_id, index);
            let image = self.acquire_one(&prompt, &slide.title, &key).await;
            if image.is_model() {
                fetched += 1;
            }
            if let Some(record) = records.get_mut(index) {
                record.image = Some(image.source());
            }
            slide.image_path = Some(image.into_value());
        }

        info!(fetched, "Image acquisition complete");
    }

    async fn acquire_one(&self, prompt: &str, title: &str, key: &str) -> Generated<String> {
        let result = match &self.source {
            None => Err(LlmError::new(
                ErrorCategory::Unavailable,
                "image generation disabled",
            )),
            Some(source) => with_timeout(
                self.call_timeout,
                source.fetch(prompt, title, key),
                &format!("image for '{}'", title),
            )
            .await
            .map(|path| path.to_string_lossy().into_owned())
            .map_err(|e| ErrorClassifier::classify_deck_error(&e, source.name())),
        };

        if let Err(reason) = &result {
            self.metrics.record_fallback(EnrichmentField::Image);
            if self.source.is_some() {
                warn!(title, error = %reason, "Image generation failed, using placeholder");
            }
        }

        Generated::from_result(result, || placeholder::image_url(&self.placeholder_base, title))
    }

    fn source_name(&self) -> &str {
        self.source.as_ref().map_or("placeholder", |s| s.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::create_shared_metrics;
    use crate::constants::images::PLACEHOLDER_BASE;
    use crate::enrich::outcome::FieldSource;

    struct StubSource {
        dir: PathBuf,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl ImageSource for StubSource {
        async fn fetch(&self, _prompt: &str, title: &str, key: &str) -> Result<PathBuf> {
            if self.fail_on == Some(title) {
                return Err(DeckError::LlmApi("503 service unavailable".to_string()));
            }
            Ok(self.dir.join(image_filename(title, key)))
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn slide_with_prompt(title: &str) -> Slide {
        Slide {
            image_prompt: Some(format!("picture of {}", title)),
            ..Slide::new(title)
        }
    }

    fn record(title: &str) -> SlideEnrichment {
        SlideEnrichment {
            title: title.to_string(),
            bullets: FieldSource::Model,
            speaker_notes: None,
            image_prompt: FieldSource::Model,
            image: None,
        }
    }

    #[test]
    fn test_image_filename() {
        let name = image_filename("Q&A: What's next?", "run-0");
        assert!(name.starts_with("QA_Whats_next_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "QA_Whats_next_".len() + 8 + ".png".len());

        let long = image_filename(&"x".repeat(80), "run-0");
        assert!(long.starts_with(&format!("{}_", "x".repeat(50))));
    }

    #[test]
    fn test_image_filename_depends_on_key() {
        assert_eq!(image_filename("Summary", "a-1"), image_filename("Summary", "a-1"));
        assert_ne!(image_filename("Summary", "a-1"), image_filename("Summary", "a-2"));
        assert_ne!(image_filename("Summary", "a-1"), image_filename("Summary", "b-1"));
    }

    #[test]
    fn test_enhance_prompt() {
        let prompt = enhance_prompt("a rocket");
        assert!(prompt.starts_with("Simple, professional, minimalist icon or illustration: a rocket."));
        assert!(prompt.ends_with("suitable for presentation slide."));
    }

    #[tokio::test]
    async fn test_disabled_source_gives_placeholder() {
        let metrics = create_shared_metrics("images");
        let acquirer = ImageAcquirer::new(None, PLACEHOLDER_BASE, metrics.clone());
        let mut slides = vec![slide_with_prompt("Roadmap"), Slide::new("No prompt")];
        let mut records = vec![record("Roadmap"), record("No prompt")];

        acquirer.acquire_images(&mut slides, &mut records).await;

        assert_eq!(
            slides[0].image_path.as_deref(),
            Some("https://via.placeholder.com/800x450/4A90E2/FFFFFF?text=Roadmap")
        );
        assert!(slides[1].image_path.is_none());
        assert!(matches!(records[0].image, Some(FieldSource::Fallback(_))));
        assert!(records[1].image.is_none());
        assert_eq!(metrics.fallback_count(EnrichmentField::Image), 1);
    }

    #[tokio::test]
    async fn test_source_failure_falls_back_per_slide() {
        let dir = tempfile::tempdir().unwrap();
        let source = StubSource {
            dir: dir.path().to_path_buf(),
            fail_on: Some("Broken"),
        };
        let acquirer = ImageAcquirer::new(
            Some(Arc::new(source)),
            PLACEHOLDER_BASE,
            create_shared_metrics("images"),
        );
        let mut slides = vec![slide_with_prompt("Working"), slide_with_prompt("Broken")];
        let mut records = vec![record("Working"), record("Broken")];

        acquirer.acquire_images(&mut slides, &mut records).await;

        let working = slides[0].image_path.as_deref().unwrap();
        assert!(working.ends_with(".png"));
        assert_eq!(records[0].image, Some(FieldSource::Model));

        assert!(slides[1].image_path.as_deref().unwrap().contains("text=Broken"));
        match &records[1].image {
            Some(FieldSource::Fallback(reason)) => {
                assert_eq!(reason.category, ErrorCategory::Unavailable);
                assert_eq!(reason.provider.as_deref(), Some("stub"));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_titles_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = StubSource {
            dir: dir.path().to_path_buf(),
            fail_on: None,
        };
        let acquirer = ImageAcquirer::new(
            Some(Arc::new(source)),
            PLACEHOLDER_BASE,
            create_shared_metrics("images"),
        );
        let mut slides = vec![slide_with_prompt("Summary"), slide_with_prompt("Summary")];
        let mut records = vec![record("Summary"), record("Summary")];

        acquirer.acquire_images(&mut slides, &mut records).await;

        let first = slides[0].image_path.as_deref().unwrap();
        let second = slides[1].image_path.as_deref().unwrap();
        assert!(first.ends_with(".png") && second.ends_with(".png"));
        assert_ne!(first, second);
    }
}
