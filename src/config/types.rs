//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/deckweave/) and project (.deckweave/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::ProviderConfig;
use crate::constants::{images, output};
use crate::deck::Theme;
use crate::types::{DeckError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Text generation provider settings
    pub llm: ProviderConfig,

    /// Image acquisition settings
    pub images: ImagesConfig,

    /// Deck output settings
    pub output: OutputConfig,

    /// Enrichment settings
    pub enrichment: EnrichmentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: ProviderConfig::default(),
            images: ImagesConfig::default(),
            output: OutputConfig::default(),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `DeckError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DeckError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(DeckError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(DeckError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.llm.provider.as_str(), "openai" | "ollama" | "offline") {
            return Err(DeckError::Config(format!(
                "Unknown LLM provider '{}' (expected openai, ollama or offline)",
                self.llm.provider
            )));
        }

        Ok(())
    }

    /// Per-call timeout for generation and image requests
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_secs)
    }

    /// Configured theme; unknown names fall back with a warning
    pub fn theme(&self) -> Theme {
        Theme::parse_or_default(&self.output.theme)
    }
}

// =============================================================================
// Image Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Request model images (placeholder URLs otherwise)
    pub generate: bool,

    /// Image model name
    pub model: String,

    /// Requested image size (WxH)
    pub size: String,

    /// Images API base URL (defaults to the OpenAI endpoint)
    pub api_base: Option<String>,

    /// Placeholder image service base URL
    pub placeholder_base: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            generate: false,
            model: images::DEFAULT_MODEL.to_string(),
            size: images::DEFAULT_SIZE.to_string(),
            api_base: None,
            placeholder_base: images::PLACEHOLDER_BASE.to_string(),
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving decks (and the images/ subdirectory)
    pub dir: PathBuf,

    /// Theme name: professional, modern or minimal
    pub theme: String,

    /// Convert the deck to PDF after writing it
    pub export_pdf: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(output::DEFAULT_DIR),
            theme: Theme::default().to_string(),
            export_pdf: false,
        }
    }
}

impl OutputConfig {
    pub fn image_dir(&self) -> PathBuf {
        self.dir.join(images::IMAGE_SUBDIR)
    }
}

// =============================================================================
// Enrichment Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Generate speaker notes for every slide
    pub speaker_notes: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            speaker_notes: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "openai");
        assert!(!config.images.generate);
        assert_eq!(config.images.model, "dall-e-3");
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.output.theme, "professional");
        assert!(config.enrichment.speaker_notes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_temperature_rejected() {
        let mut config = Config::default();
        config.llm.temperature = 2.5;
        assert!(matches!(config.validate(), Err(DeckError::Config(_))));

        config.llm.temperature = -0.1;
        assert!(config.validate().is_err());

        config.llm.temperature = 2.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = Config::default();
        config.llm.provider = "mystery".to_string();
        assert!(config.validate().is_err());

        config.llm.provider = "offline".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_theme_and_paths() {
        let mut config = Config::default();
        config.output.theme = "modern".to_string();
        assert_eq!(config.theme(), Theme::Modern);

        config.output.theme = "neon".to_string();
        assert_eq!(config.theme(), Theme::Professional);

        assert_eq!(config.output.image_dir(), PathBuf::from("output/images"));
        assert_eq!(config.call_timeout(), Duration::from_secs(60));
    }
}
