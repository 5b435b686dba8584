//! LLM Provider Abstraction
//!
//! Defines the LlmProvider trait for structured JSON generation.
//! All providers return `LlmResponse` with token usage metrics.
//!
//! A missing provider is a valid state: [`resolve_provider`] returns `None`
//! for offline mode, and enrichment then substitutes placeholder content.

mod ollama;
mod openai;
mod prompt_utils;

pub use ollama::OllamaProvider;
pub use openai::{DEFAULT_API_BASE as OPENAI_API_BASE, OpenAiProvider};

// Re-export error types from centralized location
pub use crate::types::{ErrorCategory, ErrorClassifier, LlmError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::types::{DeckError, Result};

/// Environment variable consulted when no API key is configured
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

// =============================================================================
// LLM Response with Usage Metrics
// =============================================================================

/// LLM response including content, usage metrics and timing
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated content (structured JSON)
    pub content: Value,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
}

impl LlmResponse {
    /// Create response with content only (usage unknown)
    pub fn content_only(content: Value) -> Self {
        Self {
            content,
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
        }
    }
}

/// Token usage metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    /// Create from OpenAI-style usage response
    pub fn from_openai(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            input_tokens: prompt_tokens,
            output_tokens: completion_tokens,
        }
    }

    /// Create from Ollama-style usage response
    pub fn from_ollama(prompt_eval_count: u32, eval_count: u32) -> Self {
        Self {
            input_tokens: prompt_eval_count,
            output_tokens: eval_count,
        }
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Shared LLM provider type
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Configuration for LLM providers
///
/// API keys are never serialized and are redacted in debug output. Each
/// provider converts the key to `SecretString` internally.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider type: "openai", "ollama", "offline"
    pub provider: String,
    /// Model name (provider-specific)
    pub model: Option<String>,
    /// Request timeout in seconds, also used as the per-call enrichment timeout
    pub timeout_secs: u64,
    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,
    /// API key; never serialized to output
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL (for custom endpoints)
    #[serde(default)]
    pub api_base: Option<String>,
    /// Upper bound on generated tokens per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

fn default_max_tokens() -> usize {
    500
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            timeout_secs: crate::constants::network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.7,
            api_key: None,
            api_base: None,
            max_tokens: default_max_tokens(),
        }
    }
}

impl ProviderConfig {
    /// Configured key, falling back to `OPENAI_API_KEY`
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(OPENAI_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// LLM Provider trait for structured output generation with usage metrics
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate structured output matching a JSON schema
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<LlmResponse>;

    /// Generate with a per-call cap on output tokens.
    ///
    /// Providers without a native cap ignore the limit.
    async fn generate_limited(
        &self,
        prompt: &str,
        schema: &Value,
        max_tokens: usize,
    ) -> Result<LlmResponse> {
        let _ = max_tokens;
        self.generate(prompt, schema).await
    }

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiProvider::new(config.clone())?)),
        "ollama" => Ok(Arc::new(OllamaProvider::new(config.clone())?)),
        _ => Err(DeckError::Config(format!(
            "Unknown provider: {}. Supported: openai, ollama, offline",
            config.provider
        ))),
    }
}

/// Resolve the configured provider, or `None` for offline mode.
///
/// OpenAI without an API key degrades to offline mode with a warning.
pub fn resolve_provider(config: &ProviderConfig) -> Result<Option<SharedProvider>> {
    match config.provider.as_str() {
        "offline" => Ok(None),
        "openai" if config.resolved_api_key().is_none() => {
            warn!(
                "No OpenAI API key found (set {} or llm.api_key); using placeholder content",
                OPENAI_API_KEY_ENV
            );
            Ok(None)
        }
        _ => create_provider(config).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usage_total() {
        assert_eq!(TokenUsage::from_openai(100, 50).total(), 150);
        assert_eq!(TokenUsage::from_ollama(7, 3).total(), 10);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = ProviderConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn test_resolve_offline() {
        let config = ProviderConfig {
            provider: "offline".to_string(),
            ..Default::default()
        };
        assert!(resolve_provider(&config).unwrap().is_none());
    }

    #[test]
    fn test_resolve_openai_with_key() {
        let config = ProviderConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let provider = resolve_provider(&config).unwrap().unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = ProviderConfig {
            provider: "mystery".to_string(),
            ..Default::default()
        };
        assert!(matches!(create_provider(&config), Err(DeckError::Config(_))));
    }
}
