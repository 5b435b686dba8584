//! Ollama Local LLM Provider
//!
//! LLM provider for locally-running Ollama models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{
    LlmProvider, LlmResponse, ProviderConfig, ResponseTiming, TokenUsage,
    prompt_utils,
};
use crate::ai::validation::extract_json_from_response;
use crate::types::{DeckError, ErrorCategory, ErrorClassifier, LlmError, Result};

const DEFAULT_API_BASE: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3:latest";
const PROVIDER_NAME: &str = "ollama";

/// Ollama Local LLM Provider
pub struct OllamaProvider {
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_base = config
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Self::validate_endpoint(&api_base)?;

        let model = config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeckError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_base,
            model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    /// Only http/https endpoints are accepted; non-local hosts get a warning.
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            DeckError::Config(format!("Invalid Ollama endpoint URL '{}': {}", endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DeckError::Config(format!(
                "Ollama endpoint must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if let Some(host) = url.host_str()
            && !matches!(host, "localhost" | "127.0.0.1" | "[::1]")
        {
            warn!("Ollama endpoint is not localhost: {}", host);
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    fn build_request(&self, prompt: &str, schema: &Value, max_tokens: usize) -> OllamaRequest {
        OllamaRequest {
            model: self.model.clone(),
            prompt: prompt_utils::build_schema_prompt(prompt, schema),
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: max_tokens.min(self.max_tokens),
            },
            format: "json".to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<LlmResponse> {
        self.generate_limited(prompt, schema, self.max_tokens).await
    }

    async fn generate_limited(
        &self,
        prompt: &str,
        schema: &Value,
        max_tokens: usize,
    ) -> Result<LlmResponse> {
        info!(
            "Generating with Ollama (model: {}, max_tokens: {})",
            self.model, max_tokens
        );

        let start_time = Instant::now();
        let request = self.build_request(prompt, schema, max_tokens);
        let url = format!("{}/api/generate", self.api_base);

        let response = self.client.post(&url).json(&request).send().await.map_err(|e| {
            if e.is_connect() {
                DeckError::Llm(LlmError::with_provider(
                    ErrorCategory::Unavailable,
                    format!(
                        "Failed to connect to Ollama at {}. Is Ollama running? Start with: ollama serve",
                        self.api_base
                    ),
                    PROVIDER_NAME,
                ))
            } else {
                DeckError::LlmApi(format!("Ollama request failed: {}", e))
            }
        })?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Ollama API error ({}): {}", status, body),
                PROVIDER_NAME,
            )
            .into());
        }

        let response_body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| DeckError::LlmApi(format!("Failed to parse Ollama response: {}", e)))?;

        let usage = TokenUsage::from_ollama(
            response_body.prompt_eval_count.unwrap_or(0),
            response_body.eval_count.unwrap_or(0),
        );

        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            tokens = usage.total(),
            "Received Ollama response"
        );
        let content = extract_json_from_response(&response_body.response)?;

        Ok(LlmResponse {
            content,
            usage,
            timing: ResponseTiming::from_duration(elapsed),
        })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
    format: String,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}
