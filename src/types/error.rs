//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Provides error classification so enrichment can record why a
//! collaborator call fell back to placeholder content.
//!
//! ## Error Categories
//!
//! - **RateLimit**: API rate limiting or exhausted quota
//! - **Auth**: Missing or rejected credentials
//! - **Network**: Connectivity issues and elapsed timeouts
//! - **Unavailable**: Provider or converter not reachable
//! - **ParseError**: Response could not be interpreted
//!
//! Outline classification and extraction never produce errors; everything
//! here belongs to the collaborator boundary or the CLI.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for collaborator failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Rate limited or quota exceeded
    RateLimit,
    /// Authentication failed
    Auth,
    /// Network/connectivity issues, including timeouts
    Network,
    /// Provider unavailable or not configured
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Response could not be parsed into the expected shape
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Collaborator error with category and provider context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmError {
    /// Error category
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Error used when enrichment runs without any provider
    pub fn offline() -> Self {
        Self::new(
            ErrorCategory::Unavailable,
            "no text-generation provider configured (offline mode)",
        )
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps raw failures onto an [`ErrorCategory`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from any provider
    pub fn classify(message: &str, provider: &str) -> LlmError {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota")
        {
            return LlmError::with_provider(ErrorCategory::RateLimit, message, provider);
        }

        if lower.contains("auth")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("unauthorized")
        {
            return LlmError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("connect")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
        {
            return LlmError::with_provider(ErrorCategory::Network, message, provider);
        }

        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("service unavailable")
            || lower.contains("not found")
            || lower.contains("not installed")
        {
            return LlmError::with_provider(ErrorCategory::Unavailable, message, provider);
        }

        if lower.contains("400") || lower.contains("bad request") || lower.contains("invalid") {
            return LlmError::with_provider(ErrorCategory::BadRequest, message, provider);
        }

        if lower.contains("parse")
            || lower.contains("json")
            || lower.contains("empty response")
            || lower.contains("missing field")
        {
            return LlmError::with_provider(ErrorCategory::ParseError, message, provider);
        }

        if lower.contains("500")
            || lower.contains("overloaded")
            || lower.contains("temporary")
            || lower.contains("server error")
        {
            return LlmError::with_provider(ErrorCategory::Transient, message, provider);
        }

        LlmError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        match status {
            429 => LlmError::with_provider(ErrorCategory::RateLimit, message, provider),
            401 | 403 => LlmError::with_provider(ErrorCategory::Auth, message, provider),
            400 | 422 => LlmError::with_provider(ErrorCategory::BadRequest, message, provider),
            404 => LlmError::with_provider(ErrorCategory::Unavailable, message, provider),
            500 | 502 | 503 | 504 => {
                LlmError::with_provider(ErrorCategory::Transient, message, provider)
            }
            _ => LlmError::with_provider(ErrorCategory::Unknown, message, provider),
        }
    }

    /// Classify a [`DeckError`] with type-based routing
    pub fn classify_deck_error(err: &DeckError, provider: &str) -> LlmError {
        match err {
            DeckError::Llm(llm_err) => {
                let mut classified = llm_err.clone();
                if classified.provider.is_none() {
                    classified.provider = Some(provider.to_string());
                }
                classified
            }
            DeckError::LlmApi(msg) => Self::classify(msg, provider),
            DeckError::Timeout { .. } => {
                LlmError::with_provider(ErrorCategory::Network, err.to_string(), provider)
            }
            DeckError::Json(_) => {
                LlmError::with_provider(ErrorCategory::ParseError, err.to_string(), provider)
            }
            DeckError::Config(_) => {
                LlmError::with_provider(ErrorCategory::BadRequest, err.to_string(), provider)
            }
            DeckError::Io(_) => {
                LlmError::with_provider(ErrorCategory::Unavailable, err.to_string(), provider)
            }
            _ => LlmError::with_provider(ErrorCategory::Unknown, err.to_string(), provider),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum DeckError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    /// Structured LLM error with category
    #[error("LLM error: {0}")]
    Llm(LlmError),

    /// Simple LLM API error (classified later by message)
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Boundary Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to write presentation: {0}")]
    Package(String),
}

impl From<LlmError> for DeckError {
    fn from(err: LlmError) -> Self {
        DeckError::Llm(err)
    }
}

impl From<std::fmt::Error> for DeckError {
    fn from(err: std::fmt::Error) -> Self {
        DeckError::Package(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;

impl DeckError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Boundary category used by the CLI to pick an exit message
    pub fn boundary_kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) | Self::Config(_) => "bad input",
            Self::NotFound(_) => "not found",
            _ => "internal failure",
        }
    }

    /// Process exit code matching [`Self::boundary_kind`]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput(_) | Self::Config(_) => 2,
            Self::NotFound(_) => 3,
            _ => 1,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
