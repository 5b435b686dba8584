//! AI Integration Layer
//!
//! Text-generation providers, prompt construction, response parsing,
//! per-call timeouts and usage metrics used by slide enrichment.

pub mod metrics;
pub mod prompt;
pub mod provider;
pub mod timeout;
pub mod validation;

pub use metrics::{
    EnrichmentField, MetricsCollector, MetricsSummary, SharedMetrics, create_shared_metrics,
};
pub use prompt::{PromptBuilder, PromptSection, SlidePrompts};
pub use provider::{
    LlmProvider, LlmResponse, OPENAI_API_BASE, OllamaProvider, OpenAiProvider, ProviderConfig,
    ResponseTiming, SharedProvider, TokenUsage, create_provider, resolve_provider,
};
pub use timeout::{with_timeout, with_timeout_map};
pub use validation::{JsonRepairer, extract_json_from_response};
