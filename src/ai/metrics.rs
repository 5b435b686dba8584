//! Enrichment Metrics Collection
//!
//! Counts model calls, token usage and placeholder fallbacks across one
//! enrichment run. Counters are atomics so a collector can be shared through
//! an `Arc` without locking.
//!
//! ## Usage
//!
//! ```ignore
//! let metrics = MetricsCollector::new("deck-20250101");
//! metrics.record_response(&response);
//! metrics.record_fallback(EnrichmentField::Bullets);
//! tracing::info!("{}", metrics.summary().display());
//! ```

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;

use crate::ai::provider::LlmResponse;

/// Slide field filled by enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentField {
    Bullets,
    SpeakerNotes,
    ImagePrompt,
    Image,
}

impl EnrichmentField {
    pub const ALL: [EnrichmentField; 4] = [
        Self::Bullets,
        Self::SpeakerNotes,
        Self::ImagePrompt,
        Self::Image,
    ];

    fn index(self) -> usize {
        match self {
            Self::Bullets => 0,
            Self::SpeakerNotes => 1,
            Self::ImagePrompt => 2,
            Self::Image => 3,
        }
    }
}

impl std::fmt::Display for EnrichmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullets => write!(f, "bullets"),
            Self::SpeakerNotes => write!(f, "speaker notes"),
            Self::ImagePrompt => write!(f, "image prompt"),
            Self::Image => write!(f, "image"),
        }
    }
}

// =============================================================================
// Metrics Collector
// =============================================================================

/// Thread-safe metrics collector for one enrichment run.
pub struct MetricsCollector {
    session_id: String,
    start_time: Instant,
    model_calls: AtomicU32,
    input_tokens: AtomicU64,
    output_tokens: AtomicU64,
    total_latency_ms: AtomicU64,
    fallbacks: [AtomicU32; 4],
}

/// Snapshot of collected metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub session_id: String,
    pub total_duration_ms: u64,
    pub model_calls: u32,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub avg_latency_ms: f64,
    pub fallbacks: Vec<(EnrichmentField, u32)>,
}

impl MetricsCollector {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            start_time: Instant::now(),
            model_calls: AtomicU32::new(0),
            input_tokens: AtomicU64::new(0),
            output_tokens: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            fallbacks: Default::default(),
        }
    }

    /// Record a successful model call
    pub fn record_response(&self, response: &LlmResponse) {
        self.model_calls.fetch_add(1, Ordering::Relaxed);
        self.input_tokens
            .fetch_add(response.usage.input_tokens as u64, Ordering::Relaxed);
        self.output_tokens
            .fetch_add(response.usage.output_tokens as u64, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(response.timing.total_ms, Ordering::Relaxed);
    }

    /// Record a field that fell back to placeholder content
    pub fn record_fallback(&self, field: EnrichmentField) {
        self.fallbacks[field.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn fallback_count(&self, field: EnrichmentField) -> u32 {
        self.fallbacks[field.index()].load(Ordering::Relaxed)
    }

    /// Current metrics snapshot
    pub fn summary(&self) -> MetricsSummary {
        let model_calls = self.model_calls.load(Ordering::Relaxed);
        let input_tokens = self.input_tokens.load(Ordering::Relaxed);
        let output_tokens = self.output_tokens.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency_ms = if model_calls > 0 {
            total_latency as f64 / model_calls as f64
        } else {
            0.0
        };

        MetricsSummary {
            session_id: self.session_id.clone(),
            total_duration_ms: self.start_time.elapsed().as_millis() as u64,
            model_calls,
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            avg_latency_ms,
            fallbacks: EnrichmentField::ALL
                .iter()
                .map(|&field| (field, self.fallback_count(field)))
                .collect(),
        }
    }
}

impl MetricsSummary {
    pub fn total_fallbacks(&self) -> u32 {
        self.fallbacks.iter().map(|(_, n)| n).sum()
    }

    /// Format summary for display
    pub fn display(&self) -> String {
        let fallbacks = self
            .fallbacks
            .iter()
            .map(|(field, n)| format!("{}: {}", field, n))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Session: {}\n\
             Duration: {:.1}s\n\
             Model Calls: {}\n\
             Tokens: {} (input: {}, output: {})\n\
             Avg Latency: {:.0}ms\n\
             Fallbacks: {}",
            self.session_id,
            self.total_duration_ms as f64 / 1000.0,
            self.model_calls,
            self.total_tokens,
            self.input_tokens,
            self.output_tokens,
            self.avg_latency_ms,
            fallbacks
        )
    }
}

/// Shared metrics collector
pub type SharedMetrics = Arc<MetricsCollector>;

pub fn create_shared_metrics(session_id: impl Into<String>) -> SharedMetrics {
    Arc::new(MetricsCollector::new(session_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{ResponseTiming, TokenUsage};

    fn response(input: u32, output: u32, ms: u64) -> LlmResponse {
        LlmResponse {
            content: serde_json::json!({}),
            usage: TokenUsage::from_openai(input, output),
            timing: ResponseTiming { total_ms: ms },
        }
    }

    #[test]
    fn test_record_response() {
        let metrics = MetricsCollector::new("test-session");
        metrics.record_response(&response(100, 50, 400));
        metrics.record_response(&response(20, 10, 200));

        let summary = metrics.summary();
        assert_eq!(summary.model_calls, 2);
        assert_eq!(summary.total_tokens, 180);
        assert!((summary.avg_latency_ms - 300.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_fallbacks(), 0);
    }

    #[test]
    fn test_fallbacks_counted_per_field() {
        let metrics = MetricsCollector::new("fallbacks");
        metrics.record_fallback(EnrichmentField::Bullets);
        metrics.record_fallback(EnrichmentField::Bullets);
        metrics.record_fallback(EnrichmentField::Image);

        assert_eq!(metrics.fallback_count(EnrichmentField::Bullets), 2);
        assert_eq!(metrics.fallback_count(EnrichmentField::SpeakerNotes), 0);
        assert_eq!(metrics.summary().total_fallbacks(), 3);
    }

    #[test]
    fn test_concurrent_recording() {
        let metrics = create_shared_metrics("concurrent");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let m = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        m.record_response(&response(10, 5, 1));
                        m.record_fallback(EnrichmentField::SpeakerNotes);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let summary = metrics.summary();
        assert_eq!(summary.model_calls, 400);
        assert_eq!(summary.input_tokens, 4000);
        assert_eq!(metrics.fallback_count(EnrichmentField::SpeakerNotes), 400);
    }

    #[test]
    fn test_summary_display() {
        let metrics = MetricsCollector::new("display-test");
        metrics.record_response(&response(1000, 500, 10));
        metrics.record_fallback(EnrichmentField::ImagePrompt);

        let display = metrics.summary().display();
        assert!(display.contains("display-test"));
        assert!(display.contains("1500"));
        assert!(display.contains("image prompt: 1"));
    }
}
