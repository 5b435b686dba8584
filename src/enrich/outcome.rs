//! Enrichment outcomes: model content versus placeholder substitution.

use serde::Serialize;

use crate::ai::EnrichmentField;
use crate::types::LlmError;

/// Outcome of one enrichment call.
///
/// `Fallback` carries both the placeholder value that was substituted and
/// the classified failure that caused the substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Model(T),
    Fallback { value: T, reason: LlmError },
}

impl<T> Generated<T> {
    /// Keep the model value, or substitute `fallback()` on failure
    pub fn from_result(
        result: std::result::Result<T, LlmError>,
        fallback: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => Self::Model(value),
            Err(reason) => Self::Fallback {
                value: fallback(),
                reason,
            },
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Model(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn reason(&self) -> Option<&LlmError> {
        match self {
            Self::Model(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Where the value came from, without the value itself
    pub fn source(&self) -> FieldSource {
        match self {
            Self::Model(_) => FieldSource::Model,
            Self::Fallback { reason, .. } => FieldSource::Fallback(reason.clone()),
        }
    }
}

/// Provenance of one slide field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "reason", rename_all = "snake_case")]
pub enum FieldSource {
    Model,
    Fallback(LlmError),
}

/// Per-slide record of which fields came from the model.
///
/// `speaker_notes` is `None` when notes were not requested; `image` is
/// `None` until image acquisition runs (and stays `None` for slides without
/// an image prompt).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideEnrichment {
    pub title: String,
    pub bullets: FieldSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_notes: Option<FieldSource>,
    pub image_prompt: FieldSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<FieldSource>,
}

impl SlideEnrichment {
    /// Fields that fell back to placeholder content, with their reasons
    pub fn fallbacks(&self) -> Vec<(EnrichmentField, &LlmError)> {
        [
            (EnrichmentField::Bullets, Some(&self.bullets)),
            (EnrichmentField::SpeakerNotes, self.speaker_notes.as_ref()),
            (EnrichmentField::ImagePrompt, Some(&self.image_prompt)),
            (EnrichmentField::Image, self.image.as_ref()),
        ]
        .into_iter()
        .filter_map(|(field, source)| match source {
            Some(FieldSource::Fallback(reason)) => Some((field, reason)),
            _ => None,
        })
        .collect()
    }

    pub fn fully_generated(&self) -> bool {
        self.fallbacks().is_empty()
    }
}
