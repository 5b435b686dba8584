//! Slide records and outline sections.

use serde::{Deserialize, Serialize};

/// A single slide: title, bullets, and the fields enrichment fills in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Slide heading
    pub title: String,
    /// Bullet points in presentation order
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Speaker notes (absent until enrichment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_notes: Option<String>,
    /// Description used to acquire an image (absent until enrichment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    /// Local path or URL of the slide image (absent until enrichment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Create a slide with bullets, dropping blank entries
    pub fn with_bullets<I, S>(title: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            bullets: bullets
                .into_iter()
                .map(Into::into)
                .filter(|b: &String| !b.trim().is_empty())
                .collect(),
            ..Default::default()
        }
    }

    pub fn has_bullets(&self) -> bool {
        !self.bullets.is_empty()
    }
}

/// Title plus nested sub-points extracted from outline text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineSection {
    pub title: String,
    pub sub_points: Vec<String>,
    /// Nesting depth; top-level sections are always 0
    pub depth: u8,
}

impl OutlineSection {
    pub fn top_level(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sub_points: Vec::new(),
            depth: 0,
        }
    }
}

impl From<OutlineSection> for Slide {
    fn from(section: OutlineSection) -> Self {
        Slide::with_bullets(section.title, section.sub_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_bullets_drops_blank_entries() {
        let slide = Slide::with_bullets("Intro", ["one", "  ", "", "two"]);
        assert_eq!(slide.bullets, vec!["one", "two"]);
        assert!(slide.speaker_notes.is_none());
    }

    #[test]
    fn test_section_into_slide() {
        let mut section = OutlineSection::top_level("Goals");
        section.sub_points.push("Ship it".to_string());
        let slide: Slide = section.into();
        assert_eq!(slide.title, "Goals");
        assert_eq!(slide.bullets, vec!["Ship it"]);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let json = serde_json::to_value(Slide::new("Solo")).unwrap();
        assert_eq!(json["title"], "Solo");
        assert!(json.get("speaker_notes").is_none());
        assert!(json.get("image_path").is_none());
    }
}
