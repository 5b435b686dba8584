//! Outline parsing: classification, section extraction and slide building.
//!
//! ```text
//! raw text -> classify -> builder_for(shape) -> Vec<Slide>
//!                              \-> extract_sections (nested outlines)
//! ```
//!
//! Everything here is synchronous and pure.

pub mod builders;
pub mod classifier;
pub mod extractor;
pub mod markers;

use serde::Serialize;

pub use builders::{
    BulletListBuilder, NestedOutlineBuilder, OutlineBuilder, TopicTemplateBuilder, builder_for,
};
pub use classifier::{InputShape, classify};
pub use extractor::extract_sections;

use crate::types::Slide;

/// Result of parsing raw input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedOutline {
    pub shape: InputShape,
    pub slides: Vec<Slide>,
}

/// Classify raw input and build its slide sequence.
pub fn parse_outline(text: &str) -> ParsedOutline {
    let trimmed = text.trim();
    let shape = classify(trimmed);
    let slides = builder_for(shape).build(trimmed);

    tracing::debug!(%shape, slides = slides.len(), "Parsed outline");

    ParsedOutline { shape, slides }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_topic() {
        let parsed = parse_outline("  Machine Learning\n");
        assert_eq!(parsed.shape, InputShape::SimpleTopic);
        assert_eq!(parsed.slides.len(), 5);
        assert_eq!(parsed.slides[0].title, "Machine Learning");
        assert_eq!(parsed.slides[4].title, "Conclusion");
    }

    #[test]
    fn test_parse_bulleted_list() {
        let parsed = parse_outline("Roadmap\n- Q1 launch\n- Q2 growth\n- Q3 scale\n- Q4 review");
        assert_eq!(parsed.shape, InputShape::BulletedList);
        let titles: Vec<_> = parsed.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Roadmap", "Q1 launch", "Q2 growth", "Q3 scale", "Q4 review"]);
    }

    #[test]
    fn test_parse_nested_outline() {
        let text = "\n1. Background\n    - History\n    - Motivation\n2. Proposal\n    - Design\n";
        let parsed = parse_outline(text);
        assert_eq!(parsed.shape, InputShape::NestedOutline);
        assert_eq!(parsed.slides.len(), 2);
        assert_eq!(parsed.slides[0].title, "Background");
        assert_eq!(parsed.slides[0].bullets, vec!["History", "Motivation"]);
        assert_eq!(parsed.slides[1].bullets, vec!["Design"]);
    }

    #[test]
    fn test_parse_never_returns_empty() {
        for text in ["", "   ", "-", "\n\n", "    - only\n        - deeper"] {
            assert!(!parse_outline(text).slides.is_empty(), "input {:?}", text);
        }
    }

    #[test]
    fn test_titles_non_blank_for_non_blank_input() {
        for text in ["Rust", "- a\n- b", "A\n    - x\nB", "1.\n2. Two\n3. Three"] {
            let parsed = parse_outline(text);
            assert!(parsed.slides.iter().all(|s| !s.title.trim().is_empty()), "input {:?}", text);
        }
    }
}
