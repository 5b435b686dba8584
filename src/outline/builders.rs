//! Shape-specific slide builders.
//!
//! One [`OutlineBuilder`] per [`InputShape`]; [`builder_for`] is the only
//! place that maps a shape to its strategy. Builders never fail and always
//! return at least one slide.

use super::classifier::InputShape;
use super::extractor::extract_sections;
use super::markers::{is_marked, strip_marker};
use crate::types::Slide;

/// Strategy that turns classified input into an ordered slide sequence.
pub trait OutlineBuilder: Send + Sync {
    /// Shape this builder handles
    fn shape(&self) -> InputShape;

    /// Build slides from already-trimmed input text.
    fn build(&self, text: &str) -> Vec<Slide>;
}

/// Select the builder for a classified shape.
pub fn builder_for(shape: InputShape) -> &'static dyn OutlineBuilder {
    match shape {
        InputShape::SimpleTopic => &TopicTemplateBuilder,
        InputShape::BulletedList => &BulletListBuilder,
        InputShape::NestedOutline => &NestedOutlineBuilder,
    }
}

// =============================================================================
// Topic Template
// =============================================================================

/// Expands a single topic into a fixed five-slide template.
pub struct TopicTemplateBuilder;

impl OutlineBuilder for TopicTemplateBuilder {
    fn shape(&self) -> InputShape {
        InputShape::SimpleTopic
    }

    fn build(&self, text: &str) -> Vec<Slide> {
        let topic = text.trim();
        if topic.is_empty() {
            return vec![Slide::new("")];
        }

        vec![
            Slide::with_bullets(topic, ["Overview", "Key Concepts", "Applications"]),
            Slide::with_bullets(
                "Introduction",
                [format!("Understanding {}", topic), "Context and Background".to_string()],
            ),
            Slide::with_bullets("Key Concepts", ["Concept 1", "Concept 2", "Concept 3"]),
            Slide::with_bullets("Applications", ["Real-world use cases", "Practical examples"]),
            Slide::with_bullets("Conclusion", ["Summary", "Key Takeaways", "Next Steps"]),
        ]
    }
}

// =============================================================================
// Bulleted List
// =============================================================================

/// One slide per list item, with an implicit title slide for an unmarked
/// first line.
pub struct BulletListBuilder;

impl OutlineBuilder for BulletListBuilder {
    fn shape(&self) -> InputShape {
        InputShape::BulletedList
    }

    fn build(&self, text: &str) -> Vec<Slide> {
        let mut lines = non_blank_lines(text).peekable();
        let mut slides = Vec::new();

        if let Some(first) = lines.next_if(|line| !is_marked(line)) {
            slides.push(Slide::with_bullets(first, ["Overview", "Key Topics"]));
        }

        slides.extend(
            lines
                .map(strip_marker)
                .filter(|title| !title.is_empty())
                .map(Slide::new),
        );

        ensure_non_empty(slides, text)
    }
}

// =============================================================================
// Nested Outline
// =============================================================================

/// One slide per extracted section, sub-points becoming bullets.
pub struct NestedOutlineBuilder;

impl OutlineBuilder for NestedOutlineBuilder {
    fn shape(&self) -> InputShape {
        InputShape::NestedOutline
    }

    fn build(&self, text: &str) -> Vec<Slide> {
        let lines = text.lines().filter(|line| !line.trim().is_empty());
        let slides = extract_sections(lines).into_iter().map(Slide::from).collect();

        ensure_non_empty(slides, text)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Fall back to one slide named after the first non-blank line.
fn ensure_non_empty(slides: Vec<Slide>, text: &str) -> Vec<Slide> {
    if !slides.is_empty() {
        return slides;
    }

    let first = non_blank_lines(text).next().unwrap_or_default();
    let stripped = strip_marker(first);
    let title = if stripped.is_empty() { first } else { stripped };
    vec![Slide::new(title)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(slides: &[Slide]) -> Vec<&str> {
        slides.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_builder_for_matches_shape() {
        for shape in [
            InputShape::SimpleTopic,
            InputShape::BulletedList,
            InputShape::NestedOutline,
        ] {
            assert_eq!(builder_for(shape).shape(), shape);
        }
    }

    #[test]
    fn test_topic_template() {
        let slides = TopicTemplateBuilder.build("Machine Learning");

        assert_eq!(slides.len(), 5);
        assert_eq!(
            titles(&slides),
            vec!["Machine Learning", "Introduction", "Key Concepts", "Applications", "Conclusion"]
        );
        assert_eq!(slides[0].bullets, vec!["Overview", "Key Concepts", "Applications"]);
        assert_eq!(
            slides[1].bullets,
            vec!["Understanding Machine Learning", "Context and Background"]
        );
        assert_eq!(slides[4].bullets, vec!["Summary", "Key Takeaways", "Next Steps"]);
    }

    #[test]
    fn test_blank_topic_gives_single_empty_slide() {
        let slides = TopicTemplateBuilder.build("   ");
        assert_eq!(slides, vec![Slide::new("")]);
    }

    #[test]
    fn test_bullet_list_with_implicit_title() {
        let slides = BulletListBuilder.build("My Talk\n- Point A\n- Point B");

        assert_eq!(titles(&slides), vec!["My Talk", "Point A", "Point B"]);
        assert_eq!(slides[0].bullets, vec!["Overview", "Key Topics"]);
        assert!(slides[1].bullets.is_empty());
        assert!(slides[2].bullets.is_empty());
    }

    #[test]
    fn test_bullet_list_without_title() {
        let slides = BulletListBuilder.build("- One\n\n* Two\n• Three\n1. Four");
        assert_eq!(titles(&slides), vec!["One", "Two", "Three", "Four"]);
        assert!(slides.iter().all(|s| s.bullets.is_empty()));
    }

    #[test]
    fn test_bullet_list_skips_marker_only_lines() {
        let slides = BulletListBuilder.build("- A\n-\n- B");
        assert_eq!(titles(&slides), vec!["A", "B"]);
    }

    #[test]
    fn test_bullet_list_of_bare_markers_falls_back() {
        let slides = BulletListBuilder.build("-\n*\n•");
        assert_eq!(titles(&slides), vec!["-"]);
    }

    #[test]
    fn test_nested_outline() {
        let text = "Intro\n    - Hook\n    - Agenda\nBody\n    - Evidence";
        let slides = NestedOutlineBuilder.build(text);

        assert_eq!(titles(&slides), vec!["Intro", "Body"]);
        assert_eq!(slides[0].bullets, vec!["Hook", "Agenda"]);
        assert_eq!(slides[1].bullets, vec!["Evidence"]);
    }

    #[test]
    fn test_nested_outline_only_sub_points_falls_back() {
        let slides = NestedOutlineBuilder.build("-\n      - deep one\n      - deep two");
        assert_eq!(titles(&slides), vec!["-"]);

        let slides = NestedOutlineBuilder.build("      - deep one");
        assert_eq!(titles(&slides), vec!["deep one"]);
    }
}
