//! Input Classifier
//!
//! Decides which shape raw input text has. Classification is total: every
//! string, including empty and whitespace-only ones, maps to exactly one
//! [`InputShape`].
//!
//! Rules, evaluated in priority order:
//!
//! 1. **SimpleTopic**: at most two lines and no list markers anywhere
//! 2. **BulletedList**: at least 70% of non-blank lines start with a bullet
//! 3. **NestedOutline**: everything else

use serde::Serialize;

use super::markers::{contains_list_marker, starts_with_bullet};
use crate::constants::outline::{
    BULLET_RATIO_DENOMINATOR, BULLET_RATIO_NUMERATOR, MAX_TOPIC_LINES,
};

/// Shape of the raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    /// A single topic or question
    SimpleTopic,
    /// A flat list where each bullet becomes a slide
    BulletedList,
    /// An indented outline with titles and sub-points
    NestedOutline,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputShape::SimpleTopic => write!(f, "simple-topic"),
            InputShape::BulletedList => write!(f, "bulleted-list"),
            InputShape::NestedOutline => write!(f, "nested-outline"),
        }
    }
}

/// Classify raw input text.
pub fn classify(text: &str) -> InputShape {
    let trimmed = text.trim();

    if is_simple_topic(trimmed) {
        InputShape::SimpleTopic
    } else if is_bulleted_list(trimmed) {
        InputShape::BulletedList
    } else {
        InputShape::NestedOutline
    }
}

fn is_simple_topic(trimmed: &str) -> bool {
    trimmed.split('\n').count() <= MAX_TOPIC_LINES && !contains_list_marker(trimmed)
}

fn is_bulleted_list(trimmed: &str) -> bool {
    let (total, bulleted) = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold((0usize, 0usize), |(total, bulleted), line| {
            (total + 1, bulleted + usize::from(starts_with_bullet(line)))
        });

    bulleted * BULLET_RATIO_DENOMINATOR >= total * BULLET_RATIO_NUMERATOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list_with(bulleted: usize, plain: usize) -> String {
        let mut lines: Vec<String> = (0..plain).map(|i| format!("Heading {}", i)).collect();
        lines.extend((0..bulleted).map(|i| format!("- item {}", i)));
        lines.join("\n")
    }

    #[test]
    fn test_single_topic() {
        assert_eq!(classify("Machine Learning"), InputShape::SimpleTopic);
        assert_eq!(
            classify("How do neural networks learn?\nA gentle intro"),
            InputShape::SimpleTopic
        );
    }

    #[test]
    fn test_empty_input_is_simple_topic() {
        assert_eq!(classify(""), InputShape::SimpleTopic);
        assert_eq!(classify("   \n\t \n"), InputShape::SimpleTopic);
    }

    #[test]
    fn test_marker_disqualifies_topic() {
        // A single line with a dash falls through to the outline shape
        assert_eq!(classify("Rust - a tour"), InputShape::NestedOutline);
        assert_eq!(classify("1. Reasons"), InputShape::NestedOutline);
    }

    #[test]
    fn test_version_number_is_not_a_marker() {
        assert_eq!(classify("Python 3.12 features"), InputShape::SimpleTopic);
        assert_eq!(classify("Top 5. reasons to care"), InputShape::SimpleTopic);
    }

    #[test]
    fn test_bulleted_list() {
        // Two of three lines bulleted is under the 70% bar
        assert_eq!(
            classify("My Talk\n- Point A\n- Point B"),
            InputShape::NestedOutline
        );
        assert_eq!(
            classify("- Point A\n- Point B\n* Point C\n• Point D"),
            InputShape::BulletedList
        );
    }

    #[test]
    fn test_bullet_ratio_boundary() {
        // Exactly 70% bulleted
        assert_eq!(classify(&list_with(7, 3)), InputShape::BulletedList);
        // Just below 70%
        assert_eq!(classify(&list_with(6, 4)), InputShape::NestedOutline);
        assert_eq!(classify(&list_with(69, 31)), InputShape::NestedOutline);
    }

    #[test]
    fn test_numbered_lines_are_not_bullets() {
        let text = "1. One\n2. Two\n3. Three";
        assert_eq!(classify(text), InputShape::NestedOutline);
    }

    #[test]
    fn test_blank_lines_ignored_in_ratio() {
        let text = "Intro\n\n- a\n\n- b\n- c\n\n";
        // 3 of 4 non-blank lines are bulleted (75%)
        assert_eq!(classify(text), InputShape::BulletedList);
    }

    proptest! {
        #[test]
        fn prop_short_unmarked_input_is_topic(
            first in "[A-Za-z ,?']{0,40}",
            second in proptest::option::of("[A-Za-z ,?']{0,40}"),
        ) {
            let text = match second {
                Some(second) => format!("{}\n{}", first, second),
                None => first,
            };
            prop_assert_eq!(classify(&text), InputShape::SimpleTopic);
        }

        #[test]
        fn prop_mostly_bulleted_is_list(
            bulleted in 7usize..40,
            plain in 0usize..3,
        ) {
            prop_assert_eq!(classify(&list_with(bulleted, plain)), InputShape::BulletedList);
        }
    }
}
