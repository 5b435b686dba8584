//! Section Extractor
//!
//! Turns raw outline lines into ordered [`OutlineSection`]s using indentation
//! depth. Lines indented by at most [`SECTION_INDENT_THRESHOLD`] columns open
//! a new section; deeper lines become sub-points of the open section.
//!
//! The open section is a local accumulator, so extraction is a pure function
//! of its input.

use tracing::debug;

use super::markers::{indentation, strip_marker};
use crate::constants::outline::SECTION_INDENT_THRESHOLD;
use crate::types::OutlineSection;

/// Extract ordered sections from raw (untrimmed) lines.
///
/// A sub-point that appears before any section is discarded.
pub fn extract_sections<'a, I>(lines: I) -> Vec<OutlineSection>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sections = Vec::new();
    let mut current: Option<OutlineSection> = None;

    for line in lines {
        let depth = indentation(line);
        let content = strip_marker(line.trim());
        if content.is_empty() {
            continue;
        }

        if depth <= SECTION_INDENT_THRESHOLD {
            sections.extend(current.replace(OutlineSection::top_level(content)));
        } else if let Some(section) = current.as_mut() {
            section.sub_points.push(content.to_string());
        } else {
            debug!(sub_point = content, "Discarding sub-point with no open section");
        }
    }

    sections.extend(current);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extract(text: &str) -> Vec<OutlineSection> {
        extract_sections(text.lines())
    }

    #[test]
    fn test_basic_outline() {
        let text = "Intro\n    - Why it matters\n    - Who cares\nDetails\n    * First\n";
        let sections = extract(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Intro");
        assert_eq!(sections[0].sub_points, vec!["Why it matters", "Who cares"]);
        assert_eq!(sections[1].title, "Details");
        assert_eq!(sections[1].sub_points, vec!["First"]);
        assert!(sections.iter().all(|s| s.depth == 0));
    }

    #[test]
    fn test_sub_point_before_any_section_is_discarded() {
        assert!(extract("      - orphan").is_empty());

        let sections = extract("    - orphan\nTitle\n    - kept");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].sub_points, vec!["kept"]);
    }

    #[test]
    fn test_indent_threshold_is_inclusive() {
        let sections = extract("First\n  Second\n   third");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].title, "Second");
        assert_eq!(sections[1].sub_points, vec!["third"]);
    }

    #[test]
    fn test_tabs_count_as_one_column() {
        // Two tabs are two columns: still a section
        let sections = extract("A\n\t\tB\n\t\t\tc");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].sub_points, vec!["c"]);
    }

    #[test]
    fn test_numeric_markers_stripped() {
        let sections = extract("1. Setup\n    1. Install\n    2. Configure\n2. Usage");
        assert_eq!(sections[0].title, "Setup");
        assert_eq!(sections[0].sub_points, vec!["Install", "Configure"]);
        assert_eq!(sections[1].title, "Usage");
    }

    #[test]
    fn test_marker_only_lines_skipped() {
        let sections = extract("Title\n    -\n    2.\n    - real");
        assert_eq!(sections[0].sub_points, vec!["real"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "A\n    - a1\nB\n    - b1\n    - b2";
        assert_eq!(extract(text), extract(text));
    }

    fn marker() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("- "), Just("* "), Just("• "), Just("1. "), Just("")]
    }

    proptest! {
        #[test]
        fn prop_sections_and_sub_points_keep_order(
            titles in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,15}[A-Za-z]", 1..6),
            subs in 0usize..5,
            title_marker in marker(),
            sub_marker in marker(),
        ) {
            let mut lines = Vec::new();
            for title in &titles {
                lines.push(format!("{}{}", title_marker, title));
                for k in 0..subs {
                    lines.push(format!("    {}{} point {}", sub_marker, title, k));
                }
            }
            let sections = extract_sections(lines.iter().map(String::as_str));

            prop_assert_eq!(sections.len(), titles.len());
            for (section, title) in sections.iter().zip(&titles) {
                prop_assert_eq!(&section.title, title);
                prop_assert_eq!(section.sub_points.len(), subs);
                for (k, sub) in section.sub_points.iter().enumerate() {
                    prop_assert_eq!(sub, &format!("{} point {}", title, k));
                }
            }
        }
    }
}
