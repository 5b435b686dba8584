//! Deterministic placeholder content used when generation is unavailable.

use crate::constants::images::{PLACEHOLDER_SPEC, PLACEHOLDER_TITLE_CHARS};
use crate::types::truncate_chars;

pub fn bullets(title: &str) -> Vec<String> {
    vec![
        format!("Key insight about {}", title),
        format!("Important consideration for {}", title),
        format!("Practical application of {}", title),
    ]
}

/// Existing bullets when there are any, generic ones otherwise
pub fn bullets_or_existing(title: &str, existing: &[String]) -> Vec<String> {
    if existing.is_empty() {
        bullets(title)
    } else {
        existing.to_vec()
    }
}

pub fn speaker_notes(title: &str) -> String {
    format!(
        "When presenting this slide, emphasize the key concepts of {} and how they relate to the overall topic.",
        title
    )
}

pub fn image_prompt(title: &str) -> String {
    format!("Professional icon representing {}", title)
}

/// Placeholder image URL carrying the start of the title as its text
pub fn image_url(base: &str, title: &str) -> String {
    let text: String =
        url::form_urlencoded::byte_serialize(truncate_chars(title, PLACEHOLDER_TITLE_CHARS).as_bytes())
            .collect();
    format!("{}/{}?text={}", base.trim_end_matches('/'), PLACEHOLDER_SPEC, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::images::PLACEHOLDER_BASE;

    #[test]
    fn test_placeholder_bullets() {
        assert_eq!(
            bullets("Rust"),
            vec![
                "Key insight about Rust",
                "Important consideration for Rust",
                "Practical application of Rust"
            ]
        );
    }

    #[test]
    fn test_existing_bullets_preferred() {
        let existing = vec!["Keep me".to_string()];
        assert_eq!(bullets_or_existing("Rust", &existing), existing);
        assert_eq!(bullets_or_existing("Rust", &[]).len(), 3);
    }

    #[test]
    fn test_notes_and_prompt() {
        assert!(speaker_notes("Ownership").contains("key concepts of Ownership"));
        assert_eq!(image_prompt("Ownership"), "Professional icon representing Ownership");
    }

    #[test]
    fn test_image_url_encodes_and_truncates_title() {
        let url = image_url(PLACEHOLDER_BASE, "Machine Learning in Production");
        assert_eq!(
            url,
            "https://via.placeholder.com/800x450/4A90E2/FFFFFF?text=Machine+Learning+in+"
        );

        let url = image_url("http://img.local/", "Q&A");
        assert_eq!(url, "http://img.local/800x450/4A90E2/FFFFFF?text=Q%26A");
    }
}
