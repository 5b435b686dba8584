//! Shared utility functions for response parsing and text handling.
//!
//! ## JSON Extraction Helpers
//!
//! Provides ergonomic helpers for extracting values from `serde_json::Value`:
//! - `json_string` - Extract strings
//! - `json_string_array` - Extract string arrays

use sha2::{Digest, Sha256};

// =============================================================================
// JSON Value Extraction Helpers
// =============================================================================

/// Extract string from JSON value by key.
///
/// Replaces verbose `v.get("key")?.as_str()?.to_string()` patterns.
#[inline]
pub fn json_string(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(String::from)
}

/// Extract string array from JSON value by key.
#[inline]
pub fn json_string_array(value: &serde_json::Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|s| s.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// String Utilities
// =============================================================================

/// Take at most `max` characters (not bytes) from the start of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// First `len` hex characters of the SHA-256 digest of `input`.
pub fn short_hash(input: &str, len: usize) -> String {
    let digest = format!("{:x}", Sha256::digest(input.as_bytes()));
    digest.chars().take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_string_array_skips_non_strings() {
        let value = json!({"bullets": ["a", 3, "b", null]});
        assert_eq!(json_string_array(&value, "bullets"), vec!["a", "b"]);
        assert!(json_string_array(&value, "missing").is_empty());
    }

    #[test]
    fn test_json_string() {
        let value = json!({"speaker_notes": "Say hello"});
        assert_eq!(json_string(&value, "speaker_notes").as_deref(), Some("Say hello"));
        assert_eq!(json_string(&value, "other"), None);
    }

    #[test]
    fn test_truncate_chars_is_char_aware() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 20), "short");
    }

    #[test]
    fn test_short_hash_is_stable() {
        let a = short_hash("Machine Learning", 8);
        assert_eq!(a.len(), 8);
        assert_eq!(a, short_hash("Machine Learning", 8));
        assert_ne!(a, short_hash("Machine learning", 8));
    }
}
