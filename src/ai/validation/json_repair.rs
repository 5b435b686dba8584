//! JSON Repair Mechanism
//!
//! Extraction and light repair of JSON returned by text-generation models.
//!
//! Handles the common failure shapes:
//! - Markdown code fence wrapping (```json ... ```)
//! - Trailing commas before a closer
//! - Output truncated before its closing brackets
//! - JSON embedded in explanatory text

use serde_json::Value;
use tracing::debug;

use crate::types::{DeckError, Result};

/// Extract and parse JSON from a model response
pub fn extract_json_from_response(content: &str) -> Result<Value> {
    JsonRepairer.parse_or_repair(content).map(|(value, _)| value)
}

/// JSON repair strategies
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepairer;

impl JsonRepairer {
    /// Parse JSON, attempting repair if the initial parse fails.
    ///
    /// Returns `(value, was_repaired)`.
    pub fn parse_or_repair(&self, raw: &str) -> Result<(Value, bool)> {
        let cleaned = preprocess(raw);

        if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
            return Ok((value, false));
        }

        debug!("Initial JSON parse failed, attempting repair");

        let candidates = [
            embedded_json(cleaned).map(str::to_string),
            Some(balance_brackets(&strip_trailing_commas(cleaned))),
        ];

        for candidate in candidates.into_iter().flatten() {
            if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
                debug!("JSON repaired");
                return Ok((value, true));
            }
            let relaxed = balance_brackets(&strip_trailing_commas(&candidate));
            if let Ok(value) = serde_json::from_str::<Value>(&relaxed) {
                debug!("JSON repaired");
                return Ok((value, true));
            }
        }

        Err(DeckError::LlmApi(format!(
            "Failed to parse JSON response. Content preview: {}...",
            cleaned.chars().take(200).collect::<String>()
        )))
    }
}

/// Trim whitespace, BOM and markdown code fences
fn preprocess(raw: &str) -> &str {
    let mut s = raw.trim().trim_start_matches('\u{feff}');

    if s.starts_with("```") {
        s = s.split_once('\n').map_or("", |(_, rest)| rest);
    }
    if let Some(stripped) = s.trim_end().strip_suffix("```") {
        s = stripped;
    }

    s.trim()
}

/// Walk `s` outside of string literals, calling `f` with each byte index and
/// structural character.
fn scan_structure(s: &str, mut f: impl FnMut(usize, char) -> bool) -> bool {
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            _ => {
                if !f(i, ch) {
                    break;
                }
            }
        }
    }

    in_string
}

/// Remove commas directly followed (modulo whitespace) by `]` or `}`
fn strip_trailing_commas(s: &str) -> String {
    let mut skip = Vec::new();
    scan_structure(s, |i, ch| {
        if ch == ','
            && s[i + 1..]
                .trim_start()
                .starts_with([']', '}'])
        {
            skip.push(i);
        }
        true
    });

    s.char_indices()
        .filter(|(i, _)| !skip.contains(i))
        .map(|(_, ch)| ch)
        .collect()
}

/// Close an unterminated string and any unclosed brackets, innermost first
fn balance_brackets(s: &str) -> String {
    let mut open = Vec::new();
    let in_string = scan_structure(s, |_, ch| {
        match ch {
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                open.pop();
            }
            _ => {}
        }
        true
    });

    let mut result = s.to_string();
    if in_string {
        result.push('"');
    }
    result.extend(open.iter().rev());
    result
}

/// The first balanced `{...}` or `[...]` block inside mixed content
fn embedded_json(s: &str) -> Option<&str> {
    let start = s.find(['{', '['])?;
    let body = &s[start..];

    let mut depth = 0usize;
    let mut end = None;
    scan_structure(body, |i, ch| {
        match ch {
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    end = Some(i + 1);
                    return false;
                }
            }
            _ => {}
        }
        true
    });

    end.map(|end| &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let (value, repaired) = JsonRepairer.parse_or_repair(r#"{"bullets": ["a"]}"#).unwrap();
        assert!(!repaired);
        assert_eq!(value["bullets"][0], "a");
    }

    #[test]
    fn test_strip_code_fences() {
        let input = "```json\n{\"speaker_notes\": \"Hello\"}\n```";
        let (value, repaired) = JsonRepairer.parse_or_repair(input).unwrap();
        assert!(!repaired);
        assert_eq!(value["speaker_notes"], "Hello");
    }

    #[test]
    fn test_fix_trailing_comma() {
        let input = r#"{"bullets": ["a", "b",]}"#;
        let (value, repaired) = JsonRepairer.parse_or_repair(input).unwrap();
        assert!(repaired);
        assert_eq!(value["bullets"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_truncated_output_closed() {
        let input = r#"{"bullets": ["one", "two"#;
        let (value, repaired) = JsonRepairer.parse_or_repair(input).unwrap();
        assert!(repaired);
        assert_eq!(value["bullets"][1], "two");
    }

    #[test]
    fn test_extract_from_mixed() {
        let input = "Sure! Here you go:\n{\"image_prompt\": \"A lighthouse\"}\nEnjoy.";
        let (value, repaired) = JsonRepairer.parse_or_repair(input).unwrap();
        assert!(repaired);
        assert_eq!(value["image_prompt"], "A lighthouse");
    }

    #[test]
    fn test_commas_inside_strings_untouched() {
        let input = r#"{"speaker_notes": "First, ]second",}"#;
        let (value, _) = JsonRepairer.parse_or_repair(input).unwrap();
        assert_eq!(value["speaker_notes"], "First, ]second");
    }

    #[test]
    fn test_unparseable_is_error() {
        let err = extract_json_from_response("no json here at all").unwrap_err();
        assert!(matches!(err, DeckError::LlmApi(_)));
    }
}
