//! List marker recognition shared by the classifier, extractor and builders.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::outline::BULLET_MARKERS;

/// One leading bullet marker plus any whitespace after it
static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*\-•]\s*").expect("bullet prefix pattern is valid"));

/// One leading `digits.` marker followed by whitespace (or nothing)
static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.(?:\s+|$)").expect("numeric prefix pattern is valid"));

/// A `digits.` marker at the start of any line, followed by whitespace or
/// line end. Version numbers such as `3.12` do not match.
static NUMERIC_LINE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\d+\.(?:\s|$)").expect("numeric marker pattern is valid")
});

/// Count of leading whitespace characters.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Whether an already-trimmed line begins with a bullet marker.
pub fn starts_with_bullet(trimmed: &str) -> bool {
    trimmed.starts_with(BULLET_MARKERS)
}

/// Remove at most one leading marker from an already-trimmed line.
///
/// Bullet markers take priority over numeric markers.
pub fn strip_marker(trimmed: &str) -> &str {
    if let Some(m) = BULLET_PREFIX.find(trimmed) {
        return &trimmed[m.end()..];
    }
    if let Some(m) = NUMERIC_PREFIX.find(trimmed) {
        return &trimmed[m.end()..];
    }
    trimmed
}

/// Whether an already-trimmed line carries a bullet or numeric marker.
pub fn is_marked(trimmed: &str) -> bool {
    BULLET_PREFIX.is_match(trimmed) || NUMERIC_PREFIX.is_match(trimmed)
}

/// Whether a bullet marker appears anywhere in the text, or a numeric
/// marker opens any of its lines.
pub fn contains_list_marker(text: &str) -> bool {
    text.contains(BULLET_MARKERS) || NUMERIC_LINE_START.is_match(text)
}
