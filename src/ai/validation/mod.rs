//! Model response validation.
//!
//! Responses are parsed leniently here; field-level checks (non-empty
//! bullet lists, non-blank notes) belong to the enricher that asked.

mod json_repair;

pub use json_repair::{JsonRepairer, extract_json_from_response};
