//! Prompt building utilities for LLM providers.
//!
//! Shared helpers for attaching JSON schema instructions to prompts.

use serde_json::Value;

const SYSTEM_ROLE: &str = "You are a presentation designer. Always respond with valid JSON.";

/// System message for chat-style providers.
pub fn system_prompt(schema: &Value) -> String {
    if schema.is_null() {
        return SYSTEM_ROLE.to_string();
    }
    format!("{}\n\n{}", SYSTEM_ROLE, schema_instructions(schema))
}

/// Append schema instructions to a single-turn prompt.
///
/// Used by providers without a separate system message (Ollama).
/// Returns the original prompt if schema is null.
pub fn build_schema_prompt(user_prompt: &str, schema: &Value) -> String {
    if schema.is_null() {
        return user_prompt.to_string();
    }
    format!("{}\n\n---\n\n{}", user_prompt, schema_instructions(schema))
}

fn schema_instructions(schema: &Value) -> String {
    let schema_str = serde_json::to_string_pretty(schema).unwrap_or_default();
    format!(
        "Respond with valid JSON matching this schema:\n```json\n{}\n```\n\nRespond ONLY with valid JSON, no explanation.",
        schema_str
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_schema_prompt_null_schema() {
        let prompt = "Write bullets";
        assert_eq!(build_schema_prompt(prompt, &Value::Null), prompt);
        assert_eq!(system_prompt(&Value::Null), SYSTEM_ROLE);
    }

    #[test]
    fn test_build_schema_prompt_with_schema() {
        let schema = json!({"type": "object", "properties": {"bullets": {"type": "array"}}});
        let result = build_schema_prompt("Write bullets", &schema);

        assert!(result.starts_with("Write bullets"));
        assert!(result.contains("\"bullets\""));
        assert!(system_prompt(&schema).contains("presentation designer"));
    }
}
