//! Prompt Builder System
//!
//! Standardized prompt construction for slide enrichment calls.
//! Every enrichment kind shares the same layout so responses stay comparable:
//!
//! 1. **Role**: presentation designer persona
//! 2. **Objectives**: numbered goals for the call
//! 3. **Context**: slide title and existing content, in insertion order
//! 4. **Constraints**: length and tone restrictions
//!
//! The matching JSON schema for each kind lives in [`SlidePrompts`].

use serde_json::{Value, json};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Ordered key-value context
    Context(Vec<(String, String)>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Constraints the response must respect
    Constraints(Vec<String>),
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Add objectives section
    pub fn objectives(mut self, objectives: &[&str]) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Add a context item, appending to the existing context section
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let item = (key.to_string(), value.to_string());
        let existing = self.sections.iter_mut().find_map(|section| match section {
            PromptSection::Context(items) => Some(items),
            _ => None,
        });
        match existing {
            Some(items) => items.push(item),
            None => self.sections.push(PromptSection::Context(vec![item])),
        }
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add constraints section
    pub fn constraints(mut self, constraints: &[&str]) -> Self {
        self.sections.push(PromptSection::Constraints(
            constraints.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str("<ROLE>\n");
                    prompt.push_str(&format!("You are an expert {} {}.\n", expertise, task));
                    prompt.push_str("</ROLE>\n\n");
                }
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("<OBJECTIVES>\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push_str("</OBJECTIVES>\n\n");
                }
                PromptSection::Context(items) => {
                    prompt.push_str("# Slide\n\n");
                    for (key, value) in items {
                        prompt.push_str(&format!("**{}**: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Constraints(constraints) => {
                    prompt.push_str("<CONSTRAINTS>\n");
                    for constraint in constraints {
                        prompt.push_str(&format!("- {}\n", constraint));
                    }
                    prompt.push_str("</CONSTRAINTS>\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

// =============================================================================
// Slide Prompts
// =============================================================================

/// Prompt and schema pairs for each enrichment kind
pub struct SlidePrompts;

impl SlidePrompts {
    /// Bullet points for a slide, refining any existing ones
    pub fn bullets(title: &str, existing: &[String]) -> (String, Value) {
        let mut builder = PromptBuilder::new()
            .role("presentation designer", "writing concise slide content")
            .objectives(&[
                "Write 3-5 bullet points for the slide below",
                "Keep each bullet short and specific to the slide title",
            ])
            .context_item("Title", title);

        if !existing.is_empty() {
            builder = builder
                .section("Existing bullets", &bullet_list(existing))
                .constraints(&["Expand or refine the existing bullets rather than replacing their meaning"]);
        }

        let prompt = builder
            .constraints(&["No numbering or bullet characters inside the strings"])
            .build();

        let schema = json!({
            "type": "object",
            "properties": {
                "bullets": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1,
                    "maxItems": 5
                }
            },
            "required": ["bullets"]
        });

        (prompt, schema)
    }

    /// Speaker notes for a slide
    pub fn speaker_notes(title: &str, bullets: &[String]) -> (String, Value) {
        let prompt = PromptBuilder::new()
            .role("presentation coach", "writing speaker notes")
            .objectives(&["Write speaker notes for presenting the slide below"])
            .context_item("Title", title)
            .section("Bullets", &bullet_list(bullets))
            .constraints(&[
                "2-3 sentences",
                "Conversational tone, as the presenter would say it",
            ])
            .build();

        let schema = json!({
            "type": "object",
            "properties": {"speaker_notes": {"type": "string"}},
            "required": ["speaker_notes"]
        });

        (prompt, schema)
    }

    /// Short visual description used to acquire an image
    pub fn image_prompt(title: &str, bullets: &[String]) -> (String, Value) {
        let prompt = PromptBuilder::new()
            .role("visual designer", "choosing imagery for slides")
            .objectives(&["Describe one simple image that illustrates the slide below"])
            .context_item("Title", title)
            .context_item("Key points", &bullets.join("; "))
            .constraints(&["1-2 sentences", "No text inside the image"])
            .build();

        let schema = json!({
            "type": "object",
            "properties": {"image_prompt": {"type": "string"}},
            "required": ["image_prompt"]
        });

        (prompt, schema)
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
