//! CLI Common Utilities
//!
//! Input resolution and configuration loading shared by command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::config::{Config, ConfigLoader};
use crate::types::{DeckError, Result};

/// Provider and model overrides from command-line flags
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl LlmOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(provider) = &self.provider {
            config.llm.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
        }
    }
}

/// Load layered configuration, apply CLI overrides, and validate the result
pub fn load_config(overrides: &LlmOverrides) -> Result<Config> {
    let mut config = ConfigLoader::load()?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Resolve the input text from an argument, a file, or piped stdin
pub fn read_input(text: Option<String>, input: Option<&Path>) -> Result<String> {
    match (text, input) {
        (Some(_), Some(_)) => Err(DeckError::InvalidInput(
            "pass either TEXT or --input, not both".to_string(),
        )),
        (Some(text), None) => Ok(text),
        (None, Some(path)) => read_input_file(path),
        (None, None) => read_stdin(),
    }
}

fn read_input_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DeckError::NotFound(format!("cannot read {}: {}", path.display(), e)))
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(DeckError::InvalidInput(
            "no input: pass TEXT, --input FILE, or pipe text on stdin".to_string(),
        ));
    }

    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}
