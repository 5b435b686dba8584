//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/deckweave/config.toml)
//! 3. Project config (.deckweave/config.toml)
//! 4. Environment variables (DECKWEAVE_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{DeckError, Result};

const ENV_PREFIX: &str = "DECKWEAVE_";

/// Rendering format for `config show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_layered(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load from explicit global/project files plus the environment
    pub fn load_layered(global: Option<&Path>, project: &Path) -> Result<Config> {
        let config: Config = Self::figment(global, project)
            .extract()
            .map_err(|e| DeckError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn figment(global: Option<&Path>, project: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // DECKWEAVE_LLM_MAX_TOKENS -> llm.max_tokens: only the first
        // underscore separates the section from the key
        figment.merge(
            Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replacen('_', ".", 1).into()),
        )
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/deckweave/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("deckweave"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project config directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".deckweave")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Render an effective configuration (API keys are never included)
    pub fn render(config: &Config, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| DeckError::Config(e.to_string()))
            }
        }
    }

    /// Write a default config file into `dir`, returning its path.
    ///
    /// An existing file is kept unless `force` is set.
    pub fn init_in(dir: &Path, force: bool) -> Result<(PathBuf, bool)> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if config_path.exists() && !force {
            info!("Config exists: {}", config_path.display());
            return Ok((config_path, false));
        }

        fs::write(&config_path, Self::default_config_file()?)?;
        info!("Created config: {}", config_path.display());
        Ok((config_path, true))
    }

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<(PathBuf, bool)> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            DeckError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::init_in(&global_dir, force)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<(PathBuf, bool)> {
        Self::init_in(&Self::project_dir(), force)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Default config file content: a header plus the serialized defaults
    fn default_config_file() -> Result<String> {
        let body = Self::render(&Config::default(), ConfigFormat::Toml)?;
        Ok(format!(
            "# deckweave configuration\n\
             # Project settings in .deckweave/config.toml override the global file;\n\
             # DECKWEAVE_<SECTION>_<KEY> environment variables override both.\n\
             # The OpenAI API key is read from OPENAI_API_KEY.\n\n{}",
            body
        ))
    }
}
