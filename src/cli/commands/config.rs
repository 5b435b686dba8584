//! Config Command
//!
//! Manage deckweave configuration.
//!
//! Usage:
//!   deckweave config show [-f json]
//!   deckweave config path
//!   deckweave config init [-g] [--force]

use crate::cli::ui::Output;
use crate::config::{ConfigFormat, ConfigLoader};
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(format: ConfigFormat) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", ConfigLoader::render(&config, format)?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    let output = Output::new();
    output.header("Configuration paths");

    let mark = |exists: bool| if exists { "✓" } else { "✗" };
    match ConfigLoader::global_config_path() {
        Some(global) => output.key_value(
            "Global",
            &format!("{} {}", mark(global.exists()), global.display()),
        ),
        None => output.key_value("Global", "(not available)"),
    }

    let project = ConfigLoader::project_config_path();
    output.key_value(
        "Project",
        &format!("{} {}", mark(project.exists()), project.display()),
    );
    Ok(())
}

/// Write a default config file (project unless `global`)
pub fn init(global: bool, force: bool) -> Result<()> {
    let (path, created) = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    let output = Output::new();
    if created {
        output.success(&format!("Created {}", path.display()));
    } else {
        output.info(&format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    Ok(())
}
