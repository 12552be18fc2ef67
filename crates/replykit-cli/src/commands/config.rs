// Rust guideline compliant 2026-10-16

//! Implementation of the `rkit config` command.

use crate::load_config;
use anyhow::Result;
use std::path::Path;

/// Prints the effective configuration.
///
/// # Arguments
///
/// * `file` - Config file to read instead of `replykit.toml`
/// * `as_toml` - Print TOML instead of JSON
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, fails validation,
/// or cannot be rendered.
pub fn execute(file: Option<&Path>, as_toml: bool) -> Result<()> {
    let config = load_config(file)?;
    if as_toml {
        print!("{}", config.to_toml()?);
    } else {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
