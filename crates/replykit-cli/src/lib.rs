// Rust guideline compliant 2026-10-16

//! Replykit CLI library.
//!
//! Exposes the `rkit` commands for use in tests and external code.

pub mod commands;

use anyhow::{Context, Result};
use replykit_core::RuntimeConfig;
use std::path::{Path, PathBuf};

/// Config file read when `--file` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "replykit.toml";

/// Loads the effective configuration: file, then `REPLYKIT_` overrides.
///
/// # Errors
///
/// Returns an error if the file is unreadable or the result is invalid.
pub fn load_config(file: Option<&Path>) -> Result<RuntimeConfig> {
    let path = file.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
    RuntimeConfig::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}
