//! Card configuration lookup for the CLI.

use std::path::{Path, PathBuf};

use cardkit_core::CardConfig;

use crate::error::CliError;

/// `$CONFIG_DIR/cardkit/config.json`, when a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cardkit").join("config.json"))
}

/// An explicit `--config` must exist; the default location is optional.
pub fn resolve_card_config(explicit: Option<&Path>) -> Result<CardConfig, CliError> {
    if let Some(path) = explicit {
        return Ok(CardConfig::load(path)?);
    }
    match default_config_path() {
        Some(path) => Ok(CardConfig::load_or_default(&path)?),
        None => Ok(CardConfig::default()),
    }
}
