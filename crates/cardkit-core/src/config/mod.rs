//! Card configuration.
//!
//! Provides `CardConfig`, the text and timing knobs shared by the desktop
//! shell and the CLI. Every field has a default so an empty JSON object is a
//! valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_FOCUS_DELAY_MS: u64 = 50;
const DEFAULT_TITLE_PLACEHOLDER: &str = "Item title";
const DEFAULT_DESCRIPTION_PLACEHOLDER: &str = "Item description";
const DEFAULT_EMPTY_TEXT: &str = "N/A";
const DEFAULT_EMPTY_ATTACHMENTS_TEXT: &str = "No files attached";
const DEFAULT_DISCARD_PROMPT: &str =
    "You have unsaved changes. Are you sure you want to cancel? Your changes will be lost.";

/// Text and timing configuration for item cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Delay before focusing the title field after entering edit mode, so the
    /// view can re-render as editable first.
    pub focus_delay_ms: u64,
    /// Hint shown in an empty title field while editing.
    pub title_placeholder: String,
    /// Hint shown in an empty description field while editing.
    pub description_placeholder: String,
    /// Text shown for an empty title or description while viewing.
    pub empty_text: String,
    /// Message shown when the expanded attachment panel has no files.
    pub empty_attachments_text: String,
    /// Prompt used to confirm discarding unsaved edits.
    pub discard_prompt: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            focus_delay_ms: DEFAULT_FOCUS_DELAY_MS,
            title_placeholder: DEFAULT_TITLE_PLACEHOLDER.to_string(),
            description_placeholder: DEFAULT_DESCRIPTION_PLACEHOLDER.to_string(),
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            empty_attachments_text: DEFAULT_EMPTY_ATTACHMENTS_TEXT.to_string(),
            discard_prompt: DEFAULT_DISCARD_PROMPT.to_string(),
        }
    }
}

impl CardConfig {
    /// Parse and validate a configuration from a JSON payload.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|error| Error::Config(format!("invalid card config JSON: {error}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let payload = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&payload)?;
        tracing::debug!(path = %path.display(), "Loaded card config");
        Ok(config)
    }

    /// Load a configuration file if it exists, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No card config found, using defaults");
            Ok(Self::default())
        }
    }

    /// Check that every text is non-blank and the focus delay is sane.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title_placeholder", &self.title_placeholder),
            ("description_placeholder", &self.description_placeholder),
            ("empty_text", &self.empty_text),
            ("empty_attachments_text", &self.empty_attachments_text),
            ("discard_prompt", &self.discard_prompt),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!(
                    "card config field '{field}' must not be empty"
                )));
            }
        }
        if self.focus_delay_ms > 5_000 {
            return Err(Error::Config(format!(
                "card config focus_delay_ms is too large: {}",
                self.focus_delay_ms
            )));
        }
        Ok(())
    }
}
