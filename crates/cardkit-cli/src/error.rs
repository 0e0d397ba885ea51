use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] cardkit_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid script: {0}")]
    Script(String),
    #[error("Step {step}: no attachment named '{name}'")]
    UnknownAttachment { step: usize, name: String },
    #[error("Step {0}: remove_file needs an id or a name")]
    MissingAttachmentRef(usize),
}
