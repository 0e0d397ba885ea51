//! Error types for cardkit-core

use thiserror::Error;

/// Result type alias using cardkit-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cardkit-core operations
///
/// Card session transitions never fail; invalid transitions are ignored.
/// These errors cover model validation and configuration loading only.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
