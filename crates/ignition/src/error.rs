//! Ignition errors

use thiserror::Error;

/// Errors that can occur while building an Ignition document
#[derive(Debug, Error)]
pub enum IgnitionError {
    /// The document failed validation
    #[error("could not transpile ignition config: {0}")]
    Invalid(String),

    /// The ignition version string is not supported
    #[error("unsupported ignition version: {0}")]
    UnsupportedVersion(String),

    /// A data URL could not be decoded
    #[error("invalid data url: {0}")]
    DataUrl(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
