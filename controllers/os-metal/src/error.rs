//! Controller-specific error types.
//!
//! This module defines error types specific to the os-metal actuator
//! that are not covered by upstream library errors.

use crds::{CodecError, ProviderConfigError};
use ignition::IgnitionError;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors that can occur in the os-metal actuator.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Provider config could not be decoded
    #[error(transparent)]
    ProviderConfig(#[from] ProviderConfigError),

    /// Inline file content could not be decoded
    #[error("unable to decode content of {path}: {source}")]
    Content {
        path: String,
        #[source]
        source: CodecError,
    },

    /// Secret referenced by a file does not exist or lacks the key
    #[error("could not read file content from secret {namespace}/{name}: {reason}")]
    SecretContent {
        namespace: String,
        name: String,
        reason: String,
    },

    /// Ignition rendering error
    #[error("could not generate cloud config: {0}")]
    Ignition(#[from] IgnitionError),

    /// Manifest decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
