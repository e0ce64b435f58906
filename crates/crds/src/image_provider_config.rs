//! ImageProviderConfig
//!
//! Metal provider settings passed through `OperatingSystemConfig.spec.providerConfig`.
//! Only the network isolation block is consumed by the os-metal extension.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API group of the metal provider configuration types
pub const METAL_PROVIDER_GROUP: &str = "metal.provider.extensions.gardener.cloud";

/// Kind expected in a decoded provider config
pub const IMAGE_PROVIDER_CONFIG_KIND: &str = "ImageProviderConfig";

/// Errors from decoding `providerConfig`
#[derive(Debug, Error)]
pub enum ProviderConfigError {
    #[error("unable to decode providerConfig: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unable to decode providerConfig: unexpected kind {0:?}")]
    UnexpectedKind(String),

    #[error("unable to decode providerConfig: unexpected apiVersion {0:?}")]
    UnexpectedApiVersion(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Egress restrictions of an isolated cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_isolation: Option<NetworkIsolation>,
}

impl ImageProviderConfig {
    /// Decodes a raw provider config blob.
    ///
    /// `kind` and `apiVersion` are optional, but when present they have to
    /// name this type.
    pub fn decode(raw: &serde_json::Value) -> Result<Self, ProviderConfigError> {
        let config: ImageProviderConfig = serde_json::from_value(raw.clone())?;

        if let Some(kind) = &config.kind {
            if kind != IMAGE_PROVIDER_CONFIG_KIND {
                return Err(ProviderConfigError::UnexpectedKind(kind.clone()));
            }
        }
        if let Some(api_version) = &config.api_version {
            let group = api_version.split('/').next().unwrap_or_default();
            if group != METAL_PROVIDER_GROUP {
                return Err(ProviderConfigError::UnexpectedApiVersion(api_version.clone()));
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkIsolation {
    #[serde(default)]
    pub allowed_networks: AllowedNetworks,

    /// DNS servers reachable from the isolated cluster
    #[serde(default)]
    pub dns_servers: Vec<String>,

    /// NTP servers reachable from the isolated cluster
    #[serde(default)]
    pub ntp_servers: Vec<String>,

    /// Registries that mirror public registries
    #[serde(default)]
    pub registry_mirrors: Vec<RegistryMirror>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllowedNetworks {
    #[serde(default)]
    pub ingress: Vec<String>,

    #[serde(default)]
    pub egress: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMirror {
    /// Human readable name
    #[serde(default)]
    pub name: String,

    /// Mirror URL including scheme, e.g. `https://r.metal-stack.dev`
    pub endpoint: String,

    #[serde(default)]
    pub ip: String,

    #[serde(default)]
    pub port: i32,

    /// Registries served by this mirror, e.g. `docker.io`
    #[serde(default)]
    pub mirror_of: Vec<String>,
}
