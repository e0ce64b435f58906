//! Actuator configuration.
//!
//! Settings are read from environment variables:
//! - `PROVISION_FORMAT`: `ignition` (default) or `script`
//! - `IGNITION_VERSION`: `2.3.0` (default) or `3.3.0`
//! - `UNITS_PATH`: directory unit files are written to by scripts
//! - `RESOLVE_SECRETS`: `true` to read secret-backed file content from the cluster

use crate::error::ControllerError;
use crate::render::script::DEFAULT_UNITS_PATH;
use ignition::Version;
use std::env;
use std::str::FromStr;

/// Output format of user data for `provision` configs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvisionFormat {
    /// Ignition JSON for Flatcar images
    #[default]
    Ignition,
    /// Bash bootstrap script
    Script,
}

impl FromStr for ProvisionFormat {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignition" => Ok(ProvisionFormat::Ignition),
            "script" | "cloud-init" => Ok(ProvisionFormat::Script),
            other => Err(ControllerError::InvalidConfig(format!(
                "PROVISION_FORMAT must be 'ignition' or 'script', got {:?}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorConfig {
    pub provision_format: ProvisionFormat,
    pub ignition_version: Version,
    pub units_path: String,
    pub resolve_secrets: bool,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            provision_format: ProvisionFormat::default(),
            ignition_version: Version::default(),
            units_path: DEFAULT_UNITS_PATH.to_string(),
            resolve_secrets: false,
        }
    }
}

impl ActuatorConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary key lookup; unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(format) = lookup("PROVISION_FORMAT") {
            config.provision_format = format.parse()?;
        }
        if let Some(version) = lookup("IGNITION_VERSION") {
            config.ignition_version = version.parse().map_err(|e: ignition::IgnitionError| {
                ControllerError::InvalidConfig(format!("IGNITION_VERSION: {}", e))
            })?;
        }
        if let Some(path) = lookup("UNITS_PATH") {
            if !path.starts_with('/') {
                return Err(ControllerError::InvalidConfig(format!(
                    "UNITS_PATH must be absolute, got {:?}",
                    path
                )));
            }
            config.units_path = path;
        }
        if let Some(flag) = lookup("RESOLVE_SECRETS") {
            config.resolve_secrets = flag.parse().map_err(|_| {
                ControllerError::InvalidConfig(format!(
                    "RESOLVE_SECRETS must be 'true' or 'false', got {:?}",
                    flag
                ))
            })?;
        }

        Ok(config)
    }
}
