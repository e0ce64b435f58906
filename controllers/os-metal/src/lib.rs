//! os-metal OperatingSystemConfig actuator
//!
//! Translates Gardener OperatingSystemConfigs for metal-stack machines:
//! - `provision`: renders user data (Ignition or a bash bootstrap script)
//!   from the configured files and units plus the provider overlay
//! - `reconcile`: returns the provider overlay as extension files for the
//!   node agent to apply on running machines
//!
//! The overlay carries the containerd configuration and, for
//! network-isolated clusters, DNS, NTP and registry mirror settings.

pub mod actuator;
pub mod config;
pub mod content;
pub mod error;
pub mod merge;
pub mod overlay;
pub mod render;

#[cfg(test)]
mod test_utils;

pub use actuator::{Actuator, ReconcileOutput};
pub use config::{ActuatorConfig, ProvisionFormat};
pub use content::{ContentResolver, InlineOnlyResolver, KubeSecretResolver, ResolvedFile};
pub use error::ControllerError;
