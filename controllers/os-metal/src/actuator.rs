//! OperatingSystemConfig actuator.
//!
//! Maps an OperatingSystemConfig to the user data a machine boots with
//! (`provision`) or to the extension files and units applied on running
//! nodes (`reconcile`).

use crate::config::{ActuatorConfig, ProvisionFormat};
use crate::content::{ContentResolver, resolve_files};
use crate::error::ControllerError;
use crate::merge::ensure_files;
use crate::overlay::Overlay;
use crate::render::{ScriptRenderer, render_ignition};
use crds::{
    File, ImageProviderConfig, NetworkIsolation, OperatingSystemConfig,
    OperatingSystemConfigPurpose, OperatingSystemConfigStatus, Unit,
};
use std::fmt;
use tracing::{debug, info};

/// Result of reconciling one OperatingSystemConfig
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutput {
    /// Rendered user data; empty for `reconcile` configs
    pub user_data: Vec<u8>,
    /// Command that reloads the written configuration
    pub command: Option<String>,
    pub unit_names: Vec<String>,
    pub file_paths: Vec<String>,
    pub extension_units: Vec<Unit>,
    pub extension_files: Vec<File>,
}

impl ReconcileOutput {
    /// Status block reflecting this output
    pub fn status(&self) -> OperatingSystemConfigStatus {
        OperatingSystemConfigStatus {
            extension_units: self.extension_units.clone(),
            extension_files: self.extension_files.clone(),
            command: self.command.clone(),
            units: self.unit_names.clone(),
            files: self.file_paths.clone(),
        }
    }
}

/// Translates OperatingSystemConfigs for metal-stack machine images.
pub struct Actuator {
    resolver: Box<dyn ContentResolver>,
    config: ActuatorConfig,
}

impl fmt::Debug for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actuator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Actuator {
    /// Creates a new actuator instance.
    pub fn new(resolver: impl ContentResolver + 'static, config: ActuatorConfig) -> Self {
        Self {
            resolver: Box::new(resolver),
            config,
        }
    }

    /// Renders user data or extension files depending on the purpose.
    pub async fn reconcile(
        &self,
        osc: &OperatingSystemConfig,
    ) -> Result<ReconcileOutput, ControllerError> {
        let name = osc.metadata.name.as_deref().unwrap_or_default();
        let namespace = osc.metadata.namespace.as_deref().unwrap_or("default");
        info!(
            "Reconciling OperatingSystemConfig {}/{} (purpose: {:?})",
            namespace, name, osc.spec.purpose
        );

        let isolation = network_isolation(osc)?;
        let overlay = Overlay::new(&isolation, osc.spec.cri_config.as_ref());

        let mut output = ReconcileOutput {
            command: reload_command(osc),
            unit_names: osc.unit_names(),
            file_paths: osc.file_paths(),
            ..Default::default()
        };

        match osc.spec.purpose {
            OperatingSystemConfigPurpose::Provision => {
                let files = ensure_files(osc.spec.files.clone(), overlay.files());
                let units = &osc.spec.units;

                let resolved = resolve_files(self.resolver.as_ref(), namespace, &files).await?;
                output.user_data = match self.config.provision_format {
                    ProvisionFormat::Ignition => {
                        render_ignition(self.config.ignition_version, &resolved, units)?
                    }
                    ProvisionFormat::Script => ScriptRenderer::new(self.config.units_path.clone())
                        .render(&resolved, units)
                        .into_bytes(),
                };
                debug!(
                    "Rendered {} bytes of {:?} user data for {}/{}",
                    output.user_data.len(),
                    self.config.provision_format,
                    namespace,
                    name
                );
            }
            OperatingSystemConfigPurpose::Reconcile => {
                output.extension_files = overlay.files();
                output.extension_units = Vec::new();
                debug!(
                    "Adding {} extension files to {}/{}",
                    output.extension_files.len(),
                    namespace,
                    name
                );
            }
        }

        Ok(output)
    }

    /// Nothing is created outside the OperatingSystemConfig, so there is nothing to delete.
    pub async fn delete(&self, osc: &OperatingSystemConfig) -> Result<(), ControllerError> {
        debug!(
            "Delete of OperatingSystemConfig {:?} is a no-op",
            osc.metadata.name.as_deref().unwrap_or_default()
        );
        Ok(())
    }

    pub async fn force_delete(&self, osc: &OperatingSystemConfig) -> Result<(), ControllerError> {
        self.delete(osc).await
    }

    pub async fn migrate(&self, osc: &OperatingSystemConfig) -> Result<(), ControllerError> {
        self.delete(osc).await
    }

    pub async fn restore(
        &self,
        osc: &OperatingSystemConfig,
    ) -> Result<ReconcileOutput, ControllerError> {
        self.reconcile(osc).await
    }
}

fn network_isolation(osc: &OperatingSystemConfig) -> Result<NetworkIsolation, ControllerError> {
    let Some(raw) = &osc.spec.provider_config else {
        return Ok(NetworkIsolation::default());
    };

    let provider_config = ImageProviderConfig::decode(raw)?;
    Ok(provider_config.network_isolation.unwrap_or_default())
}

fn reload_command(osc: &OperatingSystemConfig) -> Option<String> {
    osc.spec
        .reload_config_file_path
        .as_ref()
        .map(|path| format!("/usr/bin/env bash {}", path))
}
