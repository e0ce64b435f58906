//! os-metal actuator
//!
//! Renders one OperatingSystemConfig manifest (YAML or JSON) and writes the
//! resulting user data to stdout. Extension files and units for
//! `reconcile` configs are printed as YAML.

use anyhow::Context;
use crds::OperatingSystemConfig;
use os_metal_controller::{
    Actuator, ActuatorConfig, InlineOnlyResolver, KubeSecretResolver, ReconcileOutput,
};
use std::io::Write;
use std::{env, fs};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the rendered output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting os-metal actuator");

    let config = ActuatorConfig::from_env()?;
    let manifest_path = env::args()
        .nth(1)
        .context("usage: os-metal-controller <operatingsystemconfig.yaml>")?;

    info!("Configuration:");
    info!("  Provision format: {:?}", config.provision_format);
    info!("  Ignition version: {}", config.ignition_version);
    info!("  Units path: {}", config.units_path);
    info!("  Resolve secrets: {}", config.resolve_secrets);

    let raw = fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read manifest {}", manifest_path))?;
    let osc: OperatingSystemConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to decode OperatingSystemConfig from {}", manifest_path))?;

    let actuator = if config.resolve_secrets {
        if rustls::crypto::ring::default_provider().install_default().is_err() {
            warn!("rustls crypto provider already installed");
        }
        let client = kube::Client::try_default()
            .await
            .context("failed to create Kubernetes client")?;
        Actuator::new(KubeSecretResolver::new(client), config)
    } else {
        Actuator::new(InlineOnlyResolver, config)
    };

    let output = actuator.reconcile(&osc).await?;
    write_output(&output)?;

    Ok(())
}

fn write_output(output: &ReconcileOutput) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();

    if !output.user_data.is_empty() {
        stdout.write_all(&output.user_data)?;
    }
    if let Some(command) = &output.command {
        info!("Reload command: {}", command);
    }
    if !output.extension_files.is_empty() || !output.extension_units.is_empty() {
        info!(
            "Emitting {} extension files and {} extension units",
            output.extension_files.len(),
            output.extension_units.len()
        );
        let status = serde_yaml::to_string(&output.status())?;
        stdout.write_all(status.as_bytes())?;
    }

    stdout.flush()?;
    Ok(())
}
