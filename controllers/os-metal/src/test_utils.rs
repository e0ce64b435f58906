//! Test utilities for unit testing the actuator
//!
//! This module provides helpers for creating test data and a mock content resolver.

use crate::content::ContentResolver;
use crate::error::ControllerError;
use crds::{
    CriConfig, CriName, File, FileContent, FileContentInline, NetworkIsolation,
    OperatingSystemConfig, OperatingSystemConfigPurpose, OperatingSystemConfigSpec, RegistryMirror,
    Unit,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory Secret store
#[derive(Debug, Clone, Default)]
pub struct MockContentResolver {
    secrets: Arc<Mutex<HashMap<(String, String, String), Vec<u8>>>>,
}

impl MockContentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(self, namespace: &str, name: &str, key: &str, data: &[u8]) -> Self {
        self.secrets
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string(), key.to_string()), data.to_vec());
        self
    }
}

#[async_trait::async_trait]
impl ContentResolver for MockContentResolver {
    async fn secret_data(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<Vec<u8>, ControllerError> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| ControllerError::SecretContent {
                namespace: namespace.to_string(),
                name: name.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// Network isolation with two DNS servers, two NTP servers and two mirrors
pub fn isolated_network() -> NetworkIsolation {
    NetworkIsolation {
        allowed_networks: crds::AllowedNetworks {
            ingress: vec!["10.0.0.1/24".to_string()],
            egress: vec!["100.0.0.1/24".to_string()],
        },
        dns_servers: vec!["1.1.1.1".to_string(), "1.0.0.1".to_string()],
        ntp_servers: vec!["134.60.1.27".to_string(), "134.60.111.110".to_string()],
        registry_mirrors: vec![
            RegistryMirror {
                name: "metal-stack registry".to_string(),
                endpoint: "https://r.metal-stack.dev".to_string(),
                ip: "1.2.3.4".to_string(),
                port: 443,
                mirror_of: vec!["ghcr.io".to_string(), "quay.io".to_string()],
            },
            RegistryMirror {
                name: "local registry".to_string(),
                endpoint: "http://localhost:8080".to_string(),
                ip: "127.0.0.1".to_string(),
                port: 8080,
                mirror_of: vec!["docker.io".to_string()],
            },
        ],
    }
}

/// `providerConfig` blob carrying [`isolated_network`]
pub fn isolated_provider_config() -> serde_json::Value {
    serde_json::to_value(crds::ImageProviderConfig {
        api_version: Some("metal.provider.extensions.gardener.cloud/v1alpha1".to_string()),
        kind: Some("ImageProviderConfig".to_string()),
        network_isolation: Some(isolated_network()),
    })
    .unwrap()
}

/// OperatingSystemConfig with one unit, one file and containerd as CRI
pub fn create_test_osc(purpose: OperatingSystemConfigPurpose) -> OperatingSystemConfig {
    OperatingSystemConfig {
        metadata: ObjectMeta {
            name: Some("worker-a".to_string()),
            namespace: Some("shoot--prj--cluster".to_string()),
            ..Default::default()
        },
        spec: OperatingSystemConfigSpec {
            os_type: "flatcar".to_string(),
            provider_config: None,
            cri_config: Some(CriConfig { name: CriName::Containerd }),
            purpose,
            reload_config_file_path: None,
            units: vec![Unit {
                name: "some-unit.service".to_string(),
                content: Some("foo".to_string()),
                ..Default::default()
            }],
            files: vec![File {
                path: "/some/file".to_string(),
                permissions: None,
                content: FileContent {
                    inline: Some(FileContentInline {
                        encoding: String::new(),
                        data: "bar".to_string(),
                    }),
                    ..Default::default()
                },
            }],
        },
        status: None,
    }
}
