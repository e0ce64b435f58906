//! File content resolution.
//!
//! Turns the `content` of an OperatingSystemConfig file into bytes: inline
//! data is decoded with its codec, secret references are read through a
//! [`ContentResolver`].

use crate::error::ControllerError;
use crds::{File, FileCodec};
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use std::fmt;
use tracing::debug;

/// Source of secret-backed file content.
///
/// The kube-backed implementation is used in clusters; tests and offline
/// rendering use other implementations.
#[async_trait::async_trait]
pub trait ContentResolver: Send + Sync {
    /// Returns the value stored under `key` in the Secret `namespace/name`.
    async fn secret_data(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<Vec<u8>, ControllerError>;
}

/// Reads Secrets through the Kubernetes API.
pub struct KubeSecretResolver {
    client: Client,
}

impl fmt::Debug for KubeSecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeSecretResolver").finish_non_exhaustive()
    }
}

impl KubeSecretResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ContentResolver for KubeSecretResolver {
    async fn secret_data(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<Vec<u8>, ControllerError> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = api.get(name).await?;

        secret
            .data
            .and_then(|mut data| data.remove(key))
            .map(|value| value.0)
            .ok_or_else(|| ControllerError::SecretContent {
                namespace: namespace.to_string(),
                name: name.to_string(),
                reason: format!("key {:?} not found", key),
            })
    }
}

/// Rejects every secret reference; for rendering without cluster access.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineOnlyResolver;

#[async_trait::async_trait]
impl ContentResolver for InlineOnlyResolver {
    async fn secret_data(
        &self,
        namespace: &str,
        name: &str,
        _key: &str,
    ) -> Result<Vec<u8>, ControllerError> {
        Err(ControllerError::SecretContent {
            namespace: namespace.to_string(),
            name: name.to_string(),
            reason: "secret lookups are disabled (set RESOLVE_SECRETS=true)".to_string(),
        })
    }
}

/// A file with its content decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: String,
    pub permissions: Option<i32>,
    pub data: Vec<u8>,
    pub transmit_unencoded: bool,
}

/// Resolves the content of every file, keeping order.
///
/// Inline content wins over a secret reference; a file with neither
/// resolves to empty content.
pub async fn resolve_files(
    resolver: &dyn ContentResolver,
    namespace: &str,
    files: &[File],
) -> Result<Vec<ResolvedFile>, ControllerError> {
    let mut resolved = Vec::with_capacity(files.len());

    for file in files {
        let data = if let Some(inline) = &file.content.inline {
            let codec: FileCodec =
                inline.encoding.parse().map_err(|source| ControllerError::Content {
                    path: file.path.clone(),
                    source,
                })?;
            codec
                .decode(inline.data.as_bytes())
                .map_err(|source| ControllerError::Content { path: file.path.clone(), source })?
        } else if let Some(secret_ref) = &file.content.secret_ref {
            debug!(
                "Reading content of {} from secret {}/{}",
                file.path, namespace, secret_ref.name
            );
            resolver
                .secret_data(namespace, &secret_ref.name, &secret_ref.data_key)
                .await?
        } else {
            Vec::new()
        };

        resolved.push(ResolvedFile {
            path: file.path.clone(),
            permissions: file.permissions,
            data,
            transmit_unencoded: file.content.transmit_unencoded.unwrap_or(false),
        });
    }

    Ok(resolved)
}
