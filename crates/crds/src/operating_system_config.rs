//! OperatingSystemConfig CRD
//!
//! Describes the files, systemd units and container runtime settings a
//! worker node should receive, either at first boot or while running.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::file_codec::FileCodec;

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "extensions.gardener.cloud",
    version = "v1alpha1",
    kind = "OperatingSystemConfig",
    namespaced,
    status = "OperatingSystemConfigStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemConfigSpec {
    /// Operating system type (informational)
    #[serde(rename = "type", default)]
    pub os_type: String,

    /// Provider specific configuration, decoded as `ImageProviderConfig`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,

    /// Container runtime configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cri_config: Option<CriConfig>,

    /// Lifecycle phase this config is rendered for
    pub purpose: OperatingSystemConfigPurpose,

    /// Script executed to reload the written configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reload_config_file_path: Option<String>,

    /// Systemd units, in order
    #[serde(default)]
    pub units: Vec<Unit>,

    /// Files, in order
    #[serde(default)]
    pub files: Vec<File>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystemConfigPurpose {
    /// First-boot bootstrap configuration
    Provision,

    /// Steady-state configuration applied on running nodes
    Reconcile,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CriConfig {
    /// Name of the container runtime
    pub name: CriName,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CriName {
    Containerd,
    Docker,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unit name including its suffix, e.g. `kubelet.service`
    pub name: String,

    /// Command issued for the unit after it was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<UnitCommand>,

    /// Whether the unit is enabled (defaults to true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Unit file content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drop_ins: Vec<DropIn>,

    /// Files the unit depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_paths: Vec<String>,
}

impl Unit {
    /// Whether the unit should be enabled; unset means enabled.
    pub fn is_enabled(&self) -> bool {
        self.enable.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnitCommand {
    Start,
    Restart,
    Stop,
}

impl UnitCommand {
    /// The `systemctl` verb for this command
    pub fn as_systemctl_verb(self) -> &'static str {
        match self {
            UnitCommand::Start => "start",
            UnitCommand::Restart => "restart",
            UnitCommand::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DropIn {
    /// Drop-in file name, e.g. `10-exec.conf`
    pub name: String,

    /// Drop-in content
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Absolute path on the node
    pub path: String,

    /// Octal file mode as a decimal number (e.g. 420 for 0644)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<i32>,

    #[serde(default)]
    pub content: FileContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// Content stored in a Secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<FileContentSecretRef>,

    /// Content given inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<FileContentInline>,

    /// Write the content verbatim instead of base64 encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmit_unencoded: Option<bool>,
}

impl FileContent {
    /// Plain inline content
    pub fn inline_plain(data: impl Into<String>) -> Self {
        Self {
            inline: Some(FileContentInline::plain(data)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileContentSecretRef {
    /// Secret name, in the namespace of the OperatingSystemConfig
    pub name: String,

    /// Key within the Secret's data
    pub data_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileContentInline {
    /// Encoding of `data`: empty or `plain`, or `b64`
    #[serde(default)]
    pub encoding: String,

    pub data: String,
}

impl FileContentInline {
    /// Inline content marked with the `plain` codec
    pub fn plain(data: impl Into<String>) -> Self {
        Self {
            encoding: FileCodec::Plain.id().to_string(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemConfigStatus {
    /// Units added by the extension on top of the spec
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_units: Vec<Unit>,

    /// Files added by the extension on top of the spec
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_files: Vec<File>,

    /// Command to execute after the user data was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Names of all units in the spec
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<String>,

    /// Paths of all files in the spec
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl OperatingSystemConfig {
    /// Names of the units in the spec, in order
    pub fn unit_names(&self) -> Vec<String> {
        self.spec.units.iter().map(|u| u.name.clone()).collect()
    }

    /// Paths of the files in the spec, in order
    pub fn file_paths(&self) -> Vec<String> {
        self.spec.files.iter().map(|f| f.path.clone()).collect()
    }
}
