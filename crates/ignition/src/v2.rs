//! Ignition spec 2.3.0
//!
//! Field order and empty-section handling follow the output of the Container
//! Linux Config Transpiler, so documents are equivalent to what images built
//! around Ignition 0.x already consume. `data:` URLs may escape more
//! characters than the transpiler does; the decoded contents are identical.

use crate::data_url;
use crate::error::IgnitionError;
use crate::spec::{FileSpec, UnitSpec, Version};
use crate::validate;
use crate::DEFAULT_FILE_MODE;
use serde::{Deserialize, Serialize};

/// Filesystem all files are written to
pub const ROOT_FILESYSTEM: &str = "root";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub ignition: Ignition,
    pub networkd: Networkd,
    pub passwd: Passwd,
    pub storage: Storage,
    pub systemd: Systemd,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Ignition {
    pub config: IgnitionConfig,
    pub security: Security,
    pub timeouts: Timeouts,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IgnitionConfig {}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Security {
    pub tls: Tls,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Tls {}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timeouts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_response_headers: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_total: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Networkd {}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Passwd {}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Storage {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct File {
    pub filesystem: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,

    pub path: String,

    pub contents: FileContents,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileContents {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub compression: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub verification: Verification,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Verification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Systemd {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Unit {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contents: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropins: Vec<Dropin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Dropin {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contents: String,

    pub name: String,
}

impl Config {
    /// Builds a validated 2.3.0 document.
    ///
    /// Every file is written to the root filesystem and overwrites existing
    /// content; files without a mode get 0644.
    pub fn from_specs(files: &[FileSpec], units: &[UnitSpec]) -> Result<Self, IgnitionError> {
        validate::files(files)?;
        validate::units(units)?;

        let mut cfg = Config {
            ignition: Ignition {
                version: Version::V2_3.as_str().to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        cfg.systemd.units = units
            .iter()
            .map(|u| Unit {
                contents: u.contents.clone().unwrap_or_default(),
                dropins: u
                    .dropins
                    .iter()
                    .map(|d| Dropin { contents: d.contents.clone(), name: d.name.clone() })
                    .collect(),
                enabled: Some(u.enabled),
                name: u.name.clone(),
            })
            .collect();

        cfg.storage.files = files
            .iter()
            .map(|f| File {
                filesystem: ROOT_FILESYSTEM.to_string(),
                overwrite: Some(true),
                path: f.path.clone(),
                contents: FileContents {
                    source: data_url::encode(&f.contents),
                    ..Default::default()
                },
                mode: Some(f.mode.unwrap_or(DEFAULT_FILE_MODE)),
            })
            .collect();

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUBELET_UNIT: &str =
        "[Unit]\nDescription=kubelet\n[Install]\nWantedBy=multi-user.target\n[Service]\nExecStart=/bin/kubelet";

    #[test]
    fn test_simple_service() {
        let units = vec![UnitSpec::new("kubelet.service", Some(KUBELET_UNIT.to_string()), true)];

        let cfg = Config::from_specs(&[], &units).unwrap();

        assert_eq!(
            cfg.systemd.units,
            vec![Unit {
                contents: KUBELET_UNIT.to_string(),
                dropins: vec![],
                enabled: Some(true),
                name: "kubelet.service".to_string(),
            }]
        );
        assert!(cfg.storage.files.is_empty());
    }

    #[test]
    fn test_simple_files() {
        let files = vec![
            FileSpec::new("/etc/hostname", b"testhost".to_vec(), Some(0o644)),
            FileSpec::new("/etc/foo", b"foo".to_vec(), Some(0o744)),
        ];

        let cfg = Config::from_specs(&files, &[]).unwrap();

        assert_eq!(cfg.storage.files.len(), 2);
        assert_eq!(
            cfg.storage.files[0],
            File {
                filesystem: "root".to_string(),
                overwrite: Some(true),
                path: "/etc/hostname".to_string(),
                contents: FileContents {
                    source: "data:,testhost".to_string(),
                    ..Default::default()
                },
                mode: Some(0o644),
            }
        );
        assert_eq!(cfg.storage.files[1].mode, Some(0o744));
    }

    #[test]
    fn test_transpiles_to_2_3_0() {
        let files = vec![FileSpec::new("/etc/a", vec![], None)];

        let json = serde_json::to_string(&Config::from_specs(&files, &[]).unwrap()).unwrap();

        assert_eq!(
            json,
            r#"{"ignition":{"config":{},"security":{"tls":{}},"timeouts":{},"version":"2.3.0"},"networkd":{},"passwd":{},"storage":{"files":[{"filesystem":"root","overwrite":true,"path":"/etc/a","contents":{"source":"data:,","verification":{}},"mode":420}]},"systemd":{}}"#
        );
    }

    #[test]
    fn test_unit_with_dropins_only() {
        let units = vec![UnitSpec::new("containerd.service", None, true)
            .with_dropin("11-exec_config.conf", "[Service]\nExecStart=\n")];

        let json = serde_json::to_value(Config::from_specs(&[], &units).unwrap()).unwrap();

        assert_eq!(
            json["systemd"]["units"][0],
            serde_json::json!({
                "dropins": [{"contents": "[Service]\nExecStart=\n", "name": "11-exec_config.conf"}],
                "enabled": true,
                "name": "containerd.service"
            })
        );
    }

    #[test]
    fn test_disabled_unit() {
        let units = vec![UnitSpec::new("update-engine.service", None, false)];
        let cfg = Config::from_specs(&[], &units).unwrap();
        assert_eq!(cfg.systemd.units[0].enabled, Some(false));
    }

    #[test]
    fn test_parses_rendered_document() {
        let files = vec![FileSpec::new("/etc/resolv.conf", b"nameserver 1.1.1.1\n".to_vec(), None)];
        let rendered = crate::render(Version::V2_3, &files, &[]).unwrap();

        let parsed: Config = serde_json::from_slice(&rendered).unwrap();

        assert_eq!(parsed.ignition.version, "2.3.0");
        let source = &parsed.storage.files[0].contents.source;
        assert_eq!(data_url::decode(source).unwrap(), b"nameserver 1.1.1.1\n");
    }

    #[test]
    fn test_invalid_path_is_fatal() {
        let files = vec![FileSpec::new("relative/path", vec![], None)];
        assert!(matches!(Config::from_specs(&files, &[]), Err(IgnitionError::Invalid(_))));
    }
}
