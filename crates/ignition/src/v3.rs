//! Ignition spec 3.3.0

use crate::data_url;
use crate::error::IgnitionError;
use crate::spec::{FileSpec, UnitSpec, Version};
use crate::validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub ignition: Ignition,

    #[serde(default, skip_serializing_if = "Storage::is_empty")]
    pub storage: Storage,

    #[serde(default, skip_serializing_if = "Systemd::is_empty")]
    pub systemd: Systemd,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Ignition {
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Storage {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
}

impl Storage {
    fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct File {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,

    pub path: String,

    #[serde(default)]
    pub contents: Resource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Systemd {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
}

impl Systemd {
    fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Unit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropins: Vec<Dropin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Dropin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,

    pub name: String,
}

impl Config {
    /// Builds a validated 3.3.0 document. Modes are left to Ignition's
    /// defaults unless given.
    pub fn from_specs(files: &[FileSpec], units: &[UnitSpec]) -> Result<Self, IgnitionError> {
        validate::files(files)?;
        validate::unique_paths(files)?;
        validate::units(units)?;

        Ok(Config {
            ignition: Ignition { version: Version::V3_3.as_str().to_string() },
            storage: Storage {
                files: files
                    .iter()
                    .map(|f| File {
                        overwrite: Some(true),
                        path: f.path.clone(),
                        contents: Resource {
                            compression: None,
                            source: Some(data_url::encode(&f.contents)),
                        },
                        mode: f.mode,
                    })
                    .collect(),
            },
            systemd: Systemd {
                units: units
                    .iter()
                    .map(|u| Unit {
                        contents: u.contents.clone(),
                        dropins: u
                            .dropins
                            .iter()
                            .map(|d| Dropin {
                                contents: Some(d.contents.clone()),
                                name: d.name.clone(),
                            })
                            .collect(),
                        enabled: Some(u.enabled),
                        name: u.name.clone(),
                    })
                    .collect(),
            },
        })
    }
}
