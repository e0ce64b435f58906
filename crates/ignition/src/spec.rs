//! Version-independent input for the Ignition builders.

use crate::error::IgnitionError;
use std::fmt;
use std::str::FromStr;

/// Ignition spec version of the rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    #[default]
    V2_3,
    V3_3,
}

impl Version {
    pub fn as_str(self) -> &'static str {
        match self {
            Version::V2_3 => "2.3.0",
            Version::V3_3 => "3.3.0",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = IgnitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2.3.0" | "2.3" => Ok(Version::V2_3),
            "3.3.0" | "3.3" => Ok(Version::V3_3),
            other => Err(IgnitionError::UnsupportedVersion(other.to_string())),
        }
    }
}

/// A file to be written by Ignition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: String,
    /// Decoded file contents
    pub contents: Vec<u8>,
    pub mode: Option<i32>,
}

impl FileSpec {
    pub fn new(path: impl Into<String>, contents: Vec<u8>, mode: Option<i32>) -> Self {
        Self { path: path.into(), contents, mode }
    }
}

/// A systemd unit to be written by Ignition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    pub name: String,
    pub contents: Option<String>,
    pub enabled: bool,
    pub dropins: Vec<DropInSpec>,
}

impl UnitSpec {
    pub fn new(name: impl Into<String>, contents: Option<String>, enabled: bool) -> Self {
        Self { name: name.into(), contents, enabled, dropins: Vec::new() }
    }

    pub fn with_dropin(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.dropins.push(DropInSpec { name: name.into(), contents: contents.into() });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropInSpec {
    pub name: String,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!("2.3.0".parse::<Version>().unwrap(), Version::V2_3);
        assert_eq!("3.3".parse::<Version>().unwrap(), Version::V3_3);
        assert!(matches!("3.4.0".parse::<Version>(), Err(IgnitionError::UnsupportedVersion(_))));
        assert_eq!(Version::default().to_string(), "2.3.0");
    }
}
