//! Checks shared by all document versions.

use crate::error::IgnitionError;
use crate::spec::{FileSpec, UnitSpec};
use std::collections::HashSet;

const UNIT_SUFFIXES: &[&str] = &[
    ".service", ".socket", ".device", ".mount", ".automount", ".swap", ".target", ".path",
    ".timer", ".slice", ".scope",
];

pub(crate) fn files(files: &[FileSpec]) -> Result<(), IgnitionError> {
    for file in files {
        if !file.path.starts_with('/') {
            return Err(IgnitionError::Invalid(format!(
                "path not absolute: {:?}",
                file.path
            )));
        }
        if let Some(mode) = file.mode {
            if !(0..=0o7777).contains(&mode) {
                return Err(IgnitionError::Invalid(format!(
                    "illegal file mode {:o} for {:?}",
                    mode, file.path
                )));
            }
        }
    }
    Ok(())
}

pub(crate) fn units(units: &[UnitSpec]) -> Result<(), IgnitionError> {
    for unit in units {
        if !UNIT_SUFFIXES.iter().any(|suffix| unit.name.ends_with(suffix)) {
            return Err(IgnitionError::Invalid(format!(
                "invalid systemd unit extension: {:?}",
                unit.name
            )));
        }
        for dropin in &unit.dropins {
            if !dropin.name.ends_with(".conf") {
                return Err(IgnitionError::Invalid(format!(
                    "invalid systemd unit drop-in extension: {:?}",
                    dropin.name
                )));
            }
        }
    }
    Ok(())
}

/// Ignition v3 refuses two entries for one path.
pub(crate) fn unique_paths(files: &[FileSpec]) -> Result<(), IgnitionError> {
    let mut seen = HashSet::new();
    for file in files {
        if !seen.insert(file.path.as_str()) {
            return Err(IgnitionError::Invalid(format!("duplicate entry: {:?}", file.path)));
        }
    }
    Ok(())
}
