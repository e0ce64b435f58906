//! Ignition renderer.

use crate::content::ResolvedFile;
use crate::error::ControllerError;
use crds::Unit;
use ignition::{DropInSpec, FileSpec, UnitSpec, Version};

/// Renders resolved files and units as an Ignition document.
///
/// File permissions become modes; units are enabled unless they opt out.
pub fn render_ignition(
    version: Version,
    files: &[ResolvedFile],
    units: &[Unit],
) -> Result<Vec<u8>, ControllerError> {
    let file_specs: Vec<FileSpec> = files
        .iter()
        .map(|f| FileSpec::new(f.path.clone(), f.data.clone(), f.permissions))
        .collect();

    let unit_specs: Vec<UnitSpec> = units
        .iter()
        .map(|u| UnitSpec {
            name: u.name.clone(),
            contents: u.content.clone(),
            enabled: u.is_enabled(),
            dropins: u
                .drop_ins
                .iter()
                .map(|d| DropInSpec { name: d.name.clone(), contents: d.content.clone() })
                .collect(),
        })
        .collect();

    Ok(ignition::render(version, &file_specs, &unit_specs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::DropIn;
    use serde_json::Value;

    fn resolved(path: &str, data: &[u8], permissions: Option<i32>) -> ResolvedFile {
        ResolvedFile {
            path: path.to_string(),
            permissions,
            data: data.to_vec(),
            transmit_unencoded: false,
        }
    }

    #[test]
    fn test_files_and_units() {
        let files = vec![resolved("/etc/hostname", b"testhost", Some(0o600))];
        let units = vec![Unit {
            name: "kubelet.service".to_string(),
            content: Some("[Service]\n".to_string()),
            drop_ins: vec![DropIn { name: "10-opts.conf".to_string(), content: "x".to_string() }],
            ..Default::default()
        }];

        let out = render_ignition(Version::V2_3, &files, &units).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["ignition"]["version"], "2.3.0");
        assert_eq!(json["storage"]["files"][0]["path"], "/etc/hostname");
        assert_eq!(json["storage"]["files"][0]["mode"], 384);
        assert_eq!(json["storage"]["files"][0]["contents"]["source"], "data:,testhost");
        assert_eq!(json["systemd"]["units"][0]["enabled"], true);
        assert_eq!(json["systemd"]["units"][0]["dropins"][0]["name"], "10-opts.conf");
    }

    #[test]
    fn test_disabled_unit() {
        let units = vec![Unit {
            name: "locksmithd.service".to_string(),
            enable: Some(false),
            ..Default::default()
        }];

        let out = render_ignition(Version::V3_3, &[], &units).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["ignition"]["version"], "3.3.0");
        assert_eq!(json["systemd"]["units"][0]["enabled"], false);
    }

    #[test]
    fn test_invalid_unit_name() {
        let units = vec![Unit { name: "kubelet".to_string(), ..Default::default() }];
        let err = render_ignition(Version::V2_3, &[], &units).unwrap_err();
        assert!(matches!(err, ControllerError::Ignition(_)));
        assert!(err.to_string().contains("could not transpile ignition config"));
    }
}
