//! Ignition document model
//!
//! Builds Ignition configurations for Flatcar/CoreOS-family machine images
//! from a flat list of files and systemd units.
//!
//! # Example
//!
//! ```
//! use ignition::{FileSpec, UnitSpec, Version};
//!
//! let files = vec![FileSpec::new("/etc/hostname", b"node-1".to_vec(), Some(0o644))];
//! let units = vec![UnitSpec::new("kubelet.service", Some("[Service]\n".to_string()), true)];
//!
//! let json = ignition::render(Version::V2_3, &files, &units)?;
//! assert!(json.starts_with(b"{\"ignition\""));
//! # Ok::<(), ignition::IgnitionError>(())
//! ```
//!
//! # Versions
//!
//! - **2.3.0**: the layout produced by the Container Linux Config Transpiler,
//!   understood by the Ignition 0.x releases shipped in older images
//! - **3.3.0**: the layout understood by Ignition 2.x

pub mod data_url;
pub mod error;
pub mod spec;
pub mod v2;
pub mod v3;
mod validate;

pub use error::IgnitionError;
pub use spec::{DropInSpec, FileSpec, UnitSpec, Version};

/// Default mode for files without explicit permissions (0644)
pub const DEFAULT_FILE_MODE: i32 = 0o644;

/// Builds and serializes an Ignition document of the given version.
pub fn render(
    version: Version,
    files: &[FileSpec],
    units: &[UnitSpec],
) -> Result<Vec<u8>, IgnitionError> {
    tracing::debug!(
        "Rendering ignition {} with {} files and {} units",
        version,
        files.len(),
        units.len()
    );

    let out = match version {
        Version::V2_3 => serde_json::to_vec(&v2::Config::from_specs(files, units)?)?,
        Version::V3_3 => serde_json::to_vec(&v3::Config::from_specs(files, units)?)?,
    };
    Ok(out)
}
