//! os-metal CRD Definitions
//!
//! Resource types consumed by the os-metal extension:
//! - `OperatingSystemConfig`: files, units and CRI settings for a worker node
//! - `ImageProviderConfig`: metal provider settings carried in `providerConfig`
//! - `FileCodec`: content encodings for inline file data

pub mod operating_system_config;
pub mod image_provider_config;
pub mod file_codec;

pub use operating_system_config::*;
pub use image_provider_config::*;
pub use file_codec::*;
