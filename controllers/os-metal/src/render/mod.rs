//! User data renderers.
//!
//! Both renderers work on the merged file and unit lists:
//! - `ignition`: Ignition JSON for Flatcar images
//! - `script`: bash bootstrap script writing files and (re)starting units

pub mod ignition;
pub mod script;

pub use self::ignition::render_ignition;
pub use self::script::ScriptRenderer;
