//! JDK installations: records, version handling and the probe.
//!
//! # Modules
//!
//! - [`probe`] - Validation and metadata extraction for one directory
//! - [`record`] - The installation record and its identity rules
//! - [`version`] - Version parsing and fuzzy comparison

pub mod probe;
pub mod record;
pub mod version;

pub use probe::InstallationProbe;
pub use record::{Bitness, InstallationRecord};
pub use version::{VersionMatch, UNKNOWN_VERSION};
