//! Installation records produced by the probe.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::paths;

use super::version::UNKNOWN_VERSION;

/// Word size of an installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bitness {
    #[serde(rename = "32")]
    Bits32,
    #[serde(rename = "64")]
    Bits64,
}

impl Bitness {
    /// Number of bits.
    pub fn bits(&self) -> u8 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// One discovered JDK installation.
///
/// Two records are equal when their install paths are equal, whatever their
/// versions. The scanner deduplicates on [`dedup_key`](Self::dedup_key),
/// which also includes the version, so a scan can return two records that
/// compare equal.
#[derive(Debug, Clone, Serialize)]
pub struct InstallationRecord {
    version: String,
    install_path: PathBuf,
    bitness: Bitness,
    is_active: bool,
}

impl InstallationRecord {
    /// Create an inactive record. The path is normalized.
    pub fn new(version: impl Into<String>, install_path: &Path, bitness: Bitness) -> Self {
        Self {
            version: version.into(),
            install_path: paths::normalize(install_path),
            bitness,
            is_active: false,
        }
    }

    /// Version string as probed. Not guaranteed to be semver.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the probe could determine a version.
    pub fn has_known_version(&self) -> bool {
        self.version != UNKNOWN_VERSION
    }

    /// Absolute, normalized installation root.
    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Word size of the installation.
    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    /// Whether the resolver marked this installation as the active one.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// `bin/` directory of the installation.
    pub fn bin_dir(&self) -> PathBuf {
        self.install_path.join("bin")
    }

    /// Key used to collapse duplicate scan results: path plus version.
    pub fn dedup_key(&self) -> (String, String) {
        (paths::identity_key(&self.install_path), self.version.clone())
    }
}

impl PartialEq for InstallationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.install_path == other.install_path
    }
}

impl Eq for InstallationRecord {}

impl Hash for InstallationRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.install_path.hash(state);
    }
}

impl fmt::Display for InstallationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at {}",
            self.version,
            self.bitness,
            self.install_path.display()
        )
    }
}
