//! Installation probe: validation and metadata extraction for one directory.
//!
//! The probe decides whether a directory is a JDK installation and, if it is,
//! builds an [`InstallationRecord`] for it. Nothing here fails loudly: a
//! directory that isn't an installation yields `None`, an unreadable version
//! becomes [`UNKNOWN_VERSION`], and an interpreter that cannot be started is
//! classified as 32-bit.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use jdkswitch::exec::SystemRunner;
//! use jdkswitch::install::InstallationProbe;
//!
//! let probe = InstallationProbe::new(Arc::new(SystemRunner::new()));
//! if let Some(record) = probe.probe(Path::new("/usr/lib/jvm/java-17-openjdk")) {
//!     println!("{}", record);
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::exec::CommandRunner;
use crate::layout::Layout;

use super::record::{Bitness, InstallationRecord};
use super::version::{parse_metadata, parse_version_output, UNKNOWN_VERSION};

/// Token in a path that marks a 64-bit installation.
const BITNESS_MARKER: &str = "64";

/// Validates candidate directories and extracts their version and bitness.
#[derive(Clone)]
pub struct InstallationProbe {
    runner: Arc<dyn CommandRunner>,
    layout: Layout,
}

impl std::fmt::Debug for InstallationProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationProbe")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl InstallationProbe {
    /// Create a probe using the host layout.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_layout(runner, Layout::host())
    }

    /// Create a probe with an explicit layout.
    pub fn with_layout(runner: Arc<dyn CommandRunner>, layout: Layout) -> Self {
        Self { runner, layout }
    }

    /// The layout this probe checks against.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether `path/bin` holds both the interpreter and the compiler.
    pub fn validate(&self, path: &Path) -> bool {
        path.is_dir() && self.layout.has_executables(path)
    }

    /// Build a record for `path`, or `None` if it isn't an installation.
    pub fn probe(&self, path: &Path) -> Option<InstallationRecord> {
        if !self.validate(path) {
            tracing::debug!("Not an installation: {}", path.display());
            return None;
        }

        let version = self.extract_version(path);
        let bitness = self.detect_bitness(path);
        tracing::debug!(
            "Probed {}: version {}, {}",
            path.display(),
            version,
            bitness
        );

        Some(InstallationRecord::new(version, path, bitness))
    }

    /// Version from the metadata file, else from `-version` output, else
    /// [`UNKNOWN_VERSION`].
    pub fn extract_version(&self, path: &Path) -> String {
        if let Some(version) = self.version_from_metadata(path) {
            return version;
        }

        if let Some(version) = self.version_from_interpreter(path) {
            return version;
        }

        tracing::debug!("No version found for {}", path.display());
        UNKNOWN_VERSION.to_string()
    }

    /// 64-bit if the path says so, else if the interpreter accepts the
    /// 64-bit-only flag. Anything else, including a failed spawn, is 32-bit.
    pub fn detect_bitness(&self, path: &Path) -> Bitness {
        let lowered = path.to_string_lossy().to_lowercase();
        if lowered.contains(BITNESS_MARKER) {
            return Bitness::Bits64;
        }

        let interpreter = self.layout.interpreter_path(path);
        match self
            .runner
            .run(&interpreter.to_string_lossy(), &["-d64", "-version"])
        {
            Ok(output) if output.success => Bitness::Bits64,
            Ok(_) => Bitness::Bits32,
            Err(e) => {
                tracing::debug!("Bitness check failed for {}: {}", path.display(), e);
                Bitness::Bits32
            }
        }
    }

    fn version_from_metadata(&self, path: &Path) -> Option<String> {
        let metadata = self.layout.metadata_path(path);
        let content = match fs::read_to_string(&metadata) {
            Ok(content) => content,
            Err(e) => {
                if metadata.exists() {
                    tracing::warn!("Failed to read {}: {}", metadata.display(), e);
                }
                return None;
            }
        };
        parse_metadata(&content, self.layout.version_key)
    }

    fn version_from_interpreter(&self, path: &Path) -> Option<String> {
        let interpreter = self.layout.interpreter_path(path);
        match self.runner.run(&interpreter.to_string_lossy(), &["-version"]) {
            Ok(output) => parse_version_output(&output.combined()),
            Err(e) => {
                tracing::debug!("Version probe failed for {}: {}", path.display(), e);
                None
            }
        }
    }
}
