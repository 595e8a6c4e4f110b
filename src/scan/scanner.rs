//! Walks catalog roots and turns candidate directories into records.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::Result;
use crate::exec::CommandRunner;
use crate::install::{InstallationProbe, InstallationRecord};
use crate::worker::{BackgroundWorker, FatalReporter, TaskHandle, TracingReporter};

use super::catalog::PathCatalog;

/// Name fragments that mark a child directory as worth probing.
const NAME_KEYWORDS: &[&str] = &["jdk", "java", "hotspot", "microsoft"];

/// Discovers installations under the roots of its [`PathCatalog`].
///
/// The scanner owns the catalog; registering and unregistering roots goes
/// through it. Scans take a snapshot of the roots when they start, so a
/// root registered during a scan is picked up by the next one.
pub struct Scanner {
    catalog: RwLock<PathCatalog>,
    probe: InstallationProbe,
    reporter: Arc<dyn FatalReporter>,
    worker: Mutex<Option<BackgroundWorker>>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("roots", &self.list_roots())
            .field("probe", &self.probe)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Create a scanner over the host's default roots.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_catalog(PathCatalog::with_defaults(), InstallationProbe::new(runner))
    }

    /// Create a scanner with an explicit catalog and probe.
    pub fn with_catalog(catalog: PathCatalog, probe: InstallationProbe) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            probe,
            reporter: Arc::new(TracingReporter),
            worker: Mutex::new(None),
        }
    }

    /// Report worker failures somewhere other than the log.
    pub fn with_reporter(mut self, reporter: Arc<dyn FatalReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The probe used for candidate directories.
    pub fn probe(&self) -> &InstallationProbe {
        &self.probe
    }

    /// Register a custom root. See [`PathCatalog::register`].
    pub fn register_root(&self, path: &Path) -> bool {
        self.catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(path)
    }

    /// Unregister a custom root. See [`PathCatalog::unregister`].
    pub fn unregister_root(&self, path: &Path) -> bool {
        self.catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unregister(path)
    }

    /// All roots, defaults first.
    pub fn list_roots(&self) -> Vec<PathBuf> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .roots()
    }

    /// Custom roots only, for persisting.
    pub fn custom_roots(&self) -> Vec<PathBuf> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .custom_roots()
            .to_vec()
    }

    /// Whether `path` is an installation.
    pub fn validate(&self, path: &Path) -> bool {
        self.probe.validate(path)
    }

    /// Scan every root and return the deduplicated records.
    pub fn scan(&self) -> Vec<InstallationRecord> {
        scan_roots(&self.list_roots(), &self.probe)
    }

    /// Run [`scan`](Self::scan) on the scanner's background worker.
    ///
    /// Fails only if the worker thread cannot be started.
    pub fn scan_async(&self) -> Result<TaskHandle<Vec<InstallationRecord>>> {
        let roots = self.list_roots();
        let probe = self.probe.clone();

        let mut slot = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(BackgroundWorker::spawn("scan", Arc::clone(&self.reporter))?);
        }
        let worker = slot
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("scan worker missing after start"))?;

        Ok(worker.submit(move || scan_roots(&roots, &probe)))
    }
}

/// Scan `roots` in order with `probe`.
///
/// A root that is itself an installation yields one record and is not
/// descended into. An unreadable root is logged and skipped.
pub fn scan_roots(roots: &[PathBuf], probe: &InstallationProbe) -> Vec<InstallationRecord> {
    let mut found = Vec::new();

    for root in roots {
        if probe.validate(root) {
            if let Some(record) = probe.probe(root) {
                found.push(record);
            }
            continue;
        }

        match scan_children(root, probe) {
            Ok(records) => found.extend(records),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Skipping missing root {}", root.display());
            }
            Err(e) => {
                tracing::warn!("Skipping root {}: {}", root.display(), e);
            }
        }
    }

    let records = dedup(found);
    tracing::debug!("Scan found {} installation(s)", records.len());
    records
}

fn scan_children(root: &Path, probe: &InstallationProbe) -> io::Result<Vec<InstallationRecord>> {
    let mut records = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        // macOS bundles keep the installation under Contents/Home.
        let bundle_home = path.join("Contents").join("Home");
        let candidate = if bundle_home.is_dir() { bundle_home } else { path };

        let name = entry.file_name().to_string_lossy().to_string();
        if !passes_gate(&candidate, &name, probe) {
            tracing::debug!("Gate skipped {}", candidate.display());
            continue;
        }

        if let Some(record) = probe.probe(&candidate) {
            records.push(record);
        }
    }

    Ok(records)
}

/// Cheap filter run before the full probe.
fn passes_gate(candidate: &Path, name: &str, probe: &InstallationProbe) -> bool {
    let layout = probe.layout();
    if !layout.has_executables(candidate) {
        return false;
    }
    layout.metadata_path(candidate).is_file() || name_looks_like_installation(name)
}

fn name_looks_like_installation(name: &str) -> bool {
    let lowered = name.to_lowercase();
    lowered.starts_with(|c: char| c.is_ascii_digit())
        || NAME_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Drop records whose (path, version) key was already seen, keeping order.
fn dedup(records: Vec<InstallationRecord>) -> Vec<InstallationRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect()
}
