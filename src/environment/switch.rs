//! Switching the active installation by rewriting scoped variables.
//!
//! For each requested scope, in order, the coordinator writes the home
//! variable and then a rewritten search path. The first failing write aborts
//! the switch; scopes written before it stay written. Once every scope
//! succeeds, the change is broadcast and each scope is read back for the log.
//! Neither the broadcast nor the read-back can fail the switch.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::install::InstallationRecord;
use crate::layout::Layout;
use crate::paths;
use crate::worker::{BackgroundWorker, FatalReporter, TaskHandle, TracingReporter};

use super::broadcast::Broadcaster;
use super::scope::Scope;
use super::store::EnvironmentStore;
use super::{HOME_VARIABLE, SEARCH_PATH_VARIABLE};

/// Parent-directory keywords that mark a search-path entry as a JDK `bin`.
const STRIP_KEYWORDS: &[&str] = &["java", "jdk", "jre"];

/// What a successful switch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    /// Scopes written, in the order they were written.
    pub scopes: Vec<Scope>,
    /// Whether the change broadcast went through.
    pub broadcast_delivered: bool,
    /// Scopes whose read-back didn't show the new values.
    pub readback_mismatches: Vec<Scope>,
}

#[derive(Clone)]
struct Backing {
    store: Arc<dyn EnvironmentStore>,
    broadcaster: Arc<dyn Broadcaster>,
    layout: Layout,
}

/// Applies an installation to one or more scopes.
pub struct SwitchCoordinator {
    backing: Backing,
    reporter: Arc<dyn FatalReporter>,
    worker: Mutex<Option<BackgroundWorker>>,
}

impl std::fmt::Debug for SwitchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchCoordinator")
            .field("layout", &self.backing.layout)
            .finish_non_exhaustive()
    }
}

impl SwitchCoordinator {
    /// Create a coordinator for the host layout.
    pub fn new(store: Arc<dyn EnvironmentStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self::with_layout(store, broadcaster, Layout::host())
    }

    /// Create a coordinator with an explicit layout.
    pub fn with_layout(
        store: Arc<dyn EnvironmentStore>,
        broadcaster: Arc<dyn Broadcaster>,
        layout: Layout,
    ) -> Self {
        Self {
            backing: Backing {
                store,
                broadcaster,
                layout,
            },
            reporter: Arc::new(TracingReporter),
            worker: Mutex::new(None),
        }
    }

    /// Report worker failures somewhere other than the log.
    pub fn with_reporter(mut self, reporter: Arc<dyn FatalReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Make `record` the active installation in each of `scopes`, in order.
    ///
    /// Returns the first write failure. Scopes written before it are not
    /// rolled back.
    pub fn switch_to(&self, record: &InstallationRecord, scopes: &[Scope]) -> Result<SwitchOutcome> {
        perform_switch(&self.backing, record, scopes)
    }

    /// Run [`switch_to`](Self::switch_to) on the coordinator's background
    /// worker.
    pub fn switch_to_async(
        &self,
        record: InstallationRecord,
        scopes: Vec<Scope>,
    ) -> Result<TaskHandle<Result<SwitchOutcome>>> {
        let backing = self.backing.clone();

        let mut slot = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(BackgroundWorker::spawn("switch", Arc::clone(&self.reporter))?);
        }
        let worker = slot
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("switch worker missing after start"))?;

        Ok(worker.submit(move || perform_switch(&backing, &record, &scopes)))
    }
}

fn perform_switch(
    backing: &Backing,
    record: &InstallationRecord,
    scopes: &[Scope],
) -> Result<SwitchOutcome> {
    let home = record.install_path().to_string_lossy().to_string();
    let bin = record.bin_dir().to_string_lossy().to_string();
    let separator = backing.layout.path_separator;

    tracing::info!("Switching to {} in scopes {:?}", record, scopes);

    for &scope in scopes {
        backing.store.write(HOME_VARIABLE, &home, scope)?;

        let current = backing
            .store
            .read(SEARCH_PATH_VARIABLE, scope)
            .unwrap_or_default();
        let search_path = rewrite_search_path(&current, &bin, separator);
        backing.store.write(SEARCH_PATH_VARIABLE, &search_path, scope)?;

        tracing::debug!("Updated {} scope", scope);
    }

    let broadcast_delivered = match backing.broadcaster.broadcast() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Environment change broadcast failed: {}", e);
            false
        }
    };

    let readback_mismatches = scopes
        .iter()
        .copied()
        .filter(|&scope| !read_back_matches(backing, scope, &home, &bin))
        .collect();

    Ok(SwitchOutcome {
        scopes: scopes.to_vec(),
        broadcast_delivered,
        readback_mismatches,
    })
}

fn read_back_matches(backing: &Backing, scope: Scope, home: &str, bin: &str) -> bool {
    let stored_home = backing.store.read(HOME_VARIABLE, scope);
    let stored_path = backing.store.read(SEARCH_PATH_VARIABLE, scope);

    let home_ok = stored_home.as_deref() == Some(home);
    let path_ok = stored_path
        .as_deref()
        .is_some_and(|p| p.split(backing.layout.path_separator).any(|e| e == bin));

    if !home_ok || !path_ok {
        tracing::warn!(
            "Read-back of {} scope differs: {}={:?}, {} contains new bin: {}",
            scope,
            HOME_VARIABLE,
            stored_home,
            SEARCH_PATH_VARIABLE,
            path_ok
        );
    }
    home_ok && path_ok
}

/// Rewrite a search path so `new_bin` is the only JDK `bin` on it.
///
/// Entries ending in `bin` whose parent directory name mentions java, jdk or
/// jre are dropped, as are empty entries and `new_bin` itself. `new_bin` is
/// then appended.
pub fn rewrite_search_path(current: &str, new_bin: &str, separator: char) -> String {
    let mut entries: Vec<&str> = current
        .split(separator)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .filter(|e| !is_jdk_bin_entry(e))
        .filter(|e| !same_entry(e, new_bin))
        .collect();
    entries.push(new_bin);
    entries.join(&separator.to_string())
}

fn same_entry(a: &str, b: &str) -> bool {
    let a = a.trim_end_matches(['/', '\\']);
    let b = b.trim_end_matches(['/', '\\']);
    if cfg!(windows) {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

fn is_jdk_bin_entry(entry: &str) -> bool {
    let is_bin = paths::last_segment(entry).is_some_and(|s| s.eq_ignore_ascii_case("bin"));
    if !is_bin {
        return false;
    }
    paths::parent_segment(entry).is_some_and(|parent| {
        let parent = parent.to_lowercase();
        STRIP_KEYWORDS.iter().any(|k| parent.contains(k))
    })
}
