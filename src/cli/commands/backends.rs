//! Runner, stores and layout shared by the commands.
//!
//! Commands never build their own scanner or resolver; they get them from
//! [`Backends`], so tests can swap the host's runner and stores for scripted
//! ones.

use std::sync::Arc;

use crate::config::Settings;
use crate::environment::{
    default_broadcaster, default_store, Broadcaster, EnvironmentStore, SwitchCoordinator,
};
use crate::error::Result;
use crate::exec::{CommandRunner, SystemRunner};
use crate::install::{InstallationProbe, InstallationRecord};
use crate::layout::Layout;
use crate::resolve::{ActiveResolver, Resolution};
use crate::scan::{PathCatalog, Scanner};
use crate::ui::UserInterface;

/// Everything a command needs to reach the host.
#[derive(Clone)]
pub struct Backends {
    /// Runs external programs.
    pub runner: Arc<dyn CommandRunner>,
    /// Reads and writes scoped variables.
    pub store: Arc<dyn EnvironmentStore>,
    /// Announces environment changes.
    pub broadcaster: Arc<dyn Broadcaster>,
    /// Executable names and separators.
    pub layout: Layout,
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Result of scanning and resolving in one go.
#[derive(Debug)]
pub struct Discovery {
    /// Installations in scan order, with the active one flagged.
    pub records: Vec<InstallationRecord>,
    /// Which record is active and why.
    pub resolution: Option<Resolution>,
}

impl Discovery {
    /// The active record, if any.
    pub fn active(&self) -> Option<&InstallationRecord> {
        self.resolution.map(|r| &self.records[r.index])
    }
}

impl Backends {
    /// The host's runner, store and broadcaster.
    pub fn system() -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());
        Self {
            store: default_store(Arc::clone(&runner)),
            broadcaster: default_broadcaster(Arc::clone(&runner)),
            runner,
            layout: Layout::host(),
        }
    }

    /// Explicit backends using the host layout.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        store: Arc<dyn EnvironmentStore>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            runner,
            store,
            broadcaster,
            layout: Layout::host(),
        }
    }

    /// Replace the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// A probe over these backends.
    pub fn probe(&self) -> InstallationProbe {
        InstallationProbe::with_layout(Arc::clone(&self.runner), self.layout)
    }

    /// A scanner over the roots `settings` describes.
    ///
    /// Custom roots that no longer exist are skipped with a warning; they
    /// stay in the settings file.
    pub fn scanner(&self, settings: &Settings, ui: &mut dyn UserInterface) -> Scanner {
        let mut catalog = if settings.scan_default_roots {
            PathCatalog::with_defaults()
        } else {
            PathCatalog::empty()
        };

        for root in &settings.custom_roots {
            if catalog.register(root) {
                continue;
            }
            if root.is_dir() {
                tracing::debug!("Custom root {} is already scanned", root.display());
            } else {
                ui.warning(&format!(
                    "Skipping custom root {} (not a directory)",
                    root.display()
                ));
            }
        }

        Scanner::with_catalog(catalog, self.probe())
    }

    /// A resolver over these backends.
    pub fn resolver(&self) -> ActiveResolver {
        ActiveResolver::with_layout(
            Arc::clone(&self.store),
            Arc::clone(&self.runner),
            self.layout,
        )
    }

    /// A switch coordinator over these backends.
    pub fn coordinator(&self) -> SwitchCoordinator {
        SwitchCoordinator::with_layout(
            Arc::clone(&self.store),
            Arc::clone(&self.broadcaster),
            self.layout,
        )
    }

    /// Scan in the background behind a spinner, then resolve the active
    /// installation.
    pub fn discover(&self, settings: &Settings, ui: &mut dyn UserInterface) -> Result<Discovery> {
        let scanner = self.scanner(settings, ui);
        let task = scanner.scan_async()?;

        let mut spinner = ui.start_spinner("Scanning for installations...");
        let mut records = match task.wait() {
            Ok(records) => records,
            Err(e) => {
                spinner.finish_error("Scan failed");
                return Err(e);
            }
        };
        spinner.finish_clear();

        let resolution = self.resolver().resolve(&mut records);
        tracing::debug!(
            "Found {} installations, active: {:?}",
            records.len(),
            resolution
        );

        Ok(Discovery {
            records,
            resolution,
        })
    }
}
