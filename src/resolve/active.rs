//! Deciding which discovered installation is the active one.
//!
//! Three signals can name the active installation and they don't always
//! agree. They are tried in a fixed order and the first that matches a
//! candidate wins:
//!
//! 1. The home variable, USER scope first, then SYSTEM
//! 2. The root of the interpreter the search path resolves to
//! 3. The version that interpreter reports, matched loosely
//!
//! A signal that can't be read counts as "no match" and the next one is
//! tried. Ending with nothing active is a normal result.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::environment::{EnvironmentStore, Scope, HOME_VARIABLE};
use crate::exec::CommandRunner;
use crate::install::version::{compare, parse_version_output};
use crate::install::InstallationRecord;
use crate::layout::Layout;
use crate::paths;

use super::locate::{installation_root, locate_interpreter};

/// Which signal picked the active installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// The home variable in a persistent scope.
    Configured(Scope),
    /// The root of the resolved interpreter binary.
    ResolvedBinary,
    /// The version reported by the resolved interpreter.
    Version,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured(scope) => write!(f, "{} {}", scope, HOME_VARIABLE),
            Self::ResolvedBinary => write!(f, "resolved interpreter path"),
            Self::Version => write!(f, "resolved interpreter version"),
        }
    }
}

/// The record a resolver pass marked active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Index into the slice passed to [`ActiveResolver::resolve`].
    pub index: usize,
    /// Signal that matched.
    pub tier: Tier,
}

/// Marks at most one record as active.
#[derive(Clone)]
pub struct ActiveResolver {
    store: Arc<dyn EnvironmentStore>,
    runner: Arc<dyn CommandRunner>,
    layout: Layout,
}

impl fmt::Debug for ActiveResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveResolver")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl ActiveResolver {
    /// Create a resolver for the host layout.
    pub fn new(store: Arc<dyn EnvironmentStore>, runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_layout(store, runner, Layout::host())
    }

    /// Create a resolver with an explicit layout.
    pub fn with_layout(
        store: Arc<dyn EnvironmentStore>,
        runner: Arc<dyn CommandRunner>,
        layout: Layout,
    ) -> Self {
        Self {
            store,
            runner,
            layout,
        }
    }

    /// Clear every active flag, then mark the record the first matching
    /// signal names.
    pub fn resolve(&self, records: &mut [InstallationRecord]) -> Option<Resolution> {
        for record in records.iter_mut() {
            record.set_active(false);
        }

        let resolution = self.match_configured(records).or_else(|| {
            let interpreter = locate_interpreter(self.runner.as_ref(), &self.layout);
            self.match_resolved_binary(records, interpreter.as_deref())
                .or_else(|| self.match_version(records, interpreter.as_deref()))
        });

        match resolution {
            Some(resolution) => {
                records[resolution.index].set_active(true);
                tracing::debug!(
                    "Active installation {} (by {})",
                    records[resolution.index],
                    resolution.tier
                );
            }
            None => tracing::debug!("No active installation found"),
        }
        resolution
    }

    fn match_configured(&self, records: &[InstallationRecord]) -> Option<Resolution> {
        let (scope, value) = Scope::ALL.iter().find_map(|&scope| {
            self.store
                .read(HOME_VARIABLE, scope)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (scope, v))
        })?;

        let configured = paths::identity_key(Path::new(&value));
        let index = records
            .iter()
            .position(|r| paths::identity_key(r.install_path()) == configured);

        if index.is_none() {
            tracing::debug!("{} ({}) = {} matches no candidate", HOME_VARIABLE, scope, value);
        }
        index.map(|index| Resolution {
            index,
            tier: Tier::Configured(scope),
        })
    }

    fn match_resolved_binary(
        &self,
        records: &[InstallationRecord],
        interpreter: Option<&Path>,
    ) -> Option<Resolution> {
        let root = installation_root(interpreter?)?;
        let index = records
            .iter()
            .position(|r| same_installation(r.install_path(), &root));

        if index.is_none() {
            tracing::debug!("Resolved root {} matches no candidate", root.display());
        }
        index.map(|index| Resolution {
            index,
            tier: Tier::ResolvedBinary,
        })
    }

    fn match_version(
        &self,
        records: &[InstallationRecord],
        interpreter: Option<&Path>,
    ) -> Option<Resolution> {
        let program = interpreter
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| self.layout.interpreter_stem().to_string());

        let output = match self.runner.run(&program, &["-version"]) {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("Version probe of {} failed: {}", program, e);
                return None;
            }
        };
        let actual = parse_version_output(&output.combined())?;
        tracing::debug!("Resolved interpreter reports version {}", actual);

        records
            .iter()
            .position(|r| r.has_known_version() && compare(r.version(), &actual).is_some())
            .map(|index| Resolution {
                index,
                tier: Tier::Version,
            })
    }
}

fn same_installation(candidate: &Path, root: &Path) -> bool {
    if paths::identity_key(candidate) == paths::identity_key(root) {
        return true;
    }
    std::fs::canonicalize(candidate)
        .map(|c| paths::identity_key(&c) == paths::identity_key(root))
        .unwrap_or(false)
}
