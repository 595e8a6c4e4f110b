//! The set of filesystem roots a scan walks.

use std::path::{Path, PathBuf};

use crate::paths;

/// Well-known installation roots for the host OS.
///
/// Roots that don't exist are kept; the scanner skips them quietly.
pub fn default_roots() -> Vec<PathBuf> {
    let home = dirs::home_dir();
    let mut roots = Vec::new();

    if cfg!(windows) {
        roots.push(PathBuf::from(r"C:\Program Files\Java"));
        roots.push(PathBuf::from(r"C:\Program Files (x86)\Java"));
        roots.push(PathBuf::from(r"C:\Program Files\Microsoft"));
        if let Some(home) = &home {
            roots.push(home.join("AppData").join("Local").join("Programs").join("Java"));
        }
    } else if cfg!(target_os = "macos") {
        roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines"));
        if let Some(home) = &home {
            roots.push(home.join("Library/Java/JavaVirtualMachines"));
            roots.push(home.join(".jdks"));
            roots.push(home.join(".sdkman/candidates/java"));
        }
    } else {
        roots.push(PathBuf::from("/usr/lib/jvm"));
        roots.push(PathBuf::from("/usr/java"));
        roots.push(PathBuf::from("/opt/java"));
        if let Some(home) = &home {
            roots.push(home.join(".jdks"));
            roots.push(home.join(".sdkman/candidates/java"));
        }
    }

    roots
}

/// Default roots plus user-registered custom roots.
///
/// Entries are normalized absolute paths and never repeat. The catalog does
/// not persist anything; callers that want custom roots to survive a restart
/// read [`custom_roots`](Self::custom_roots) and register them again.
#[derive(Debug, Clone, Default)]
pub struct PathCatalog {
    defaults: Vec<PathBuf>,
    custom: Vec<PathBuf>,
}

impl PathCatalog {
    /// A catalog with no roots at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A catalog seeded with the host's [`default_roots`].
    pub fn with_defaults() -> Self {
        Self::with_default_roots(default_roots())
    }

    /// A catalog seeded with explicit default roots.
    pub fn with_default_roots(defaults: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut catalog = Self::empty();
        for root in defaults {
            let root = paths::normalize(&root);
            if !catalog.contains(&root) {
                catalog.defaults.push(root);
            }
        }
        catalog
    }

    /// A catalog holding previously saved custom roots and no defaults.
    ///
    /// Unlike [`register`](Self::register) this keeps roots that are missing
    /// right now, so a saved root on an unplugged drive can still be removed.
    pub fn with_saved_roots(saved: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut catalog = Self::empty();
        for root in saved {
            let root = paths::normalize(&root);
            if !catalog.contains(&root) {
                catalog.custom.push(root);
            }
        }
        catalog
    }

    /// Add a custom root.
    ///
    /// Returns false if the path doesn't exist, isn't a directory, or
    /// normalizes to a root already in the catalog.
    pub fn register(&mut self, path: &Path) -> bool {
        if !path.is_dir() {
            tracing::debug!("Refusing root {}: not a directory", path.display());
            return false;
        }

        let root = paths::normalize(path);
        if self.contains(&root) {
            tracing::debug!("Refusing root {}: already registered", root.display());
            return false;
        }

        tracing::debug!("Registered root {}", root.display());
        self.custom.push(root);
        true
    }

    /// Remove a custom root. Default roots cannot be removed.
    ///
    /// Returns false if no custom root normalizes to `path`.
    pub fn unregister(&mut self, path: &Path) -> bool {
        let key = paths::identity_key(path);
        let before = self.custom.len();
        self.custom.retain(|r| paths::identity_key(r) != key);
        let removed = self.custom.len() != before;
        if removed {
            tracing::debug!("Unregistered root {}", path.display());
        }
        removed
    }

    /// Default roots followed by custom roots in registration order.
    pub fn roots(&self) -> Vec<PathBuf> {
        self.defaults.iter().chain(&self.custom).cloned().collect()
    }

    /// Custom roots only, in registration order.
    pub fn custom_roots(&self) -> &[PathBuf] {
        &self.custom
    }

    /// Default roots only.
    pub fn default_roots(&self) -> &[PathBuf] {
        &self.defaults
    }

    /// Whether any root normalizes to `path`.
    pub fn contains(&self, path: &Path) -> bool {
        let key = paths::identity_key(path);
        self.defaults
            .iter()
            .chain(&self.custom)
            .any(|r| paths::identity_key(r) == key)
    }
}
