//! In-memory backing for tests and dry runs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::{JdkSwitchError, Result};

use super::scope::Scope;
use super::store::EnvironmentStore;

/// Kind of failure injected into a [`MemoryStore`] write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailure {
    /// Fail as if access were denied.
    Privilege,
    /// Fail with a generic store error.
    Store,
}

#[derive(Debug, Default)]
struct State {
    values: HashMap<(Scope, String), String>,
    failures: HashMap<(Scope, String), WriteFailure>,
    writes: Vec<(Scope, String, String)>,
}

/// Scoped variables held in a map, with injectable write failures.
///
/// ```
/// use jdkswitch::environment::{EnvironmentStore, MemoryStore, Scope, WriteFailure};
///
/// let store = MemoryStore::new()
///     .with_value(Scope::User, "JAVA_HOME", "/opt/jdk-11")
///     .fail_writes(Scope::System, "PATH", WriteFailure::Privilege);
///
/// assert_eq!(store.read("JAVA_HOME", Scope::User).as_deref(), Some("/opt/jdk-11"));
/// assert!(store.write("PATH", "/x", Scope::System).unwrap_err().is_privilege());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value.
    pub fn with_value(self, scope: Scope, name: &str, value: &str) -> Self {
        self.lock()
            .values
            .insert((scope, name.to_string()), value.to_string());
        self
    }

    /// Make every write of `name` in `scope` fail.
    pub fn fail_writes(self, scope: Scope, name: &str, failure: WriteFailure) -> Self {
        self.lock().failures.insert((scope, name.to_string()), failure);
        self
    }

    /// Current value, bypassing the soft-read rules.
    pub fn get(&self, scope: Scope, name: &str) -> Option<String> {
        self.lock().values.get(&(scope, name.to_string())).cloned()
    }

    /// Successful writes, in order.
    pub fn writes(&self) -> Vec<(Scope, String, String)> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnvironmentStore for MemoryStore {
    fn read(&self, name: &str, scope: Scope) -> Option<String> {
        self.get(scope, name).filter(|v| !v.is_empty())
    }

    fn write(&self, name: &str, value: &str, scope: Scope) -> Result<()> {
        let mut state = self.lock();
        let key = (scope, name.to_string());

        if let Some(failure) = state.failures.get(&key) {
            let variable = name.to_string();
            return Err(match failure {
                WriteFailure::Privilege => JdkSwitchError::Privilege {
                    scope,
                    variable,
                    message: "Access is denied.".to_string(),
                },
                WriteFailure::Store => JdkSwitchError::Store {
                    scope,
                    variable,
                    message: "injected failure".to_string(),
                },
            });
        }

        state.values.insert(key, value.to_string());
        state
            .writes
            .push((scope, name.to_string(), value.to_string()));
        Ok(())
    }
}
