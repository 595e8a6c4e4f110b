//! The scoped environment store capability.

use crate::error::Result;

use super::scope::Scope;

/// Persistent, scoped storage for environment variables.
///
/// Reads are soft: anything that goes wrong while reading, including a
/// missing variable, is `None`. Writes are hard and distinguish
/// [`Privilege`](crate::JdkSwitchError::Privilege) failures from generic
/// [`Store`](crate::JdkSwitchError::Store) failures.
pub trait EnvironmentStore: Send + Sync {
    /// Current value of `name` in `scope`, if it can be read.
    fn read(&self, name: &str, scope: Scope) -> Option<String>;

    /// Set `name` to `value` in `scope`, overwriting any existing value.
    ///
    /// Success means the backing reported success; nothing is read back.
    fn write(&self, name: &str, value: &str, scope: Scope) -> Result<()>;
}
