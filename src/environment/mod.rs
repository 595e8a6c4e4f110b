//! Scoped environment storage and the switch coordinator.
//!
//! Variables live in one of two [`Scope`]s. The host decides what backs a
//! scope:
//!
//! - Windows: the registry, through `reg.exe` ([`RegistryStore`])
//! - Linux and macOS: managed shell profile fragments ([`ProfileStore`])
//!
//! [`MemoryStore`] backs both scopes in memory for tests.

pub mod broadcast;
pub mod memory;
pub mod profile;
pub mod registry;
pub mod scope;
pub mod store;
pub mod switch;

use std::sync::Arc;

use crate::exec::CommandRunner;

pub use broadcast::{Broadcaster, NoopBroadcaster, PowerShellBroadcaster};
pub use memory::{MemoryStore, WriteFailure};
pub use profile::ProfileStore;
pub use registry::RegistryStore;
pub use scope::Scope;
pub use store::EnvironmentStore;
pub use switch::{rewrite_search_path, SwitchCoordinator, SwitchOutcome};

/// Variable holding the active installation root.
pub const HOME_VARIABLE: &str = "JAVA_HOME";

/// Variable holding the executable search path.
pub const SEARCH_PATH_VARIABLE: &str = "PATH";

/// The host's environment store.
pub fn default_store(runner: Arc<dyn CommandRunner>) -> Arc<dyn EnvironmentStore> {
    if cfg!(windows) {
        Arc::new(RegistryStore::new(runner))
    } else {
        Arc::new(ProfileStore::new())
    }
}

/// The host's change broadcaster.
pub fn default_broadcaster(runner: Arc<dyn CommandRunner>) -> Arc<dyn Broadcaster> {
    if cfg!(windows) {
        Arc::new(PowerShellBroadcaster::new(runner))
    } else {
        Arc::new(NoopBroadcaster)
    }
}
