//! jdkswitch - Find installed JDKs and switch the active one.
//!
//! jdkswitch discovers JDK installations under well-known and user-registered
//! directories, works out which one the environment currently points at, and
//! switches by rewriting `JAVA_HOME` and `PATH` in the user or system scope.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Persisted settings
//! - [`environment`] - Scoped variable stores and the switch coordinator
//! - [`error`] - Error types and result aliases
//! - [`exec`] - External command execution
//! - [`install`] - Installation records and the probe that builds them
//! - [`layout`] - Host-specific executable names and separators
//! - [`paths`] - Path normalization and identity
//! - [`platform`] - CI and elevation detection
//! - [`resolve`] - Working out the active installation
//! - [`scan`] - Root catalog and scanner
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`worker`] - Background worker for scans and switches
//!
//! # Example
//!
//! ```
//! use jdkswitch::install::version::{compare, VersionMatch};
//!
//! assert_eq!(compare("17.0.2", "17.0.9"), Some(VersionMatch::MajorMinor));
//! assert_eq!(compare("11", "17.0.2"), None);
//! ```
//!
//! For scanning and switching against real directories, see the integration
//! tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod exec;
pub mod install;
pub mod layout;
pub mod paths;
pub mod platform;
pub mod resolve;
pub mod scan;
pub mod ui;
pub mod worker;

pub use error::{JdkSwitchError, Result};
