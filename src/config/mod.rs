//! Configuration for the `jdkswitch` binary.
//!
//! The library core never touches this; the CLI loads [`Settings`] at
//! start-up and saves them after commands that change them.
//!
//! # Example
//!
//! ```
//! use jdkswitch::config::Settings;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//!
//! let mut settings = Settings::load(&path).unwrap();
//! settings.scan_default_roots = false;
//! settings.save(&path).unwrap();
//!
//! assert!(!Settings::load(&path).unwrap().scan_default_roots);
//! ```

pub mod settings;

pub use settings::{Settings, CONFIG_ENV_VAR};
