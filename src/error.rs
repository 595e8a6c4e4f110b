//! Error types for jdkswitch operations.
//!
//! This module defines [`JdkSwitchError`], the error type surfaced to callers,
//! and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe and read failures never become a `JdkSwitchError`; they are absorbed
//!   where they happen and surface as `None` or a sentinel value
//! - Environment writes are the only hard failures, and privilege failures are
//!   kept distinct from generic store failures so callers can offer remediation
//! - Use `anyhow::Error` (via `JdkSwitchError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::environment::Scope;

/// Core error type for jdkswitch operations.
#[derive(Debug, Error)]
pub enum JdkSwitchError {
    /// The backing store refused a write because the caller lacks privilege.
    #[error("Insufficient privilege to modify {scope} variable '{variable}': {message}")]
    Privilege {
        scope: Scope,
        variable: String,
        message: String,
    },

    /// The backing store rejected a write for any other reason.
    #[error("Failed to write {scope} variable '{variable}': {message}")]
    Store {
        scope: Scope,
        variable: String,
        message: String,
    },

    /// An external command could not be started (`code` is `None`) or
    /// exited non-zero.
    #[error("{}", describe_command_failure(.command, .code))]
    CommandFailed { command: String, code: Option<i32> },

    /// No discovered installation matches the requested target.
    #[error("No installation matches '{query}'")]
    InstallationNotFound { query: String },

    /// More than one discovered installation matches the requested target.
    #[error("'{query}' matches more than one installation: {}", matches.join(", "))]
    AmbiguousInstallation { query: String, matches: Vec<String> },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid settings structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A background worker stopped before delivering its result.
    #[error("Background worker '{worker}' stopped before delivering a result")]
    WorkerUnavailable { worker: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JdkSwitchError {
    /// Whether this error means elevation (or a narrower scope) is needed.
    pub fn is_privilege(&self) -> bool {
        matches!(self, Self::Privilege { .. })
    }

    /// The scope a write failure happened in, if this is a write failure.
    pub fn scope(&self) -> Option<Scope> {
        match self {
            Self::Privilege { scope, .. } | Self::Store { scope, .. } => Some(*scope),
            _ => None,
        }
    }
}

fn describe_command_failure(command: &str, code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("Command exited with code {}: {}", code, command),
        None => format!("Could not start command: {}", command),
    }
}

/// Result type alias for jdkswitch operations.
pub type Result<T> = std::result::Result<T, JdkSwitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_displays_scope_and_variable() {
        let err = JdkSwitchError::Privilege {
            scope: Scope::System,
            variable: "JAVA_HOME".into(),
            message: "Access is denied.".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("system"));
        assert!(msg.contains("JAVA_HOME"));
        assert!(msg.contains("Access is denied."));
    }

    #[test]
    fn privilege_is_distinguished_from_store() {
        let privilege = JdkSwitchError::Privilege {
            scope: Scope::System,
            variable: "PATH".into(),
            message: String::new(),
        };
        let store = JdkSwitchError::Store {
            scope: Scope::User,
            variable: "PATH".into(),
            message: "disk full".into(),
        };
        assert!(privilege.is_privilege());
        assert!(!store.is_privilege());
        assert_eq!(privilege.scope(), Some(Scope::System));
        assert_eq!(store.scope(), Some(Scope::User));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = JdkSwitchError::CommandFailed {
            command: "reg query".into(),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "Command exited with code 1: reg query");
        assert_eq!(err.scope(), None);
    }

    #[test]
    fn command_that_never_started_reads_cleanly() {
        let err = JdkSwitchError::CommandFailed {
            command: "reg add HKEY_CURRENT_USER\\Environment".into(),
            code: None,
        };
        let msg = err.to_string();
        assert_eq!(msg, "Could not start command: reg add HKEY_CURRENT_USER\\Environment");
        assert!(!msg.contains("None"));
    }

    #[test]
    fn ambiguous_installation_lists_matches() {
        let err = JdkSwitchError::AmbiguousInstallation {
            query: "17".into(),
            matches: vec!["/opt/jdk-17.0.1".into(), "/opt/jdk-17.0.2".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("/opt/jdk-17.0.1, /opt/jdk-17.0.2"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: JdkSwitchError = io_err.into();
        assert!(matches!(err, JdkSwitchError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(JdkSwitchError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
