//! Persistence tiers for environment variables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Registry key holding per-user environment variables.
pub const USER_REGISTRY_KEY: &str = r"HKEY_CURRENT_USER\Environment";

/// Registry key holding machine-wide environment variables.
pub const SYSTEM_REGISTRY_KEY: &str =
    r"HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// Where an environment variable is persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Current user only. Needs no elevation.
    User,
    /// Whole machine. Needs elevation.
    System,
}

impl Scope {
    /// Both scopes, USER first.
    pub const ALL: [Scope; 2] = [Scope::User, Scope::System];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User variables",
            Self::System => "System variables",
        }
    }

    /// Whether writing this scope needs elevated privilege.
    pub fn requires_elevation(&self) -> bool {
        matches!(self, Self::System)
    }

    /// Registry key backing this scope on Windows.
    pub fn registry_key(&self) -> &'static str {
        match self {
            Self::User => USER_REGISTRY_KEY,
            Self::System => SYSTEM_REGISTRY_KEY,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::System => write!(f, "system"),
        }
    }
}
