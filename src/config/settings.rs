//! Persisted CLI settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::environment::Scope;
use crate::error::{JdkSwitchError, Result};

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV_VAR: &str = "JDKSWITCH_CONFIG";

/// User choices that survive between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Roots registered with `roots add`, in registration order.
    #[serde(default)]
    pub custom_roots: Vec<PathBuf>,

    /// Whether scans include the host's well-known roots.
    #[serde(default = "default_true")]
    pub scan_default_roots: bool,

    /// Scopes the last successful `use` wrote.
    #[serde(default = "default_scopes")]
    pub last_scopes: Vec<Scope>,
}

fn default_true() -> bool {
    true
}

fn default_scopes() -> Vec<Scope> {
    vec![Scope::User]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            custom_roots: Vec::new(),
            scan_default_roots: true,
            last_scopes: default_scopes(),
        }
    }
}

impl Settings {
    /// Settings file location.
    ///
    /// An explicit path wins, then [`CONFIG_ENV_VAR`], then
    /// `<config dir>/jdkswitch/config.yml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_default()
            .join("jdkswitch")
            .join("config.yml")
    }

    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self =
            serde_yaml::from_str(&content).map_err(|e| JdkSwitchError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to `path` using atomic write.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let content =
            serde_yaml::to_string(self).map_err(|e| JdkSwitchError::ConfigValidationError {
                message: format!("Failed to serialize settings: {}", e),
            })?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.last_scopes.is_empty() {
            return Err(JdkSwitchError::ConfigValidationError {
                message: "last_scopes must name at least one scope".to_string(),
            });
        }
        if let Some(root) = self.custom_roots.iter().find(|r| r.as_os_str().is_empty()) {
            return Err(JdkSwitchError::ConfigValidationError {
                message: format!("custom_roots contains an empty path: {:?}", root),
            });
        }
        Ok(())
    }
}
