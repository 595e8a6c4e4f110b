//! POSIX shell profile backing for Linux and macOS.
//!
//! Each scope is a managed shell fragment of `export` lines. Login shells
//! source it: the USER fragment from the user's profile, the SYSTEM fragment
//! through `/etc/profile.d`. The search-path variable is written so it
//! prepends to whatever `$PATH` the shell inherited, and read back without
//! that suffix.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{JdkSwitchError, Result};

use super::scope::Scope;
use super::store::EnvironmentStore;
use super::SEARCH_PATH_VARIABLE;

/// Fragment sourced for every user on the machine.
pub const SYSTEM_PROFILE: &str = "/etc/profile.d/jdkswitch.sh";

const HEADER: &str = "# Managed by jdkswitch. Manual edits are overwritten.";

/// Suffix that chains the stored search path onto the inherited one.
const INHERITED_PATH: &str = ":$PATH";

/// Stores variables as `export` lines in one shell fragment per scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStore {
    user_file: PathBuf,
    system_file: PathBuf,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore {
    /// Fragments at their standard locations.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_default();
        Self::with_files(config_dir.join("jdkswitch").join("env.sh"), SYSTEM_PROFILE)
    }

    /// Fragments at explicit locations.
    pub fn with_files(user_file: impl Into<PathBuf>, system_file: impl Into<PathBuf>) -> Self {
        Self {
            user_file: user_file.into(),
            system_file: system_file.into(),
        }
    }

    /// Fragment backing `scope`.
    pub fn file_for(&self, scope: Scope) -> &Path {
        match scope {
            Scope::User => &self.user_file,
            Scope::System => &self.system_file,
        }
    }

    fn save(&self, scope: Scope, entries: &[(String, String)]) -> io::Result<()> {
        let path = self.file_for(scope);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = render(entries);
        let temp_path = path.with_extension("sh.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)
    }
}

impl EnvironmentStore for ProfileStore {
    fn read(&self, name: &str, scope: Scope) -> Option<String> {
        let path = self.file_for(scope);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!("Failed to read {}: {}", path.display(), e);
                }
                return None;
            }
        };

        parse(&content)
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
            .filter(|v| !v.is_empty())
    }

    fn write(&self, name: &str, value: &str, scope: Scope) -> Result<()> {
        let path = self.file_for(scope);
        let mut entries = match fs::read_to_string(path) {
            Ok(content) => parse(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(write_error(e, name, scope)),
        };

        match entries.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((name.to_string(), value.to_string())),
        }

        self.save(scope, &entries)
            .map_err(|e| write_error(e, name, scope))?;
        tracing::debug!("Wrote {} to {}", name, path.display());
        Ok(())
    }
}

fn write_error(e: io::Error, name: &str, scope: Scope) -> JdkSwitchError {
    let variable = name.to_string();
    let message = e.to_string();
    if e.kind() == io::ErrorKind::PermissionDenied {
        JdkSwitchError::Privilege {
            scope,
            variable,
            message,
        }
    } else {
        JdkSwitchError::Store {
            scope,
            variable,
            message,
        }
    }
}

fn render(entries: &[(String, String)]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for (name, value) in entries {
        let mut rendered = escape(value);
        if name == SEARCH_PATH_VARIABLE {
            rendered.push_str(INHERITED_PATH);
        }
        out.push_str(&format!("export {}=\"{}\"\n", name, rendered));
    }
    out
}

fn parse(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("export ")?;
            let (name, quoted) = rest.split_once('=')?;
            let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
            let inner = if name == SEARCH_PATH_VARIABLE {
                inner
                    .strip_suffix(INHERITED_PATH)
                    .or_else(|| inner.strip_suffix("$PATH"))
                    .unwrap_or(inner)
            } else {
                inner
            };
            Some((name.to_string(), unescape(inner)))
        })
        .collect()
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
