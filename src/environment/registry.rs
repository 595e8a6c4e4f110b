//! Windows registry backing, driven through `reg.exe`.

use std::sync::Arc;

use crate::error::{JdkSwitchError, Result};
use crate::exec::CommandRunner;

use super::scope::Scope;
use super::store::EnvironmentStore;

/// Value type written for every variable, so `%VAR%` references expand.
pub const VALUE_TYPE: &str = "REG_EXPAND_SZ";

/// Diagnostic fragments `reg add` prints when the caller lacks privilege.
const ACCESS_DENIED_SIGNATURES: &[&str] = &["Access is denied", "拒绝访问"];

/// Reads and writes environment variables under the scope's registry key.
#[derive(Clone)]
pub struct RegistryStore {
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for RegistryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryStore").finish_non_exhaustive()
    }
}

impl RegistryStore {
    /// Create a store that runs `reg` through `runner`.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl EnvironmentStore for RegistryStore {
    fn read(&self, name: &str, scope: Scope) -> Option<String> {
        let key = scope.registry_key();
        let output = match self.runner.run("reg", &["query", key, "/v", name]) {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("reg query for {} ({}) failed: {}", name, scope, e);
                return None;
            }
        };

        if !output.success {
            tracing::debug!("{} not set in {} scope", name, scope);
            return None;
        }

        parse_query_output(&output.stdout, name)
    }

    fn write(&self, name: &str, value: &str, scope: Scope) -> Result<()> {
        let key = scope.registry_key();
        let output = self
            .runner
            .run(
                "reg",
                &["add", key, "/v", name, "/t", VALUE_TYPE, "/d", value, "/f"],
            )
            .map_err(|e| JdkSwitchError::Store {
                scope,
                variable: name.to_string(),
                message: e.to_string(),
            })?;

        if output.success {
            tracing::debug!("Wrote {} in {} scope", name, scope);
            return Ok(());
        }

        let message = output.combined().trim().to_string();
        if is_access_denied(&message) {
            Err(JdkSwitchError::Privilege {
                scope,
                variable: name.to_string(),
                message,
            })
        } else {
            Err(JdkSwitchError::Store {
                scope,
                variable: name.to_string(),
                message,
            })
        }
    }
}

/// Whether diagnostic text from a failed write means access was denied.
pub fn is_access_denied(text: &str) -> bool {
    ACCESS_DENIED_SIGNATURES.iter().any(|sig| text.contains(sig))
}

/// Pull the value of `name` out of `reg query` output.
///
/// The matching line reads `NAME    REG_TYPE    value`; the value is
/// everything after the first whitespace following the type marker.
pub fn parse_query_output(output: &str, name: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let trimmed = line.trim();
        let first = trimmed.split_whitespace().next()?;
        if !first.eq_ignore_ascii_case(name) {
            return None;
        }

        let rest = &trimmed[first.len()..];
        let marker = rest.find("REG_")?;
        let after_marker = &rest[marker..];
        let value_start = after_marker.find(char::is_whitespace)?;
        let value = after_marker[value_start..].trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
