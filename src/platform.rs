//! Host checks used by the CLI.

use crate::exec::CommandRunner;

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
///
/// The `use` command checks this before writing SYSTEM scope so it can warn
/// up front instead of after the first denied write.
pub fn is_elevated(runner: &dyn CommandRunner) -> bool {
    #[cfg(unix)]
    {
        let _ = runner;
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        has_admin_session(runner)
    }
}

/// Whether `net session` succeeds, which it only does from an elevated
/// Windows shell.
pub fn has_admin_session(runner: &dyn CommandRunner) -> bool {
    match runner.run("net", &["session"]) {
        Ok(output) => output.success,
        Err(e) => {
            tracing::debug!("Elevation check failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{CommandOutput, ScriptedRunner};

    #[test]
    fn is_ci_does_not_panic() {
        let _ = is_ci();
    }

    #[test]
    fn is_elevated_does_not_panic() {
        let _ = is_elevated(&ScriptedRunner::new());
    }

    #[test]
    fn admin_session_follows_net_session_exit() {
        let elevated = ScriptedRunner::new().on(
            &["net session"],
            CommandOutput::ok("There are no entries in the list.", ""),
        );
        assert!(has_admin_session(&elevated));
        assert_eq!(elevated.count(&["net session"]), 1);

        let denied = ScriptedRunner::new().on(
            &["net session"],
            CommandOutput::failed(2, "", "System error 5 has occurred.\n\nAccess is denied."),
        );
        assert!(!has_admin_session(&denied));

        assert!(!has_admin_session(&ScriptedRunner::new()));
    }
}
