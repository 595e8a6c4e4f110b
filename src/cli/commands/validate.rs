//! Validate command implementation.
//!
//! The `jdkswitch validate` command probes one directory and reports what
//! it found.

use crate::cli::args::ValidateArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::backends::Backends;
use super::dispatcher::{Command, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand {
    backends: Backends,
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(backends: Backends, args: ValidateArgs) -> Self {
        Self { backends, args }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let probe = self.backends.probe();
        let path = &self.args.path;

        let Some(record) = probe.probe(path) else {
            ui.error(&format!("{} is not an installation", path.display()));
            let layout = probe.layout();
            ui.show_hint(&format!(
                "An installation has bin/{} and bin/{}",
                layout.interpreter, layout.compiler
            ));
            return Ok(CommandResult::failure(1));
        };

        ui.success(&format!("{} is an installation", record.install_path().display()));
        ui.message(&format!("  Version: {}", record.version()));
        ui.message(&format!("  Bits:    {}", record.bitness().bits()));
        if !record.has_known_version() {
            ui.show_hint("The version could not be read from the metadata file or the interpreter");
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{MemoryStore, NoopBroadcaster};
    use crate::exec::ScriptedRunner;
    use crate::layout::Layout;
    use crate::ui::MockUI;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn backends() -> Backends {
        Backends::new(
            Arc::new(ScriptedRunner::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(NoopBroadcaster),
        )
    }

    #[test]
    fn accepts_installation() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("jdk-64");
        fs::create_dir_all(home.join("bin")).unwrap();
        let layout = Layout::host();
        fs::write(layout.interpreter_path(&home), "").unwrap();
        fs::write(layout.compiler_path(&home), "").unwrap();
        fs::write(home.join("release"), "JAVA_VERSION=\"21.0.1\"\n").unwrap();
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(backends(), ValidateArgs { path: home })
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("21.0.1"));
        assert!(ui.has_message("64"));
    }

    #[test]
    fn rejects_plain_directory() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(
            backends(),
            ValidateArgs {
                path: temp.path().to_path_buf(),
            },
        )
        .execute(&mut ui)
        .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("is not an installation"));
        assert!(ui.has_hint("bin/"));
    }
}
