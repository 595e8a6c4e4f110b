//! Current command implementation.
//!
//! The `jdkswitch current` command shows which installation is active.
//! Exits 1 when none is.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::CurrentArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ui::UserInterface;

use super::backends::Backends;
use super::dispatcher::{Command, CommandResult};

/// The current command implementation.
pub struct CurrentCommand {
    settings_path: PathBuf,
    backends: Backends,
    args: CurrentArgs,
}

impl CurrentCommand {
    /// Create a new current command.
    pub fn new(settings_path: &Path, backends: Backends, args: CurrentArgs) -> Self {
        Self {
            settings_path: settings_path.to_path_buf(),
            backends,
            args,
        }
    }
}

impl Command for CurrentCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = Settings::load(&self.settings_path)?;
        let discovery = self.backends.discover(&settings, ui)?;
        let active = discovery.active();

        if self.args.json {
            let value = json!({
                "installation": active,
                "resolved_by": discovery.resolution.map(|r| r.tier.to_string()),
            });
            ui.message(&serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?);
        } else {
            match (active, discovery.resolution) {
                (Some(record), Some(resolution)) => {
                    ui.message(&record.to_string());
                    if ui.output_mode().shows_details() {
                        ui.show_hint(&format!("Found via {}", resolution.tier));
                    }
                }
                _ => {
                    ui.warning("No active installation");
                    ui.show_hint("Pick one with `jdkswitch use`");
                }
            }
        }

        Ok(if active.is_some() {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{MemoryStore, NoopBroadcaster, Scope};
    use crate::exec::ScriptedRunner;
    use crate::layout::Layout;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn fixture(home_value: Option<&str>) -> (TempDir, PathBuf, Backends) {
        let temp = TempDir::new().unwrap();
        let roots = temp.path().join("roots");
        let home = roots.join("jdk-17");
        fs::create_dir_all(home.join("bin")).unwrap();
        let layout = Layout::host();
        fs::write(layout.interpreter_path(&home), "").unwrap();
        fs::write(layout.compiler_path(&home), "").unwrap();
        fs::write(home.join("release"), "JAVA_VERSION=\"17.0.2\"\n").unwrap();

        let settings_path = temp.path().join("config.yml");
        Settings {
            custom_roots: vec![roots],
            scan_default_roots: false,
            ..Default::default()
        }
        .save(&settings_path)
        .unwrap();

        let mut store = MemoryStore::new();
        if let Some(value) = home_value {
            let value = value.replace("{home}", &home.to_string_lossy());
            store = store.with_value(Scope::User, "JAVA_HOME", &value);
        }
        let backends = Backends::new(
            Arc::new(ScriptedRunner::new()),
            Arc::new(store),
            Arc::new(NoopBroadcaster),
        );
        (temp, settings_path, backends)
    }

    #[test]
    fn shows_active_installation() {
        let (_temp, settings_path, backends) = fixture(Some("{home}"));
        let cmd = CurrentCommand::new(&settings_path, backends, CurrentArgs::default());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("17.0.2"));
        assert!(ui.has_hint("user JAVA_HOME"));
    }

    #[test]
    fn nothing_active_exits_one() {
        let (_temp, settings_path, backends) = fixture(None);
        let cmd = CurrentCommand::new(&settings_path, backends, CurrentArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_warning("No active installation"));
    }

    #[test]
    fn json_reports_null_when_nothing_active() {
        let (_temp, settings_path, backends) = fixture(None);
        let cmd = CurrentCommand::new(&settings_path, backends, CurrentArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert!(value["installation"].is_null());
    }
}
