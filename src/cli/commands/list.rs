//! List command implementation.
//!
//! The `jdkswitch list` command scans every root and shows what it found,
//! marking the active installation.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::ListArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ui::{SwitchTheme, Table, UserInterface};

use super::backends::{Backends, Discovery};
use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    settings_path: PathBuf,
    backends: Backends,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(settings_path: &Path, backends: Backends, args: ListArgs) -> Self {
        Self {
            settings_path: settings_path.to_path_buf(),
            backends,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = Settings::load(&self.settings_path)?;
        let discovery = self.backends.discover(&settings, ui)?;

        if self.args.json {
            ui.message(&render_json(&discovery)?);
            return Ok(CommandResult::success());
        }

        if discovery.records.is_empty() {
            ui.message("No installations found.");
            ui.show_hint("Register a directory with `jdkswitch roots add <path>`");
            return Ok(CommandResult::success());
        }

        let theme = SwitchTheme::for_terminal();
        ui.show_header("Installations");
        ui.message(&render_table(&discovery, &theme));

        match discovery.resolution {
            Some(resolution) if ui.output_mode().shows_details() => {
                ui.message(&format!(
                    "{}",
                    theme
                        .dim
                        .apply_to(format!("Active installation found via {}", resolution.tier))
                ));
            }
            Some(_) => {}
            None => ui.show_hint("No active installation; pick one with `jdkswitch use`"),
        }

        Ok(CommandResult::success())
    }
}

fn render_table(discovery: &Discovery, theme: &SwitchTheme) -> String {
    let mut table = Table::new(&["", "Version", "Bits", "Path"]);
    for record in &discovery.records {
        table.add_row(vec![
            theme.format_active_marker(record.is_active()),
            record.version().to_string(),
            record.bitness().bits().to_string(),
            record.install_path().display().to_string(),
        ]);
    }
    table.render()
}

fn render_json(discovery: &Discovery) -> Result<String> {
    let value = json!({
        "installations": discovery.records,
        "resolved_by": discovery.resolution.map(|r| r.tier.to_string()),
    });
    Ok(serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{MemoryStore, NoopBroadcaster, Scope};
    use crate::exec::{CommandOutput, ScriptedRunner};
    use crate::ui::MockUI;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn make_jdk(root: &Path, name: &str, version: &str) -> PathBuf {
        let home = root.join(name);
        let bin = home.join("bin");
        fs::create_dir_all(&bin).unwrap();
        let layout = crate::layout::Layout::host();
        fs::write(layout.interpreter_path(&home), "").unwrap();
        fs::write(layout.compiler_path(&home), "").unwrap();
        fs::write(
            home.join("release"),
            format!("JAVA_VERSION=\"{}\"\n", version),
        )
        .unwrap();
        home
    }

    fn setup(store: MemoryStore) -> (TempDir, PathBuf, Backends) {
        let temp = TempDir::new().unwrap();
        let roots = temp.path().join("roots");
        fs::create_dir_all(&roots).unwrap();
        let settings_path = temp.path().join("config.yml");
        Settings {
            custom_roots: vec![roots],
            scan_default_roots: false,
            ..Default::default()
        }
        .save(&settings_path)
        .unwrap();

        let runner = ScriptedRunner::new().on(&["-version"], CommandOutput::ok("", ""));
        let backends = Backends::new(
            Arc::new(runner),
            Arc::new(store),
            Arc::new(NoopBroadcaster),
        );
        (temp, settings_path, backends)
    }

    #[test]
    fn empty_roots_show_hint() {
        let (_temp, settings_path, backends) = setup(MemoryStore::new());
        let cmd = ListCommand::new(&settings_path, backends, ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("No installations found"));
        assert!(ui.has_hint("roots add"));
    }

    #[test]
    fn lists_installations_with_active_marker() {
        let (temp, settings_path, _) = setup(MemoryStore::new());
        let roots = temp.path().join("roots");
        let jdk17 = make_jdk(&roots, "jdk-17.0.2", "17.0.2");
        make_jdk(&roots, "jdk-11.0.15", "11.0.15");

        let store = MemoryStore::new().with_value(
            Scope::User,
            "JAVA_HOME",
            &jdk17.to_string_lossy(),
        );
        let backends = Backends::new(
            Arc::new(ScriptedRunner::new()),
            Arc::new(store),
            Arc::new(NoopBroadcaster),
        );
        let cmd = ListCommand::new(&settings_path, backends, ListArgs::default());
        let mut ui = MockUI::with_mode(crate::ui::OutputMode::Verbose);

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("17.0.2"));
        assert!(ui.has_message("11.0.15"));
        assert!(ui.has_message("found via user JAVA_HOME"));
        assert_eq!(ui.headers(), &["Installations".to_string()]);
    }

    #[test]
    fn json_output_lists_records() {
        let (temp, settings_path, backends) = setup(MemoryStore::new());
        make_jdk(&temp.path().join("roots"), "jdk-21", "21.0.1");
        let cmd = ListCommand::new(&settings_path, backends, ListArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let output = &ui.messages()[0];
        let value: serde_json::Value = serde_json::from_str(output).unwrap();
        assert_eq!(value["installations"][0]["version"], "21.0.1");
    }
}
