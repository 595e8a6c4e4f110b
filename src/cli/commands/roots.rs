//! Roots command implementation.
//!
//! The `jdkswitch roots` command shows and edits the directories scans walk.
//! Custom roots are kept in the settings file; default roots can't be
//! removed, only switched off with `scan_default_roots: false`.

use std::path::{Path, PathBuf};

use crate::cli::args::{RootsAction, RootsArgs};
use crate::config::Settings;
use crate::error::Result;
use crate::paths;
use crate::scan::{PathCatalog, Scanner};
use crate::ui::{SwitchTheme, Table, UserInterface};

use super::backends::Backends;
use super::dispatcher::{Command, CommandResult};

/// The roots command implementation.
pub struct RootsCommand {
    settings_path: PathBuf,
    backends: Backends,
    args: RootsArgs,
}

impl RootsCommand {
    /// Create a new roots command.
    pub fn new(settings_path: &Path, backends: Backends, args: RootsArgs) -> Self {
        Self {
            settings_path: settings_path.to_path_buf(),
            backends,
            args,
        }
    }

    fn list(&self, settings: &Settings, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let scanner = self.backends.scanner(settings, ui);
        let custom: Vec<String> = scanner
            .custom_roots()
            .iter()
            .map(|p| paths::identity_key(p))
            .collect();
        let theme = SwitchTheme::for_terminal();

        let mut table = Table::new(&["Root", "Kind", "Exists"]);
        for root in scanner.list_roots() {
            let kind = if custom.contains(&paths::identity_key(&root)) {
                "custom"
            } else {
                "default"
            };
            let exists = if root.is_dir() {
                "yes".to_string()
            } else {
                theme.dim.apply_to("no").to_string()
            };
            table.add_row(vec![root.display().to_string(), kind.to_string(), exists]);
        }

        if table.is_empty() {
            ui.message("No roots configured.");
            ui.show_hint("Register a directory with `jdkswitch roots add <path>`");
        } else {
            ui.message(&table.render());
        }
        Ok(CommandResult::success())
    }

    fn add(
        &self,
        mut settings: Settings,
        path: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let path = paths::normalize(path);
        if !path.is_dir() {
            ui.error(&format!("{} is not a directory", path.display()));
            return Ok(CommandResult::failure(1));
        }

        let scanner = self.backends.scanner(&settings, ui);
        if !scanner.register_root(&path) {
            ui.warning(&format!("{} is already scanned", path.display()));
            return Ok(CommandResult::success());
        }

        settings.custom_roots.push(path.clone());
        settings.save(&self.settings_path)?;
        ui.success(&format!("Added root {}", path.display()));
        Ok(CommandResult::success())
    }

    fn remove(
        &self,
        mut settings: Settings,
        path: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        // Saved roots may be offline, so they skip the directory check.
        let scanner = Scanner::with_catalog(
            PathCatalog::with_saved_roots(settings.custom_roots.clone()),
            self.backends.probe(),
        );
        let path = paths::normalize(path);

        if !scanner.unregister_root(&path) {
            ui.error(&format!("{} is not a custom root", path.display()));
            return Ok(CommandResult::failure(1));
        }

        settings.custom_roots = scanner.custom_roots();
        settings.save(&self.settings_path)?;
        ui.success(&format!("Removed root {}", path.display()));
        Ok(CommandResult::success())
    }
}

impl Command for RootsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = Settings::load(&self.settings_path)?;
        match &self.args.action {
            RootsAction::List => self.list(&settings, ui),
            RootsAction::Add { path } => self.add(settings, path, ui),
            RootsAction::Remove { path } => self.remove(settings, path, ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{MemoryStore, NoopBroadcaster};
    use crate::exec::ScriptedRunner;
    use crate::ui::MockUI;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn backends() -> Backends {
        Backends::new(
            Arc::new(ScriptedRunner::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(NoopBroadcaster),
        )
    }

    fn run(settings_path: &Path, action: RootsAction, ui: &mut MockUI) -> CommandResult {
        RootsCommand::new(settings_path, backends(), RootsArgs { action })
            .execute(ui)
            .unwrap()
    }

    fn isolated_settings(temp: &TempDir) -> PathBuf {
        let path = temp.path().join("config.yml");
        Settings {
            scan_default_roots: false,
            ..Default::default()
        }
        .save(&path)
        .unwrap();
        path
    }

    #[test]
    fn add_persists_root() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let root = temp.path().join("jdks");
        std::fs::create_dir(&root).unwrap();
        let mut ui = MockUI::new();

        let result = run(&settings_path, RootsAction::Add { path: root.clone() }, &mut ui);

        assert!(result.success);
        let settings = Settings::load(&settings_path).unwrap();
        assert_eq!(settings.custom_roots, vec![paths::normalize(&root)]);
    }

    #[test]
    fn add_twice_warns_and_keeps_one() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let root = temp.path().join("jdks");
        std::fs::create_dir(&root).unwrap();
        let mut ui = MockUI::new();

        run(&settings_path, RootsAction::Add { path: root.clone() }, &mut ui);
        run(&settings_path, RootsAction::Add { path: root }, &mut ui);

        assert!(ui.has_warning("already scanned"));
        assert_eq!(Settings::load(&settings_path).unwrap().custom_roots.len(), 1);
    }

    #[test]
    fn add_rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let mut ui = MockUI::new();

        let result = run(
            &settings_path,
            RootsAction::Add {
                path: temp.path().join("missing"),
            },
            &mut ui,
        );

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("not a directory"));
    }

    #[test]
    fn remove_drops_root_even_if_gone() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let root = temp.path().join("jdks");
        std::fs::create_dir(&root).unwrap();
        let mut ui = MockUI::new();
        run(&settings_path, RootsAction::Add { path: root.clone() }, &mut ui);
        std::fs::remove_dir(&root).unwrap();

        let result = run(&settings_path, RootsAction::Remove { path: root }, &mut ui);

        assert!(result.success);
        assert!(Settings::load(&settings_path).unwrap().custom_roots.is_empty());
    }

    #[test]
    fn remove_accepts_unnormalized_spelling() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let root = temp.path().join("jdks");
        std::fs::create_dir(&root).unwrap();
        let mut ui = MockUI::new();
        run(&settings_path, RootsAction::Add { path: root.clone() }, &mut ui);

        let result = run(
            &settings_path,
            RootsAction::Remove {
                path: root.join(".").join("..").join("jdks"),
            },
            &mut ui,
        );

        assert!(result.success);
        assert!(ui.has_success("Removed root"));
        assert!(Settings::load(&settings_path).unwrap().custom_roots.is_empty());
    }

    #[test]
    fn remove_keeps_other_roots() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        std::fs::create_dir(&first).unwrap();
        std::fs::create_dir(&second).unwrap();
        let mut ui = MockUI::new();
        run(&settings_path, RootsAction::Add { path: first.clone() }, &mut ui);
        run(&settings_path, RootsAction::Add { path: second.clone() }, &mut ui);

        run(&settings_path, RootsAction::Remove { path: first }, &mut ui);

        assert_eq!(
            Settings::load(&settings_path).unwrap().custom_roots,
            vec![paths::normalize(&second)]
        );
    }

    #[test]
    fn remove_unknown_root_fails() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let mut ui = MockUI::new();

        let result = run(
            &settings_path,
            RootsAction::Remove {
                path: temp.path().join("never-added"),
            },
            &mut ui,
        );

        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn list_marks_custom_roots() {
        let temp = TempDir::new().unwrap();
        let settings_path = isolated_settings(&temp);
        let root = temp.path().join("jdks");
        std::fs::create_dir(&root).unwrap();
        let mut ui = MockUI::new();
        run(&settings_path, RootsAction::Add { path: root }, &mut ui);

        run(&settings_path, RootsAction::List, &mut ui);

        assert!(ui.has_message("custom"));
        assert!(ui.has_message("jdks"));
    }
}
