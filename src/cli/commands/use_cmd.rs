//! Use command implementation.
//!
//! The `jdkswitch use` command makes an installation the active one in the
//! requested scopes. A privilege failure offers to retry with the user scope
//! alone.

use std::path::{Path, PathBuf};

use crate::cli::args::UseArgs;
use crate::config::Settings;
use crate::environment::{Scope, SwitchOutcome};
use crate::error::{JdkSwitchError, Result};
use crate::install::{InstallationProbe, InstallationRecord};
use crate::paths;
use crate::platform::is_elevated;
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::backends::Backends;
use super::dispatcher::{Command, CommandResult, EXIT_PRIVILEGE};

/// The use command implementation.
pub struct UseCommand {
    settings_path: PathBuf,
    backends: Backends,
    args: UseArgs,
}

impl UseCommand {
    /// Create a new use command.
    pub fn new(settings_path: &Path, backends: Backends, args: UseArgs) -> Self {
        Self {
            settings_path: settings_path.to_path_buf(),
            backends,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &UseArgs {
        &self.args
    }

    fn requested_scopes(&self, settings: &Settings) -> Vec<Scope> {
        let source = if self.args.scopes.is_empty() {
            &settings.last_scopes
        } else {
            &self.args.scopes
        };

        let mut scopes = Vec::new();
        for &scope in source {
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
        scopes
    }

    fn pick_interactively(
        &self,
        records: &[InstallationRecord],
        ui: &mut dyn UserInterface,
    ) -> Result<Option<InstallationRecord>> {
        if !ui.is_interactive() {
            ui.error("No installation given; pass a path or version");
            return Ok(None);
        }

        let prompt = Prompt {
            key: "installation".to_string(),
            question: "Which installation should be active?".to_string(),
            prompt_type: PromptType::Select {
                options: records
                    .iter()
                    .map(|r| PromptOption {
                        label: r.to_string(),
                        value: r.install_path().to_string_lossy().to_string(),
                    })
                    .collect(),
            },
            default: records
                .iter()
                .find(|r| r.is_active())
                .map(|r| r.install_path().to_string_lossy().to_string()),
        };

        let chosen = ui.prompt(&prompt)?.as_string();
        Ok(records
            .iter()
            .find(|r| r.install_path().to_string_lossy() == chosen)
            .cloned())
    }

    fn switch(
        &self,
        record: &InstallationRecord,
        scopes: &[Scope],
        ui: &mut dyn UserInterface,
    ) -> Result<SwitchOutcome> {
        let coordinator = self.backends.coordinator();
        let task = coordinator.switch_to_async(record.clone(), scopes.to_vec())?;

        let mut spinner = ui.start_spinner(&format!("Switching to {}...", record.version()));
        let result = task.wait().and_then(|outcome| outcome);
        match &result {
            Ok(_) => spinner.finish_clear(),
            Err(_) => spinner.finish_error("Switch failed"),
        }
        result
    }

    fn report(
        &self,
        record: &InstallationRecord,
        outcome: &SwitchOutcome,
        ui: &mut dyn UserInterface,
    ) {
        ui.success(&format!(
            "{} is now active ({} scope)",
            record,
            scope_list(&outcome.scopes)
        ));

        for scope in &outcome.readback_mismatches {
            ui.warning(&format!(
                "Reading back the {} scope did not show the new values",
                scope
            ));
        }

        if outcome.broadcast_delivered {
            ui.show_hint("New shells pick up the change; running ones keep their old environment");
        } else {
            ui.show_hint("The change could not be announced; restart programs to pick it up");
        }
    }

    fn remember(&self, settings: &mut Settings, scopes: &[Scope], ui: &mut dyn UserInterface) {
        if settings.last_scopes == scopes {
            return;
        }
        settings.last_scopes = scopes.to_vec();
        if let Err(e) = settings.save(&self.settings_path) {
            ui.warning(&format!("Could not save settings: {}", e));
        }
    }
}

impl Command for UseCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut settings = Settings::load(&self.settings_path)?;
        let scopes = self.requested_scopes(&settings);
        let discovery = self.backends.discover(&settings, ui)?;

        let record = match &self.args.target {
            Some(target) => match select_target(&discovery.records, target, &self.backends.probe())
            {
                Ok(record) => record,
                Err(e @ JdkSwitchError::InstallationNotFound { .. })
                | Err(e @ JdkSwitchError::AmbiguousInstallation { .. }) => {
                    ui.error(&e.to_string());
                    ui.show_hint("Run `jdkswitch list` to see what was found");
                    return Ok(CommandResult::failure(1));
                }
                Err(e) => return Err(e),
            },
            None => {
                if discovery.records.is_empty() {
                    ui.error("No installations found");
                    ui.show_hint("Register a directory with `jdkswitch roots add <path>`");
                    return Ok(CommandResult::failure(1));
                }
                match self.pick_interactively(&discovery.records, ui)? {
                    Some(record) => record,
                    None => return Ok(CommandResult::failure(1)),
                }
            }
        };

        if scopes.contains(&Scope::System) && !is_elevated(self.backends.runner.as_ref()) {
            ui.warning("Not running elevated; writing the system scope will likely be refused");
        }

        if !self.args.yes {
            let confirm = Prompt {
                key: "confirm_switch".to_string(),
                question: format!(
                    "Make {} active in the {} scope?",
                    record,
                    scope_list(&scopes)
                ),
                prompt_type: PromptType::Confirm,
                default: Some("true".to_string()),
            };
            if ui.prompt(&confirm)?.as_bool() != Some(true) {
                ui.message("Cancelled.");
                return Ok(CommandResult::success());
            }
        }

        match self.switch(&record, &scopes, ui) {
            Ok(outcome) => {
                self.report(&record, &outcome, ui);
                self.remember(&mut settings, &scopes, ui);
                Ok(CommandResult::success())
            }
            Err(e) if e.is_privilege() => {
                ui.error(&e.to_string());
                ui.show_hint("Run from an elevated shell to change the system scope");

                let user_only = [Scope::User];
                if scopes.as_slice() == user_only {
                    return Ok(CommandResult::failure(EXIT_PRIVILEGE));
                }

                let retry = Prompt {
                    key: "retry_user".to_string(),
                    question: "Apply to the user scope only instead?".to_string(),
                    prompt_type: PromptType::Confirm,
                    default: Some("false".to_string()),
                };
                if ui.prompt(&retry)?.as_bool() != Some(true) {
                    return Ok(CommandResult::failure(EXIT_PRIVILEGE));
                }

                match self.switch(&record, &user_only, ui) {
                    Ok(outcome) => {
                        self.report(&record, &outcome, ui);
                        self.remember(&mut settings, &user_only, ui);
                        Ok(CommandResult::success())
                    }
                    Err(e) if e.is_privilege() => {
                        ui.error(&e.to_string());
                        Ok(CommandResult::failure(EXIT_PRIVILEGE))
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }
}

/// Find the installation `target` names among `records`.
///
/// A target that exists on disk is a path: it matches the record at that
/// path, or is probed directly when the scan didn't cover it. Otherwise it is
/// a version, matched exactly first and then as a prefix ending on a
/// component boundary (`17` matches `17.0.2` but not `170`).
pub fn select_target(
    records: &[InstallationRecord],
    target: &str,
    probe: &InstallationProbe,
) -> Result<InstallationRecord> {
    let not_found = || JdkSwitchError::InstallationNotFound {
        query: target.to_string(),
    };

    let as_path = Path::new(target);
    if as_path.is_dir() {
        let key = paths::identity_key(as_path);
        if let Some(record) = records
            .iter()
            .find(|r| paths::identity_key(r.install_path()) == key)
        {
            return Ok(record.clone());
        }
        return probe.probe(as_path).ok_or_else(not_found);
    }

    let exact: Vec<&InstallationRecord> = records.iter().filter(|r| r.version() == target).collect();
    let candidates = if exact.is_empty() {
        records
            .iter()
            .filter(|r| is_version_prefix(target, r.version()))
            .collect()
    } else {
        exact
    };

    match candidates.as_slice() {
        [] => Err(not_found()),
        [only] => Ok((*only).clone()),
        many => Err(JdkSwitchError::AmbiguousInstallation {
            query: target.to_string(),
            matches: many
                .iter()
                .map(|r| r.install_path().display().to_string())
                .collect(),
        }),
    }
}

fn is_version_prefix(prefix: &str, version: &str) -> bool {
    if prefix.is_empty() || !version.starts_with(prefix) {
        return false;
    }
    version[prefix.len()..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_ascii_digit())
}

fn scope_list(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(Scope::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}
