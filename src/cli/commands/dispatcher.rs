//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ListArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::backends::Backends;

/// Exit code when a switch failed for lack of privilege.
pub const EXIT_PRIVILEGE: i32 = 3;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings_path: PathBuf,
    backends: Backends,
}

impl CommandDispatcher {
    /// Create a dispatcher backed by the host's runner and stores.
    pub fn new(settings_path: PathBuf) -> Self {
        Self::with_backends(settings_path, Backends::system())
    }

    /// Create a dispatcher with explicit backends (for testing).
    pub fn with_backends(settings_path: PathBuf, backends: Backends) -> Self {
        Self {
            settings_path,
            backends,
        }
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, lists installations.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = &self.settings_path;
        let backends = self.backends.clone();

        match &cli.command {
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(path, backends, args.clone()).execute(ui)
            }
            Some(Commands::Current(args)) => {
                super::current::CurrentCommand::new(path, backends, args.clone()).execute(ui)
            }
            Some(Commands::Use(args)) => {
                super::use_cmd::UseCommand::new(path, backends, args.clone()).execute(ui)
            }
            Some(Commands::Roots(args)) => {
                super::roots::RootsCommand::new(path, backends, args.clone()).execute(ui)
            }
            Some(Commands::Validate(args)) => {
                super::validate::ValidateCommand::new(backends, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::list::ListCommand::new(path, backends, ListArgs::default()).execute(ui),
        }
    }
}
