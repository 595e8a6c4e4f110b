//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::CONFIG_ENV_VAR;
use crate::environment::Scope;

/// jdkswitch - Find installed JDKs and switch the active one.
#[derive(Debug, Parser)]
#[command(name = "jdkswitch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides the default in the user config dir)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List discovered installations (default if no command specified)
    List(ListArgs),

    /// Show the active installation
    Current(CurrentArgs),

    /// Switch the active installation
    Use(UseArgs),

    /// Manage the directories scanned for installations
    Roots(RootsArgs),

    /// Check whether a directory is an installation
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `current` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CurrentArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `use` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UseArgs {
    /// Installation path or version (exact, then prefix); prompts if omitted
    pub target: Option<String>,

    /// Scope to write, repeatable (defaults to the scopes used last time)
    #[arg(short, long = "scope", value_enum)]
    pub scopes: Vec<Scope>,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `roots` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RootsArgs {
    #[command(subcommand)]
    pub action: RootsAction,
}

/// `roots` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RootsAction {
    /// Show every scanned root
    List,

    /// Register a custom root
    Add {
        /// Directory to scan
        path: PathBuf,
    },

    /// Unregister a custom root
    Remove {
        /// Directory to stop scanning
        path: PathBuf,
    },
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ValidateArgs {
    /// Directory to check
    pub path: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
