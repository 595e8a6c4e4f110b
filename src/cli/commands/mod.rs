//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command reaches the host
//! through [`Backends`], so tests can run them against scripted runners and
//! in-memory stores.

pub mod backends;
pub mod completions;
pub mod current;
pub mod dispatcher;
pub mod list;
pub mod roots;
pub mod use_cmd;
pub mod validate;

pub use backends::{Backends, Discovery};
pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_PRIVILEGE};
pub use use_cmd::select_target;
