//! External process execution.
//!
//! Every subprocess the core spawns (version probes, registry queries and
//! mutations, executable resolution, the change broadcast) goes through the
//! [`CommandRunner`] capability so it can be replaced with canned outputs in
//! tests.
//!
//! # Example
//!
//! ```
//! use jdkswitch::exec::{CommandOutput, CommandRunner, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new()
//!     .on(&["java", "-version"], CommandOutput::ok("", "openjdk version \"17.0.2\""));
//!
//! let out = runner.run("java", &["-version"]).unwrap();
//! assert!(out.success);
//! assert!(out.combined().contains("17.0.2"));
//! ```

pub mod scripted;

use std::process::{Command, Stdio};

use crate::error::{JdkSwitchError, Result};

pub use scripted::ScriptedRunner;

/// Captured result of running an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandOutput {
    /// Create a success result.
    pub fn ok(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failed(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: false,
        }
    }

    /// Stdout followed by stderr, the way a merged stream would read.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !text.is_empty() && !text.ends_with('\n') && !self.stderr.is_empty() {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

/// Capability to run an external program and capture its output.
///
/// `Err` means the program could not be started at all. A program that ran
/// and exited non-zero is an `Ok` output with `success == false`.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, waiting for it to exit.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs real processes with `std::process::Command`.
///
/// There is no timeout: a child that never exits blocks the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                tracing::debug!("Failed to start {}: {}", program, e);
                JdkSwitchError::CommandFailed {
                    command: command_line(program, args),
                    code: None,
                }
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Render a program and its arguments as a single display line.
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
