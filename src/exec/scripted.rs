//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] with canned responses and
//! records every invocation for later assertion. Nothing is spawned.

use std::sync::Mutex;

use crate::error::{JdkSwitchError, Result};

use super::{command_line, CommandOutput, CommandRunner};

#[derive(Debug, Clone)]
enum Response {
    Output(CommandOutput),
    SpawnFailure,
}

#[derive(Debug, Clone)]
struct Rule {
    needles: Vec<String>,
    response: Response,
}

impl Rule {
    fn matches(&self, line: &str) -> bool {
        self.needles.iter().all(|n| line.contains(n.as_str()))
    }
}

/// Command runner that answers from a script instead of spawning processes.
///
/// Each rule is a list of needles; an invocation matches when its rendered
/// command line contains every needle. Rules are checked in the order they
/// were added and the first match wins. An invocation no rule matches is
/// treated as a spawn failure.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    /// Create a runner with no rules. Every invocation fails to spawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer invocations containing all `needles` with `output`.
    pub fn on(mut self, needles: &[&str], output: CommandOutput) -> Self {
        self.rules.push(Rule {
            needles: needles.iter().map(|s| s.to_string()).collect(),
            response: Response::Output(output),
        });
        self
    }

    /// Make invocations containing all `needles` fail to spawn.
    pub fn fail_spawn(mut self, needles: &[&str]) -> Self {
        self.rules.push(Rule {
            needles: needles.iter().map(|s| s.to_string()).collect(),
            response: Response::SpawnFailure,
        });
        self
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of recorded invocations containing all `needles`.
    pub fn count(&self, needles: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|line| needles.iter().all(|n| line.contains(n)))
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = command_line(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }

        match self.rules.iter().find(|r| r.matches(&line)) {
            Some(Rule {
                response: Response::Output(output),
                ..
            }) => Ok(output.clone()),
            _ => Err(JdkSwitchError::CommandFailed {
                command: line,
                code: None,
            }),
        }
    }
}
