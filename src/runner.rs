//! Shell command execution.
//!
//! Every external call goes through [`CommandRunner`] so the synchronizer
//! never touches `std::process` directly.

use std::process::Command;

use serde::Serialize;
use tracing::debug;

use crate::error::PltError;

/// Captured result of one command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// stdout followed by stderr, lossily decoded.
    pub stdout: String,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a full command line and blocks until it terminates.
pub trait CommandRunner {
    fn run(&self, command_line: &str) -> Result<CommandOutput, PltError>;
}

/// Runs command lines through `sh -c`.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> Result<CommandOutput, PltError> {
        debug!(command = command_line, "spawning shell");
        let output = Command::new("sh").arg("-c").arg(command_line).output()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            stdout: text,
            exit_code: output.status.code(),
        })
    }
}
