//! External command execution.
//!
//! `CommandRunner` is the seam between the pipeline and arbitrary external
//! processes (the formatter). `SystemCommandRunner` spawns the process in a
//! fixed working directory and captures its standard output.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Result of running an external command to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output, one entry per non-blank line.
    pub lines: Vec<String>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external commands on behalf of the pipeline.
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `args` and wait for it to exit.
    ///
    /// A non-zero exit is not an error at this level; only a failure to start
    /// the process is.
    fn execute(&self, command: &str, args: &[String]) -> Result<CommandOutput>;
}

/// `CommandRunner` that spawns real processes.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    working_dir: PathBuf,
}

impl SystemCommandRunner {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn execute(&self, command: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(command)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| Error::CommandSpawn {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            lines: crate::git::output_lines(&output.stdout),
        })
    }
}
