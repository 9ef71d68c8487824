//! Formatter invocation
//!
//! Runs the configured coding-standards command once over the whole working
//! tree. The formatter is opaque: it may rewrite any file in place. Its
//! failure is never fatal. A non-zero exit or a failure to start is reported
//! as a warning and the pipeline still proceeds to the revert stage, because
//! the files it did fix are still worth keeping.

use std::fmt;

use crate::process::CommandRunner;
use crate::report::{Event, Reporter};

/// How the formatter run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterOutcome {
    Succeeded,
    /// Exited non-zero, or was killed by a signal (`exit_code` is `None`).
    Failed { exit_code: Option<i32> },
    /// The process could not be started.
    NotStarted { message: String },
}

impl FormatterOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FormatterOutcome::Succeeded)
    }
}

impl fmt::Display for FormatterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterOutcome::Succeeded => write!(f, "Coding standards fixer finished"),
            FormatterOutcome::Failed {
                exit_code: Some(code),
            } => write!(
                f,
                "Command failed with exit code {}. Your configured CS fixing command is probably not working.",
                code
            ),
            FormatterOutcome::Failed { exit_code: None } => {
                write!(f, "Command was terminated by a signal before finishing")
            }
            FormatterOutcome::NotStarted { message } => write!(
                f,
                "Command could not be started ({}). Check codingstandards.command-to-run.",
                message
            ),
        }
    }
}

/// Run the formatter and wait for it to finish.
pub fn execute(
    runner: &dyn CommandRunner,
    command: &str,
    args: &[String],
    reporter: &dyn Reporter,
) -> FormatterOutcome {
    reporter.report(Event::FormatterStarted { command, args });

    let outcome = match runner.execute(command, args) {
        Ok(output) => {
            for line in &output.lines {
                reporter.report(Event::FormatterOutput { line });
            }
            if output.success() {
                FormatterOutcome::Succeeded
            } else {
                FormatterOutcome::Failed {
                    exit_code: output.exit_code,
                }
            }
        }
        Err(e) => FormatterOutcome::NotStarted {
            message: e.to_string(),
        },
    };

    reporter.report(Event::FormatterFinished { outcome: &outcome });
    outcome
}
