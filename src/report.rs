//! # Run Reporting
//!
//! Pipeline phases describe what they are doing by sending `Event`s to a
//! `Reporter`. There is no process-wide logger inside the library: the caller
//! picks a reporter per run and passes it down to every phase.
//!
//! - **`LogReporter`** forwards events to the `log` facade. Stage transitions
//!   and totals go out at `info`, per-branch and per-file detail at `debug`,
//!   and degraded failures at `warn`.
//! - **`RecordingReporter`** keeps every event in memory. It is used by the
//!   tests and by embedders that want to inspect a run afterwards.
//!
//! Reporters are shared with the revert workers, so they must be
//! `Send + Sync`.

use std::fmt;
use std::sync::Mutex;

use log::Level;

use crate::branch::{ExemptFileSet, TrackingBranch};
use crate::error::Error;
use crate::phases::branches::SkipReason;
use crate::phases::formatter::FormatterOutcome;

/// Number of example entries logged after a count.
const EXAMPLE_LIMIT: usize = 5;

/// Pipeline stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    EnumerateBranches,
    CollectExemptFiles,
    RunFormatter,
    RevertFiles,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::EnumerateBranches => "enumerate branches",
            Stage::CollectExemptFiles => "collect exempt files",
            Stage::RunFormatter => "run formatter",
            Stage::RevertFiles => "revert exempt files",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Something worth telling the operator about.
#[derive(Debug)]
pub enum Event<'a> {
    StageStarted(Stage),
    Fetched {
        remote: &'a str,
    },
    BranchSkipped {
        line: &'a str,
        reason: SkipReason,
    },
    BranchesEnumerated {
        remote: &'a str,
        branches: &'a [TrackingBranch],
    },
    BranchDiffed {
        branch: &'a TrackingBranch,
        files: usize,
    },
    BranchDiffFailed {
        branch: &'a TrackingBranch,
        error: &'a Error,
    },
    FileExempted {
        path: &'a str,
        branch: &'a TrackingBranch,
    },
    ExemptFilesCollected {
        files: &'a ExemptFileSet,
    },
    FormatterStarted {
        command: &'a str,
        args: &'a [String],
    },
    FormatterOutput {
        line: &'a str,
    },
    FormatterFinished {
        outcome: &'a FormatterOutcome,
    },
    FileReverted {
        path: &'a str,
    },
    RevertFailed {
        path: &'a str,
        error: &'a Error,
    },
    RevertsFinished {
        reverted: usize,
        failed: usize,
    },
}

/// Field-less discriminant of `Event`, handy for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StageStarted,
    Fetched,
    BranchSkipped,
    BranchesEnumerated,
    BranchDiffed,
    BranchDiffFailed,
    FileExempted,
    ExemptFilesCollected,
    FormatterStarted,
    FormatterOutput,
    FormatterFinished,
    FileReverted,
    RevertFailed,
    RevertsFinished,
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StageStarted(_) => EventKind::StageStarted,
            Event::Fetched { .. } => EventKind::Fetched,
            Event::BranchSkipped { .. } => EventKind::BranchSkipped,
            Event::BranchesEnumerated { .. } => EventKind::BranchesEnumerated,
            Event::BranchDiffed { .. } => EventKind::BranchDiffed,
            Event::BranchDiffFailed { .. } => EventKind::BranchDiffFailed,
            Event::FileExempted { .. } => EventKind::FileExempted,
            Event::ExemptFilesCollected { .. } => EventKind::ExemptFilesCollected,
            Event::FormatterStarted { .. } => EventKind::FormatterStarted,
            Event::FormatterOutput { .. } => EventKind::FormatterOutput,
            Event::FormatterFinished { .. } => EventKind::FormatterFinished,
            Event::FileReverted { .. } => EventKind::FileReverted,
            Event::RevertFailed { .. } => EventKind::RevertFailed,
            Event::RevertsFinished { .. } => EventKind::RevertsFinished,
        }
    }

    /// Log level the event deserves.
    pub fn level(&self) -> Level {
        match self {
            Event::BranchDiffFailed { .. } | Event::RevertFailed { .. } => Level::Warn,
            Event::FormatterFinished { outcome } if !outcome.is_success() => Level::Warn,
            Event::BranchSkipped { .. }
            | Event::BranchDiffed { .. }
            | Event::FileExempted { .. }
            | Event::FormatterOutput { .. }
            | Event::FileReverted { .. } => Level::Debug,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::StageStarted(stage) => write!(f, "Stage: {}", stage),
            Event::Fetched { remote } => write!(f, "Fetched from remote {}", remote),
            Event::BranchSkipped { line, reason } => {
                write!(f, "Skipping branch listing '{}': {}", line, reason)
            }
            Event::BranchesEnumerated { remote, branches } => write!(
                f,
                "There are {} tracking branches starting with '{}/' from the remote",
                branches.len(),
                remote
            ),
            Event::BranchDiffed { branch, files } => {
                write!(f, "Branch {} edits {} file(s)", branch, files)
            }
            Event::BranchDiffFailed { branch, error } => {
                write!(f, "Skipping branch {}: {}", branch, error)
            }
            Event::FileExempted { path, branch } => {
                write!(f, "Exempting {} (edited on {})", path, branch)
            }
            Event::ExemptFilesCollected { files } => write!(
                f,
                "There are {} exempt files which should be reverted after coding standards fixes",
                files.len()
            ),
            Event::FormatterStarted { command, args } => write!(
                f,
                "Running coding standards fixer command: {} {}",
                command,
                args.join(" ")
            ),
            Event::FormatterOutput { line } => write!(f, "[formatter] {}", line),
            Event::FormatterFinished { outcome } => write!(f, "{}", outcome),
            Event::FileReverted { path } => write!(f, "Reverted {}", path),
            Event::RevertFailed { path, error } => {
                write!(f, "Failed to revert {}: {}", path, error)
            }
            Event::RevertsFinished { reverted, failed } => write!(
                f,
                "Reverted {} file(s), {} failure(s)",
                reverted, failed
            ),
        }
    }
}

/// Receives events from the pipeline.
pub trait Reporter: Send + Sync {
    fn report(&self, event: Event<'_>);
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: Event<'_>) {}
}

/// Reporter that writes through the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: Event<'_>) {
        let level = event.level();
        log::log!(level, "{}", event);

        match event {
            Event::BranchesEnumerated { branches, .. } => {
                for (i, branch) in branches.iter().take(EXAMPLE_LIMIT).enumerate() {
                    log::log!(level, "  (example tracking branch {}: {})", i, branch);
                }
            }
            Event::ExemptFilesCollected { files } => {
                for (i, path) in files.iter().take(EXAMPLE_LIMIT).enumerate() {
                    log::log!(level, "  (example exempt file {}: {})", i, path);
                }
            }
            _ => {}
        }
    }
}

/// An event captured by `RecordingReporter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub kind: EventKind,
    pub level: Level,
    pub message: String,
}

/// Reporter that stores every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn events(&self) -> Vec<RecordedEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events().iter().filter(|e| e.kind == kind).count()
    }

    pub fn messages(&self, kind: EventKind) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.message)
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event<'_>) {
        let recorded = RecordedEvent {
            kind: event.kind(),
            level: event.level(),
            message: event.to_string(),
        };
        match self.events.lock() {
            Ok(mut events) => events.push(recorded),
            Err(poisoned) => poisoned.into_inner().push(recorded),
        }
    }
}
