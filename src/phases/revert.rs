//! Concurrent revert of exempt files
//!
//! Every exempt file is restored to its content on the mainline tracking
//! branch, undoing whatever the formatter wrote to it. Reverts run on a
//! dedicated rayon pool capped at the configured worker count (and never
//! larger than the number of files). Each path is handed to exactly one
//! worker, and `execute` only returns once the pool has drained every path.
//!
//! Paths in an `ExemptFileSet` are unique, so no two workers ever write the
//! same file. There is no ordering between individual reverts.
//!
//! A failed revert is reported and does not stop the others. In strict mode
//! the first failure stops workers from starting further reverts (those
//! already running finish) and is returned as an error after the join.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;

use crate::branch::{ExemptFileSet, TrackingBranch};
use crate::config::{ErrorPolicy, DEFAULT_WORKERS};
use crate::error::{Error, Result};
use crate::report::{Event, Reporter};
use crate::repository::VersionControl;

/// Tuning for the revert stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertOptions {
    pub workers: usize,
    pub policy: ErrorPolicy,
}

impl Default for RevertOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            policy: ErrorPolicy::default(),
        }
    }
}

/// A file that could not be restored.
#[derive(Debug)]
pub struct RevertFailure {
    pub path: String,
    pub error: Error,
}

/// What the revert stage did.
#[derive(Debug, Default)]
pub struct RevertSummary {
    /// Reverts that were started. Equal to the number of exempt files unless
    /// strict mode stopped the pool early.
    pub attempted: usize,
    pub reverted: usize,
    pub failures: Vec<RevertFailure>,
}

/// Restore every file in `files` to its `mainline` version.
pub fn execute(
    vcs: &dyn VersionControl,
    files: &ExemptFileSet,
    mainline: &TrackingBranch,
    options: RevertOptions,
    reporter: &dyn Reporter,
) -> Result<RevertSummary> {
    if files.is_empty() {
        reporter.report(Event::RevertsFinished {
            reverted: 0,
            failed: 0,
        });
        return Ok(RevertSummary::default());
    }

    let paths = files.to_vec();
    let threads = options.workers.clamp(1, paths.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("revert-worker-{}", i))
        .build()?;

    let attempted = AtomicUsize::new(0);
    let reverted = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let failures: Mutex<Vec<RevertFailure>> = Mutex::new(Vec::new());

    pool.install(|| {
        paths.par_iter().for_each(|path| {
            if stop.load(Ordering::SeqCst) {
                return;
            }
            attempted.fetch_add(1, Ordering::SeqCst);

            match vcs.restore_file(mainline.as_str(), path) {
                Ok(()) => {
                    reverted.fetch_add(1, Ordering::SeqCst);
                    reporter.report(Event::FileReverted { path });
                }
                Err(e) => {
                    let error = Error::Revert {
                        path: path.to_string(),
                        message: e.to_string(),
                    };
                    reporter.report(Event::RevertFailed {
                        path,
                        error: &error,
                    });
                    if options.policy.is_strict() {
                        stop.store(true, Ordering::SeqCst);
                    }
                    let failure = RevertFailure {
                        path: path.to_string(),
                        error,
                    };
                    match failures.lock() {
                        Ok(mut failures) => failures.push(failure),
                        Err(poisoned) => poisoned.into_inner().push(failure),
                    }
                }
            }
        });
    });

    let mut failures = failures.into_inner().map_err(|_| Error::LockPoisoned {
        context: "revert failure list".to_string(),
    })?;
    let reverted = reverted.into_inner();

    reporter.report(Event::RevertsFinished {
        reverted,
        failed: failures.len(),
    });

    if options.policy.is_strict() && !failures.is_empty() {
        return Err(failures.remove(0).error);
    }

    Ok(RevertSummary {
        attempted: attempted.into_inner(),
        reverted,
        failures,
    })
}
