//! Exempt file collection
//!
//! Every file that any live branch has edited relative to mainline is exempt
//! from the formatter's changes. The exempt set is the plain union of the
//! per-branch diffs: one branch touching a file is enough.
//!
//! Branches are diffed one after another. A failed diff is reported and the
//! branch is dropped from the union, unless the run is strict, in which case
//! the first failure aborts collection.

use crate::branch::{ExemptFileSet, TrackingBranch};
use crate::config::ErrorPolicy;
use crate::error::{Error, Result};
use crate::report::{Event, Reporter};
use crate::repository::VersionControl;

/// A branch whose diff could not be computed.
#[derive(Debug)]
pub struct BranchFailure {
    pub branch: TrackingBranch,
    pub error: Error,
}

/// Output of the collection stage.
#[derive(Debug, Default)]
pub struct ExemptCollection {
    pub files: ExemptFileSet,
    pub failures: Vec<BranchFailure>,
}

/// Union the files edited on `branches` relative to `mainline`.
pub fn execute(
    vcs: &dyn VersionControl,
    branches: &[TrackingBranch],
    mainline: &TrackingBranch,
    policy: ErrorPolicy,
    reporter: &dyn Reporter,
) -> Result<ExemptCollection> {
    let mut collection = ExemptCollection::default();

    for branch in branches {
        match vcs.diff_files(branch.as_str(), mainline.as_str()) {
            Ok(files) => {
                reporter.report(Event::BranchDiffed {
                    branch,
                    files: files.len(),
                });
                for path in files {
                    if !collection.files.contains(&path) {
                        reporter.report(Event::FileExempted {
                            path: &path,
                            branch,
                        });
                        collection.files.insert(path);
                    }
                }
            }
            Err(e) => {
                let error = Error::BranchDiff {
                    branch: branch.to_string(),
                    message: e.to_string(),
                };
                reporter.report(Event::BranchDiffFailed {
                    branch,
                    error: &error,
                });
                if policy.is_strict() {
                    return Err(error);
                }
                collection.failures.push(BranchFailure {
                    branch: branch.clone(),
                    error,
                });
            }
        }
    }

    reporter.report(Event::ExemptFilesCollected {
        files: &collection.files,
    });
    Ok(collection)
}
