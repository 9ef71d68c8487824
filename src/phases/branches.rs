//! Branch enumeration
//!
//! Turns the raw `git branch -r` listing into the working set of tracking
//! branches whose edits must be protected. A listing line is kept only when,
//! after trimming, it:
//!
//! 1. starts with `<remote>/`,
//! 2. is not the `<remote>/HEAD -> ...` alias line, and
//! 3. is not the mainline tracking branch itself.
//!
//! Output order follows the listing order.

use std::fmt;

use crate::branch::TrackingBranch;
use crate::error::Result;
use crate::report::{Event, Reporter};
use crate::repository::VersionControl;

/// Why a listing line was left out of the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Belongs to another remote (or is not a tracking branch at all).
    OtherRemote,
    /// The symbolic `HEAD ->` alias.
    HeadAlias,
    /// The mainline tracking branch, which is the baseline rather than a
    /// branch with pending work.
    Mainline,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::OtherRemote => "not on the configured remote",
            SkipReason::HeadAlias => "HEAD alias",
            SkipReason::Mainline => "mainline branch",
        };
        f.write_str(text)
    }
}

/// Classify a single listing line.
///
/// Returns the tracking branch when the line is relevant, otherwise the reason
/// it was skipped.
pub fn classify(
    line: &str,
    remote: &str,
    mainline: &TrackingBranch,
) -> std::result::Result<TrackingBranch, SkipReason> {
    let name = line.trim();
    let prefix = format!("{}/", remote);

    if !name.starts_with(&prefix) {
        return Err(SkipReason::OtherRemote);
    }
    if name.starts_with(&format!("{}HEAD ->", prefix)) {
        return Err(SkipReason::HeadAlias);
    }
    if name == mainline.as_str() {
        return Err(SkipReason::Mainline);
    }
    Ok(TrackingBranch::from_qualified(name))
}

/// Filter raw listing lines down to the relevant tracking branches.
pub fn relevant_branches<S: AsRef<str>>(
    lines: &[S],
    remote: &str,
    mainline: &TrackingBranch,
) -> Vec<TrackingBranch> {
    lines
        .iter()
        .filter_map(|line| classify(line.as_ref(), remote, mainline).ok())
        .collect()
}

/// List remote tracking branches and keep the relevant ones.
///
/// A listing failure is returned to the caller: without the branch list
/// nothing can be exempted.
pub fn execute(
    vcs: &dyn VersionControl,
    remote: &str,
    mainline: &TrackingBranch,
    reporter: &dyn Reporter,
) -> Result<Vec<TrackingBranch>> {
    let lines = vcs.list_remote_tracking_branches()?;

    let mut branches = Vec::new();
    for line in &lines {
        match classify(line, remote, mainline) {
            Ok(branch) => branches.push(branch),
            Err(reason) => reporter.report(Event::BranchSkipped {
                line: line.trim(),
                reason,
            }),
        }
    }

    reporter.report(Event::BranchesEnumerated {
        remote,
        branches: &branches,
    });
    Ok(branches)
}
