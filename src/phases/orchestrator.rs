//! Orchestrator for a complete rollout run
//!
//! Sequences the phases in their fixed order and collects what each one
//! produced into a `RunReport`. The stages run strictly one after another on
//! the calling thread; only the revert stage fans out.

use super::exempt::BranchFailure;
use super::formatter::FormatterOutcome;
use super::revert::{RevertOptions, RevertSummary};
use super::{branches, exempt, formatter, revert};
use crate::branch::{ExemptFileSet, TrackingBranch};
use crate::config::RunConfig;
use crate::error::Result;
use crate::process::CommandRunner;
use crate::report::{Event, Reporter, Stage};
use crate::repository::VersionControl;

/// Everything a finished run found and did.
#[derive(Debug)]
pub struct RunReport {
    pub mainline: TrackingBranch,
    pub branches: Vec<TrackingBranch>,
    pub exempt_files: ExemptFileSet,
    pub branch_failures: Vec<BranchFailure>,
    pub formatter: FormatterOutcome,
    pub revert: RevertSummary,
}

impl RunReport {
    /// True when no degraded failure happened anywhere in the run.
    pub fn is_clean(&self) -> bool {
        self.branch_failures.is_empty()
            && self.formatter.is_success()
            && self.revert.failures.is_empty()
    }
}

/// Execute the complete fix pipeline
///
/// 1. Fetch from the configured remote
/// 2. Enumerate the relevant tracking branches
/// 3. Collect the exempt file set
/// 4. Run the formatter over the working tree
/// 5. Revert exempt files to the mainline tracking branch
///
/// Returns an error only for fatal failures (fetch, branch listing) or when
/// strict mode escalates a branch diff or revert failure.
pub fn execute_fix(
    config: &RunConfig,
    vcs: &dyn VersionControl,
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
) -> Result<RunReport> {
    let remote = config.remote_name.as_str();
    let mainline = config.mainline_tracking_branch();

    reporter.report(Event::StageStarted(Stage::Fetch));
    vcs.fetch(remote)?;
    reporter.report(Event::Fetched { remote });

    reporter.report(Event::StageStarted(Stage::EnumerateBranches));
    let tracking_branches = branches::execute(vcs, remote, &mainline, reporter)?;

    reporter.report(Event::StageStarted(Stage::CollectExemptFiles));
    let collection = exempt::execute(
        vcs,
        &tracking_branches,
        &mainline,
        config.error_policy,
        reporter,
    )?;

    reporter.report(Event::StageStarted(Stage::RunFormatter));
    let formatter_outcome =
        formatter::execute(runner, &config.command, &config.arguments, reporter);

    reporter.report(Event::StageStarted(Stage::RevertFiles));
    let revert_summary = revert::execute(
        vcs,
        &collection.files,
        &mainline,
        RevertOptions {
            workers: config.workers,
            policy: config.error_policy,
        },
        reporter,
    )?;

    reporter.report(Event::StageStarted(Stage::Done));

    Ok(RunReport {
        mainline,
        branches: tracking_branches,
        exempt_files: collection.files,
        branch_failures: collection.failures,
        formatter: formatter_outcome,
        revert: revert_summary,
    })
}
