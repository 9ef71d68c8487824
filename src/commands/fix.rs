//! Fix command implementation
//!
//! The fix command runs the full rollout pipeline against a repository:
//! 1. Fetch from the configured remote
//! 2. Enumerate tracking branches with pending work
//! 3. Collect the files those branches edit
//! 4. Run the coding standards fixer over the whole tree
//! 5. Revert the fixer's changes to the collected files
//!
//! Degraded failures (a branch that cannot be diffed, a fixer that exits
//! non-zero, a file that cannot be reverted) are listed in the summary but do
//! not change the exit code unless `--strict` is given.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use coding_standards_rollout::config::{self, ErrorPolicy};
use coding_standards_rollout::output::{emoji, render_summary, OutputConfig, ProgressReporter};
use coding_standards_rollout::phases::orchestrator;
use coding_standards_rollout::process::SystemCommandRunner;
use coding_standards_rollout::report::LogReporter;
use coding_standards_rollout::repository::SystemGit;

/// Arguments for the fix command
#[derive(Args, Debug)]
pub struct FixArgs {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "CS_ROLLOUT_CONFIG")]
    pub config: PathBuf,

    /// Any directory inside the repository (defaults to current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Number of concurrent revert workers (overrides rollout.workers)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Abort on the first branch diff or revert failure
    #[arg(long)]
    pub strict: bool,

    /// Suppress the summary and progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the fix command
pub fn execute(args: FixArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let mut run_config = config::from_file(&args.config)?;
    if let Some(workers) = args.workers {
        run_config.workers = workers;
    }
    if args.strict {
        run_config.error_policy = ErrorPolicy::AbortOnFirstError;
    }
    run_config.validate()?;

    let start_dir = match args.repo {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let vcs = SystemGit::discover(&start_dir)?;
    let repo_dir = vcs.repo_dir().to_path_buf();

    if !args.quiet {
        println!(
            "{} Rolling out coding standards in {}",
            emoji(&out, "🔧", "[FIX]"),
            repo_dir.display()
        );
    }

    let runner = SystemCommandRunner::new(&repo_dir);
    let log_reporter = LogReporter;
    let reporter = ProgressReporter::new(&log_reporter, out.use_color && !args.quiet);

    let report = orchestrator::execute_fix(&run_config, &vcs, &runner, &reporter)?;

    if !args.quiet {
        print!("{}", render_summary(&report, &out));
    }

    Ok(())
}
