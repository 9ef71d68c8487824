//! # Version Control Abstraction
//!
//! The pipeline never calls `git` directly. It talks to a `VersionControl`
//! implementation, which keeps the branch and revert logic independent of any
//! particular binary being installed and lets tests substitute in-memory
//! doubles.
//!
//! `SystemGit` is the implementation used by the CLI. It delegates to the
//! functions in `crate::git`, running every command from the top level of the
//! working tree. Diff output is root-relative, so restores must resolve paths
//! against the same root.
//!
//! Implementations must be `Send + Sync`: the revert stage calls
//! `restore_file` from many worker threads at once, each for a different path.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Version-control operations consumed by the rollout pipeline.
pub trait VersionControl: Send + Sync {
    /// Fetch the latest refs from `remote`.
    fn fetch(&self, remote: &str) -> Result<()>;

    /// List remote tracking branches as raw, untrimmed listing lines.
    fn list_remote_tracking_branches(&self) -> Result<Vec<String>>;

    /// Paths that differ between `branch` and `base`.
    fn diff_files(&self, branch: &str, base: &str) -> Result<Vec<String>>;

    /// Restore `path` in the working tree to its content on `base`.
    fn restore_file(&self, base: &str, path: &str) -> Result<()>;
}

/// `VersionControl` backed by the system `git` command.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo_dir: PathBuf,
}

impl SystemGit {
    /// Use `repo_dir` as the working tree root without checking it.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Find the working tree containing `dir` and root every command there.
    pub fn discover(dir: &Path) -> Result<Self> {
        Ok(Self::new(crate::git::show_toplevel(dir)?))
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }
}

impl VersionControl for SystemGit {
    fn fetch(&self, remote: &str) -> Result<()> {
        crate::git::fetch(&self.repo_dir, remote)
    }

    fn list_remote_tracking_branches(&self) -> Result<Vec<String>> {
        crate::git::list_remote_branches(&self.repo_dir)
    }

    fn diff_files(&self, branch: &str, base: &str) -> Result<Vec<String>> {
        crate::git::diff_names(&self.repo_dir, branch, base)
    }

    fn restore_file(&self, base: &str, path: &str) -> Result<()> {
        crate::git::restore_file(&self.repo_dir, base, path)
    }
}
