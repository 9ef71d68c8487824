//! Shared test utilities for the CLI end-to-end tests.
//!
//! `GitFixture` builds a throwaway setup with a bare "remote" repository and a
//! working clone whose `origin` points at it, so that `fix` can fetch, diff
//! and check out exactly as it would against a real remote.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = GitFixture::new()
//!     .with_mainline_files(&[("a.txt", "a\n")])
//!     .with_feature_branch("feature/x", &[("a.txt", "changed\n")]);
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::GitFixture;
}

/// Configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Complete configuration whose formatter is `true` (does nothing).
    pub const NOOP_FORMATTER: &str = r#"
[git]
remote-name = "origin"
mainline-branch-name = "main"

[codingstandards]
command-to-run = "true"
command-arguments = []
"#;

    /// Configuration missing the remote name.
    pub const MISSING_REMOTE: &str = r#"
[git]
mainline-branch-name = "main"

[codingstandards]
command-to-run = "true"
command-arguments = []
"#;

    /// Invalid TOML for error testing.
    pub const INVALID_TOML: &str = "[git\nremote-name = ";

    /// Configuration whose formatter overwrites every listed file with
    /// `formatted`.
    pub fn rewriting_formatter(files: &[&str]) -> String {
        format!(
            r#"
[git]
remote-name = "origin"
mainline-branch-name = "main"

[codingstandards]
command-to-run = "sh"
command-arguments = ["-c", "for f in {}; do echo formatted > \"$f\"; done"]
"#,
            files.join(" ")
        )
    }
}

/// A bare remote plus a working clone, inside one temporary directory.
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitFixture {
    /// Create the remote and the working repository with `main` checked out
    /// and no commits yet.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        let root = fixture.temp_dir.path();

        run_git(root, &["init", "--bare", "remote.git"]);
        std::fs::create_dir(root.join("work")).expect("Failed to create work dir");
        let work = fixture.work_dir();
        run_git(&work, &["init"]);
        run_git(&work, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        run_git(&work, &["config", "user.email", "rollout@example.com"]);
        run_git(&work, &["config", "user.name", "Rollout Test"]);
        run_git(&work, &["config", "commit.gpgsign", "false"]);
        run_git(&work, &["remote", "add", "origin", "../remote.git"]);
        fixture
    }

    /// Commit `files` on `main` and push it.
    pub fn with_mainline_files(self, files: &[(&str, &str)]) -> Self {
        self.commit_files(files, "mainline");
        run_git(&self.work_dir(), &["push", "origin", "main"]);
        self
    }

    /// Create `branch` from `main`, commit `files` on it, push it, and go back
    /// to `main`.
    pub fn with_feature_branch(self, branch: &str, files: &[(&str, &str)]) -> Self {
        let work = self.work_dir();
        run_git(&work, &["checkout", "-b", branch, "main"]);
        self.commit_files(files, branch);
        run_git(&work, &["push", "origin", branch]);
        run_git(&work, &["checkout", "main"]);
        self
    }

    /// Write the configuration file next to (not inside) the work tree.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("rollout.toml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("rollout.toml")
    }

    /// Overwrite `files` in the work tree without committing.
    pub fn write_files(&self, files: &[(&str, &str)]) {
        let work = self.work_dir();
        for (path, content) in files {
            std::fs::write(work.join(path), content).expect("Failed to write file");
        }
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.work_dir().join(path)).expect("Failed to read file")
    }

    /// `fix` command pointed at this fixture's config and work tree.
    pub fn fix_command(&self) -> assert_cmd::Command {
        let mut cmd = self.fix_command_in(&self.work_dir());
        cmd.arg("-C").arg(self.work_dir());
        cmd
    }

    /// `fix` command run from `dir` with no `-C`, so the repository is found
    /// from the current directory.
    pub fn fix_command_in(&self, dir: &Path) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("coding-standards-rollout");
        cmd.env_remove("CS_ROLLOUT_CONFIG")
            .current_dir(dir)
            .arg("--color")
            .arg("never")
            .arg("fix")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    fn commit_files(&self, files: &[(&str, &str)], message: &str) {
        let work = self.work_dir();
        for (path, content) in files {
            let full = work.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            std::fs::write(&full, content).expect("Failed to write file");
        }
        run_git(&work, &["add", "--all"]);
        run_git(&work, &["commit", "-m", message]);
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
}
