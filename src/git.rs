//! Thin wrappers around the system `git` binary.
//!
//! Each function runs one `git` command inside `repo_dir` and turns a
//! non-zero exit into `Error::GitCommand` carrying git's stderr. Using the
//! system binary means credentials, SSH keys and `~/.gitconfig` behave exactly
//! as they do for the operator's own shell.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Error, Result};

fn run_git(repo_dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: args.join(" "),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(output)
}

/// Split command output into lines, dropping blank ones.
pub fn output_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Split `-z` output on NUL. Paths come back verbatim, without C-quoting.
pub fn nul_separated(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|b| *b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| String::from_utf8_lossy(entry).into_owned())
        .collect()
}

/// Runs `git rev-parse --show-toplevel` from `dir`.
pub fn show_toplevel(dir: &Path) -> Result<PathBuf> {
    let output = run_git(dir, &["rev-parse", "--show-toplevel"]).map_err(|e| {
        let message = match e {
            Error::GitCommand { stderr, .. } => stderr,
            other => other.to_string(),
        };
        Error::NotARepository {
            path: dir.display().to_string(),
            message,
        }
    })?;
    let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(toplevel))
}

/// Runs `git fetch <remote>`
pub fn fetch(repo_dir: &Path, remote: &str) -> Result<()> {
    run_git(repo_dir, &["fetch", remote]).map_err(|e| {
        let message = match e {
            Error::GitCommand { stderr, .. } => stderr,
            other => other.to_string(),
        };
        Error::Fetch {
            remote: remote.to_string(),
            message,
        }
    })?;
    Ok(())
}

/// Runs `git branch -r` and returns the raw listing lines.
///
/// Lines are returned untrimmed; git pads them and adds a
/// `origin/HEAD -> origin/main` alias line which callers filter out.
pub fn list_remote_branches(repo_dir: &Path) -> Result<Vec<String>> {
    let output = run_git(repo_dir, &["branch", "-r"])?;
    Ok(output_lines(&output.stdout))
}

/// Runs `git diff --name-only -z <branch> <base>`
///
/// Paths are relative to the repository root whatever `repo_dir` is.
pub fn diff_names(repo_dir: &Path, branch: &str, base: &str) -> Result<Vec<String>> {
    let output = run_git(repo_dir, &["diff", "--name-only", "-z", branch, base])?;
    Ok(nul_separated(&output.stdout))
}

/// Overwrites `<repo_root>/<path>` with its content on `base`.
///
/// The blob is read with `git cat-file --filters`, which applies the same
/// smudge and end-of-line conversion as a checkout, and written directly.
/// The index is never touched, so calls for different paths can run
/// concurrently without contending for `index.lock`.
pub fn restore_file(repo_root: &Path, base: &str, path: &str) -> Result<()> {
    let object = format!("{}:{}", base, path);
    let output = run_git(repo_root, &["cat-file", "--filters", &object])?;

    let target = repo_root.join(path);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, &output.stdout)?;
    Ok(())
}
