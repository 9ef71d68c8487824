//! # Run Configuration
//!
//! This module loads and validates the TOML configuration file that drives a
//! rollout run. The file names the remote, the mainline branch, and the
//! formatter command to run over the working tree:
//!
//! ```toml
//! [git]
//! remote-name = "origin"
//! mainline-branch-name = "main"
//!
//! [codingstandards]
//! command-to-run = "vendor/bin/php-cs-fixer"
//! command-arguments = ["fix", "."]
//!
//! [rollout]
//! workers = 100
//! strict = false
//! ```
//!
//! The `[rollout]` section is optional. Everything else is required, and a
//! missing key is reported with a hint naming the key to add. Unknown keys are
//! rejected so that a typo does not silently fall back to a default.
//!
//! Parsing happens once, before the pipeline starts. The resulting
//! `RunConfig` is never mutated by the pipeline.

use crate::branch::TrackingBranch;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Worker pool size used for the revert stage when none is configured.
pub const DEFAULT_WORKERS: usize = 100;

/// What to do when a single branch diff or a single file revert fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Record the failure and keep going with the remaining work.
    #[default]
    ReportAndContinue,
    /// Stop at the first failure and return it as an error.
    AbortOnFirstError,
}

impl ErrorPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ErrorPolicy::AbortOnFirstError
        } else {
            ErrorPolicy::ReportAndContinue
        }
    }

    pub fn is_strict(self) -> bool {
        self == ErrorPolicy::AbortOnFirstError
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub remote_name: String,
    pub mainline_branch_name: String,
    pub command: String,
    pub arguments: Vec<String>,
    pub workers: usize,
    pub error_policy: ErrorPolicy,
}

impl RunConfig {
    /// The mainline branch as seen through the remote, e.g. `origin/main`.
    ///
    /// This is both the diff baseline and the revert source.
    pub fn mainline_tracking_branch(&self) -> TrackingBranch {
        TrackingBranch::new(&self.remote_name, &self.mainline_branch_name)
    }

    /// Check the invariants the pipeline relies on.
    ///
    /// Called by `parse`, and again by callers that override fields
    /// (for example from command-line flags).
    pub fn validate(&self) -> Result<()> {
        if self.remote_name.trim().is_empty() {
            return Err(missing("git.remote-name", "remote-name = \"origin\"", "git"));
        }
        if self.mainline_branch_name.trim().is_empty() {
            return Err(missing(
                "git.mainline-branch-name",
                "mainline-branch-name = \"main\"",
                "git",
            ));
        }
        if self.command.trim().is_empty() {
            return Err(missing(
                "codingstandards.command-to-run",
                "command-to-run = \"path/to/fixer\"",
                "codingstandards",
            ));
        }
        if self.workers == 0 {
            return Err(Error::ConfigParse {
                message: "rollout.workers must be greater than zero".to_string(),
                hint: Some(format!(
                    "Remove the key to use the default of {}",
                    DEFAULT_WORKERS
                )),
            });
        }
        Ok(())
    }
}

fn missing(key: &str, example: &str, section: &str) -> Error {
    Error::ConfigParse {
        message: format!("{} not set", key),
        hint: Some(format!("Add '{}' under [{}]", example, section)),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    git: RawGit,
    #[serde(default, rename = "codingstandards")]
    coding_standards: RawCodingStandards,
    #[serde(default)]
    rollout: RawRollout,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawGit {
    remote_name: Option<String>,
    mainline_branch_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawCodingStandards {
    command_to_run: Option<String>,
    command_arguments: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawRollout {
    workers: Option<usize>,
    strict: Option<bool>,
}

/// Parse and validate a configuration from TOML text.
pub fn parse(content: &str) -> Result<RunConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    // Arguments may legitimately be empty, but the key must be spelled out.
    let arguments = raw
        .coding_standards
        .command_arguments
        .ok_or_else(|| {
            missing(
                "codingstandards.command-arguments",
                "command-arguments = []",
                "codingstandards",
            )
        })?;

    let config = RunConfig {
        remote_name: raw.git.remote_name.unwrap_or_default(),
        mainline_branch_name: raw.git.mainline_branch_name.unwrap_or_default(),
        command: raw.coding_standards.command_to_run.unwrap_or_default(),
        arguments,
        workers: raw.rollout.workers.unwrap_or(DEFAULT_WORKERS),
        error_policy: ErrorPolicy::from_strict(raw.rollout.strict.unwrap_or(false)),
    };
    config.validate()?;
    Ok(config)
}

/// Parse a configuration from a TOML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
