//! # Error Handling
//!
//! This module defines the centralized error type for the rollout tool. It
//! uses `thiserror` to derive a single `Error` enum covering every failure the
//! pipeline can run into, and a `Result<T>` alias used throughout the crate.
//!
//! Errors fall into two groups:
//!
//! - **Fatal**: configuration problems, a failed `git fetch`, or a failure to
//!   list remote tracking branches. These abort the run before any file is
//!   touched.
//! - **Degraded**: a failed diff for one branch, a failed restore for one
//!   file, or a misbehaving formatter. These are reported and the pipeline
//!   carries on, unless strict mode escalates them.
//!
//! Degraded errors still travel as `Error` values so that the reporter and the
//! final summary can show the underlying cause.

use thiserror::Error;

/// Main error type for rollout operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed or failed validation.
    ///
    /// Carries an optional hint naming the key that needs fixing.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// A `git` invocation exited unsuccessfully or could not be started.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// The working directory is not inside a git repository.
    #[error("Not a git repository: {path} - {message}")]
    NotARepository { path: String, message: String },

    /// Fetching from the remote failed. Always fatal.
    #[error("Failed to fetch from remote '{remote}': {message}")]
    Fetch { remote: String, message: String },

    /// An external command could not be started at all.
    #[error("Failed to run command '{command}': {message}")]
    CommandSpawn { command: String, message: String },

    /// Listing the files a branch changed relative to mainline failed.
    #[error("Could not diff branch {branch} against mainline: {message}")]
    BranchDiff { branch: String, message: String },

    /// Restoring a file to its mainline version failed.
    #[error("Could not revert {path}: {message}")]
    Revert { path: String, message: String },

    /// The revert worker pool could not be built.
    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },

    /// An error indicating that a mutex has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML syntax error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::WorkerPool {
            message: err.to_string(),
        }
    }
}
