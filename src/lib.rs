//! # Coding Standards Rollout Library
//!
//! This library rolls coding-standard fixes out across a repository without
//! colliding with teammates' in-flight branches. It runs a formatter over the
//! whole working tree, then reverts the formatter's changes in every file that
//! some remote tracking branch has also edited. Those files get fixed later,
//! once their branches have merged.
//!
//! ## Quick Example
//!
//! ```
//! use coding_standards_rollout::branch::TrackingBranch;
//! use coding_standards_rollout::phases::branches::relevant_branches;
//!
//! let listing = [
//!     "  origin/HEAD -> origin/main",
//!     "  origin/main",
//!     "  origin/feature/login",
//! ];
//! let mainline = TrackingBranch::new("origin", "main");
//! let branches = relevant_branches(&listing, "origin", &mainline);
//! assert_eq!(branches, vec![TrackingBranch::from_qualified("origin/feature/login")]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the TOML file naming the remote, the
//!   mainline branch and the formatter command.
//! - **Collaborators (`repository`, `process`)**: traits for version control
//!   and for running external commands, with implementations that shell out
//!   to `git` and to the formatter.
//! - **Reporting (`report`)**: the per-run channel through which phases
//!   describe what they did.
//! - **Phases (`phases`)**: the pipeline itself.
//!
//! ## Execution Flow
//!
//! `phases::orchestrator::execute_fix` runs, in order:
//!
//! 1.  **Fetch** from the remote.
//! 2.  **Enumerate Branches**: filter `git branch -r` down to the branches with
//!     pending work.
//! 3.  **Collect Exempt Files**: union the files each branch changed relative
//!     to mainline.
//! 4.  **Run Formatter** over the whole tree.
//! 5.  **Revert Exempt Files** to their mainline content on a bounded worker
//!     pool.

pub mod branch;
pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod phases;
pub mod process;
pub mod report;
pub mod repository;

#[cfg(test)]
mod branch_proptest;
