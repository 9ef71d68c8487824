//! # CLI Command Implementations
//!
//! Each subcommand lives in its own module with an `Args` struct derived
//! using `clap` and an `execute` function that calls into the
//! `coding_standards_rollout` library.

pub mod fix;
