//! Implementation of the phases of a rollout run.
//!
//! ## Overview
//!
//! A run follows a fixed, linear pipeline:
//! 1. Fetch - Update remote tracking branches (`git fetch <remote>`)
//! 2. Enumerate Branches - Pick out the tracking branches with pending work
//! 3. Collect Exempt Files - Union the files each of those branches edits
//! 4. Run Formatter - Rewrite the whole working tree
//! 5. Revert Exempt Files - Restore exempt files to mainline, concurrently
//!
//! Only fetch, branch listing and configuration failures stop a run. Every
//! other failure is reported and the pipeline carries on (see `ErrorPolicy`
//! for the strict alternative).

pub mod branches;
pub mod exempt;
pub mod formatter;
pub mod orchestrator;
pub mod revert;
