//! # Coding Standards Rollout CLI
//!
//! Binary entry point for the `coding-standards-rollout` tool. It parses the
//! command line with `clap` and dispatches to the subcommand. All real work
//! happens in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
