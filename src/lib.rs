//! `pyqa` - run Python formatting and static-analysis tools over a source directory
//!
//! This library maps a small, fixed set of targets (`help`, `autoformat`,
//! `verify`) to the external tools they run, expands source patterns the way
//! a shell would, and runs the tools in order with stop-on-first-failure
//! semantics.

pub mod cli;
pub mod config;
pub mod error;
pub mod operations;
pub mod system;
pub mod targets;

use anyhow::Result;
use cli::Args;
use std::io::Write;
use system::System;

/// Main entry point for the pyqa library
pub fn run(args: &Args, system: &dyn System, out: &mut dyn Write) -> Result<()> {
    cli::execute_target(args, system, out)
}
