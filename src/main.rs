//! # `pyqa`
//!
//! `pyqa` runs the usual Python code-quality tools over the source files of a
//! directory through three targets:
//!
//! - `help`: list the targets.
//! - `autoformat`: run the formatter (`black *.py`).
//! - `verify`: run the style checker, linter and security scanner
//!   (`flake8 --config=.flake8 *.py`, `pylint --rcfile=.pylintrc *.py`,
//!   `bandit *.py`), stopping at the first failure.
//!
//! ## Usage
//!
//! ```sh
//! pyqa verify
//! pyqa -C services/bot --dry-run autoformat
//! ```
//!
//! Tools and their configuration files can be overridden with a `pyqa.yaml`
//! file; see `pyqa --help` for the available options.

use anyhow::Result;
use clap::Parser as _;
use pyqa::cli::Args;
use pyqa::error::RunError;
use pyqa::system::real::RealSystem;
use std::io::Write as _;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber based on verbosity flags
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    // Logs go to stderr; stdout carries the banner and echoed commands
    fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let system = RealSystem::new();
    let mut stdout = std::io::stdout().lock();

    let result = pyqa::run(&args, &system, &mut stdout);
    stdout.flush()?;

    match result {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<RunError>()
                    .map_or(1, RunError::exit_code),
            );
        }
    }
}
