//! CLI command implementations

use crate::cli::Args;
use crate::config::Config;
use crate::error::RunError;
use crate::operations::commands::ExecutionOptions;
use crate::operations::dispatch::Dispatcher;
use crate::system::System;
use crate::targets::{HELP, TARGET_NAMES, TargetTable};
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Execute the target named on the command line
///
/// The target name is checked before the working directory or configuration
/// is touched. `help` never fails on either: it falls back to the built-in
/// defaults.
pub fn execute_target(args: &Args, system: &dyn System, out: &mut dyn Write) -> Result<()> {
    if !TARGET_NAMES.contains(&args.target.as_str()) {
        let known = TARGET_NAMES.iter().map(|name| (*name).to_owned()).collect();
        return Err(RunError::unknown_target(&args.target, known).into());
    }

    let table = if args.target == HELP {
        load_table(args, system).unwrap_or_else(|err| {
            warn!("{err:#}; showing built-in defaults");
            TargetTable::from_config(&Config::default(), Path::new("."))
        })
    } else {
        load_table(args, system)?
    };

    let options = ExecutionOptions {
        dry_run: args.dry_run,
        echo: !args.quiet,
    };

    Dispatcher::new(system, &table)
        .with_options(options)
        .run(&args.target, out)
}

/// Build the target table for the working directory and its configuration
fn load_table(args: &Args, system: &dyn System) -> Result<TargetTable> {
    let working_dir = resolve_working_dir(system, args.directory.as_deref())?;
    debug!("Working directory: {}", working_dir.display());

    let config = Config::locate(system, args.config.as_deref(), &working_dir)?;
    Ok(TargetTable::from_config(&config, &working_dir))
}

/// Resolve `--directory` against the current directory and check it is a directory
pub fn resolve_working_dir(system: &dyn System, directory: Option<&Path>) -> Result<PathBuf> {
    let working_dir = match directory {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => current_dir(system)?.join(dir),
        None => current_dir(system)?,
    };

    if !system.is_dir(&working_dir) {
        return Err(RunError::filesystem(format!(
            "Source directory does not exist or is not a directory: {}",
            working_dir.display()
        ))
        .into());
    }

    Ok(working_dir)
}

fn current_dir(system: &dyn System) -> Result<PathBuf> {
    system.current_dir().map_err(|e| {
        anyhow::Error::from(RunError::filesystem(format!(
            "Failed to determine the current directory: {e}"
        )))
    })
}
