//! Target dispatch: look a target up and run what it maps to

use crate::error::RunError;
use crate::operations::commands::{ExecutionOptions, execute_commands};
use crate::system::System;
use crate::targets::{TargetAction, TargetTable};
use anyhow::{Context as _, Result};
use std::io::Write;
use tracing::{debug, info};

/// Runs targets from a [`TargetTable`]
pub struct Dispatcher<'a> {
    system: &'a dyn System,
    table: &'a TargetTable,
    options: ExecutionOptions,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new(system: &'a dyn System, table: &'a TargetTable) -> Self {
        Self {
            system,
            table,
            options: ExecutionOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ExecutionOptions) -> Self {
        self.options = options;
        self
    }

    /// Run `target`, writing the banner or echoed command lines to `out`
    ///
    /// # Errors
    ///
    /// - [`RunError::UnknownTarget`] if the table has no such target; nothing is run
    /// - [`RunError::ToolFailed`] for the first tool that exits non-zero; later
    ///   tools of the target are not run
    pub fn run(&self, target: &str, out: &mut dyn Write) -> Result<()> {
        let Some(entry) = self.table.get(target) else {
            return Err(RunError::unknown_target(target, self.table.names()).into());
        };

        match &entry.action {
            TargetAction::Usage => {
                out.write_all(self.table.usage().as_bytes())
                    .context("Failed to write usage")?;
                Ok(())
            }
            TargetAction::Commands(specs) => {
                debug!("Target '{}' has {} command(s)", entry.name, specs.len());
                let count = execute_commands(self.system, specs, self.options, out)?;
                if !self.options.dry_run {
                    info!("Target '{}' finished: {} command(s) succeeded", entry.name, count);
                }
                Ok(())
            }
        }
    }
}
