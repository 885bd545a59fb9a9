//! Command execution with proper working directory context

use crate::error::RunError;
use crate::operations::expand::expand_args;
use crate::operations::to_command_line::format_invocation;
use crate::system::{Invocation, System};
use crate::targets::CommandSpec;
use anyhow::{Context as _, Result};
use std::io::{self, Write};
use tracing::{debug, info, warn};

/// How a chain of commands is run
#[derive(Debug, Clone, Copy)]
pub struct ExecutionOptions {
    /// Print command lines without running them
    pub dry_run: bool,
    /// Print each command line before running it
    pub echo: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            echo: true,
        }
    }
}

/// Expand the arguments of `spec` into a runnable invocation
pub fn resolve_command(system: &dyn System, spec: &CommandSpec) -> Result<Invocation> {
    if !system.is_dir(&spec.working_dir) {
        return Err(RunError::filesystem(format!(
            "Working directory does not exist: {}",
            spec.working_dir.display()
        ))
        .into());
    }

    Ok(Invocation {
        program: spec.program.clone(),
        args: expand_args(system, &spec.working_dir, &spec.args)?,
        working_dir: spec.working_dir.clone(),
    })
}

/// Execute a list of commands in order, stopping at the first failure
///
/// Returns the number of commands that ran (or would run, for a dry run).
pub fn execute_commands(
    system: &dyn System,
    specs: &[CommandSpec],
    options: ExecutionOptions,
    out: &mut dyn Write,
) -> Result<usize> {
    let mut executed_count = 0;

    for (index, spec) in specs.iter().enumerate() {
        execute_single_command(system, spec, index + 1, options, out)?;
        executed_count += 1;
    }

    Ok(executed_count)
}

/// Execute a single command with real-time output
fn execute_single_command(
    system: &dyn System,
    spec: &CommandSpec,
    command_number: usize,
    options: ExecutionOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let invocation = resolve_command(system, spec)?;
    let command_line = format_invocation(&invocation);

    if options.dry_run || options.echo {
        writeln!(out, "{command_line}").context("Failed to write command line")?;
        // Keep the echoed line ahead of the tool's own output
        out.flush().context("Failed to flush output")?;
    }

    if options.dry_run {
        debug!("Dry run, not executing command #{}", command_number);
        return Ok(());
    }

    if let Some(file) = spec.config_file.as_deref()
        && !system.exists(&spec.working_dir.join(file))
    {
        warn!(
            "Configuration file '{}' for the {} was not found in {}",
            file,
            spec.role,
            spec.working_dir.display()
        );
    }

    info!("Running {} #{}: {}", spec.role, command_number, command_line);

    let status = match system.run_process(&invocation) {
        Ok(status) => status,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(RunError::tool_not_found(&spec.program).into());
        }
        Err(err) => {
            return Err(RunError::spawn(&spec.program, err.to_string()).into());
        }
    };

    if !status.success() {
        return Err(
            RunError::tool_failed(&spec.program, spec.role.to_string(), status.exit_code()).into(),
        );
    }

    debug!("{} '{}' succeeded", spec.role, spec.program);
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::system::{MockSystem, ProcessStatus};
    use crate::targets::ToolRole;
    use std::path::Path;

    fn specs(roles: &[ToolRole]) -> Vec<CommandSpec> {
        let config = Config::default();
        roles
            .iter()
            .map(|role| CommandSpec::for_role(*role, &config, Path::new("/project")))
            .collect()
    }

    fn project() -> MockSystem {
        MockSystem::new()
            .with_file("/project/main.py", b"")
            .unwrap()
            .with_file("/project/.flake8", b"[flake8]\n")
            .unwrap()
    }

    #[test]
    fn resolve_expands_sources() {
        let system = project();
        let specs = specs(&[ToolRole::StyleChecker]);
        let spec = &specs[0];
        let invocation = resolve_command(&system, spec).unwrap();
        assert_eq!(invocation.args, vec!["--config=.flake8", "main.py"]);
    }

    #[test]
    fn missing_working_directory_is_a_filesystem_error() {
        let system = MockSystem::new();
        let specs = specs(&[ToolRole::Formatter]);
        let spec = &specs[0];
        let err = resolve_command(&system, spec).unwrap_err();
        assert_eq!(err.downcast_ref::<RunError>().unwrap().exit_code(), 2);
    }

    #[test]
    fn echo_prints_each_line_before_running() {
        let system = project();
        let mut out = Vec::<u8>::new();
        let count = execute_commands(
            &system,
            &specs(&[ToolRole::Formatter, ToolRole::SecurityScanner]),
            ExecutionOptions::default(),
            &mut out,
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "black main.py\nbandit main.py\n"
        );
    }

    #[test]
    fn quiet_execution_prints_nothing() {
        let system = project();
        let mut out = Vec::<u8>::new();
        execute_commands(
            &system,
            &specs(&[ToolRole::Formatter]),
            ExecutionOptions {
                dry_run: false,
                echo: false,
            },
            &mut out,
        )
        .unwrap();

        assert!(out.is_empty());
        assert_eq!(system.invoked_programs(), vec!["black"]);
    }

    #[test]
    fn dry_run_spawns_nothing() {
        let system = project();
        let mut out = Vec::<u8>::new();
        let count = execute_commands(
            &system,
            &specs(&ToolRole::VERIFY_ORDER),
            ExecutionOptions {
                dry_run: true,
                echo: false,
            },
            &mut out,
        )
        .unwrap();

        assert_eq!(count, 3);
        assert!(system.invocations().is_empty());
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn killed_tool_reports_signal_exit_code() {
        let system = project()
            .with_process("pylint", ProcessStatus::killed(15))
            .unwrap();
        let err = execute_commands(
            &system,
            &specs(&[ToolRole::Linter]),
            ExecutionOptions::default(),
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();

        assert_eq!(err.downcast_ref::<RunError>().unwrap().exit_code(), 143);
    }

    #[test]
    fn missing_program_maps_to_127() {
        let system = project().with_missing_program("bandit").unwrap();
        let err = execute_commands(
            &system,
            &specs(&[ToolRole::SecurityScanner]),
            ExecutionOptions::default(),
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();

        let run_error = err.downcast_ref::<RunError>().unwrap();
        assert_eq!(run_error.exit_code(), 127);
        assert!(run_error.to_string().contains("bandit"));
    }
}
