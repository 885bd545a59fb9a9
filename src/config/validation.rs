//! Configuration validation logic

use crate::config::{Config, ToolConfig};
use crate::targets::ToolRole;
use anyhow::{Result, anyhow};
use regex::Regex;
use std::path::{Component, Path};

/// Validate a complete configuration
///
/// # Errors
///
/// Returns an error if:
/// - The source pattern is empty or not a valid glob
/// - A tool override is invalid
#[inline]
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(pattern) = config.pattern.as_deref() {
        validate_pattern(pattern)?;
    }

    for role in [
        ToolRole::Formatter,
        ToolRole::StyleChecker,
        ToolRole::Linter,
        ToolRole::SecurityScanner,
    ] {
        validate_tool_config(role, config.tools.get(role))?;
    }

    Ok(())
}

/// Validate the overrides of a single tool
fn validate_tool_config(role: ToolRole, tool: &ToolConfig) -> Result<()> {
    let context = format!("tools.{}", role.config_key());

    if let Some(program) = tool.program.as_deref() {
        validate_program(program).map_err(|e| anyhow!("{context}: {e}"))?;
    }

    if let Some(file) = tool.config.as_deref()
        && !file.is_empty()
    {
        validate_path_safety(file).map_err(|e| anyhow!("{context}: {e}"))?;
    }

    for (index, arg) in tool.extra_args.iter().enumerate() {
        if arg.trim().is_empty() {
            return Err(anyhow!(
                "{context}: Extra argument #{} cannot be empty",
                index + 1
            ));
        }
    }

    Ok(())
}

/// Validate the source pattern
///
/// # Errors
///
/// Returns an error if the pattern is empty or not a valid glob
#[inline]
pub fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(anyhow!("Source pattern cannot be empty"));
    }

    glob::Pattern::new(pattern)
        .map_err(|e| anyhow!("Invalid source pattern '{pattern}': {e}"))?;

    Ok(())
}

/// Validate a tool program name or path
///
/// Programs are run directly, never through a shell, so anything that only
/// makes sense to a shell is rejected.
///
/// # Errors
///
/// Returns an error if the program is empty, starts with `~`, or contains
/// whitespace or shell metacharacters
#[inline]
pub fn validate_program(program: &str) -> Result<()> {
    if program.trim().is_empty() {
        return Err(anyhow!("Program cannot be empty"));
    }

    if program.starts_with('~') {
        return Err(anyhow!(
            "Invalid program '{program}'. '~' is not expanded; use an absolute path"
        ));
    }

    let regex = Regex::new(r"^[\w.+/\\:~-]+$")?;
    if !regex.is_match(program) {
        return Err(anyhow!(
            "Invalid program '{program}'. Use a program name or path; \
            put arguments in 'extra_args'"
        ));
    }

    Ok(())
}

/// Validate path safety (prevent directory traversal)
///
/// # Errors
///
/// Returns an error if:
/// - The path is an absolute path
/// - The path escapes the working directory
#[inline]
pub fn validate_path_safety(path: &str) -> Result<()> {
    let path_obj = Path::new(path);

    if path_obj.is_absolute() || path.starts_with('/') {
        return Err(anyhow!(
            "Absolute paths are not allowed: '{path}'. Use a path relative to the source directory."
        ));
    }

    let mut depth: usize = 0;
    for component in path_obj.components() {
        match component {
            Component::ParentDir => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    anyhow!("Path contains unsafe directory traversal: '{path}'")
                })?;
            }
            Component::Normal(_) => depth += 1,
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let config = Config {
            pattern: Some("[".to_owned()),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid source pattern"));
    }

    #[test]
    fn program_with_arguments_is_rejected() {
        let mut config = Config::default();
        config.tools.linter.program = Some("pylint -j 4".to_owned());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().starts_with("tools.linter:"));
        assert!(err.to_string().contains("extra_args"));
    }

    #[test]
    fn home_relative_program_is_rejected() {
        let mut config = Config::default();
        config.tools.formatter.program = Some("~/.local/bin/black".to_owned());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().starts_with("tools.formatter:"));
        assert!(err.to_string().contains("'~' is not expanded"));
    }

    #[test]
    fn empty_extra_argument_is_rejected() {
        let mut config = Config::default();
        config.tools.security_scanner.extra_args = vec!["-q".to_owned(), " ".to_owned()];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Extra argument #2"));
    }

    #[test]
    fn empty_config_file_is_allowed() {
        let mut config = Config::default();
        config.tools.style_checker.config = Some(String::new());
        assert!(validate_config(&config).is_ok());
    }
}
