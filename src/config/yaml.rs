//! YAML configuration loading and parsing

use crate::config::Config;
use crate::error::RunError;
use crate::system::System;
use anyhow::{Context as _, Result, anyhow};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load and parse YAML configuration from file
///
/// Every failure is reported as a [`RunError::Configuration`].
pub fn load_config(system: &dyn System, path: &Path) -> Result<Config> {
    parse_config(system, path)
        .map_err(|e| RunError::configuration(format!("{e:#}")).into())
}

fn parse_config(system: &dyn System, path: &Path) -> Result<Config> {
    if !system.exists(path) {
        return Err(anyhow!(
            "Configuration file not found: {}\n\
            Create a pyqa.yaml file or specify a different path with --config",
            path.display()
        ));
    }

    debug!("Loading configuration from {}", path.display());

    let content = system
        .read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    // An empty file means "all defaults"
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    // Parse YAML into a plain value first so the schema sees exactly what the user wrote
    let mut value: Value = serde_yaml::from_str(&content).with_context(|| {
        return format!(
            "Failed to parse YAML configuration in file: {}\n\
            Please check the syntax and structure of your configuration file",
            path.display()
        );
    })?;

    // A file holding only comments parses to null
    if value.is_null() {
        value = Value::Object(serde_json::Map::new());
    }

    crate::config::schema::validate_against_schema(&value)
        .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

    let config: Config = serde_json::from_value(value)
        .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::system::MockSystem;
    use crate::targets::ToolRole;

    fn load(contents: &str) -> Result<Config> {
        let system = MockSystem::new()
            .with_file("/project/pyqa.yaml", contents.as_bytes())
            .unwrap();
        load_config(&system, Path::new("/project/pyqa.yaml"))
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(load("").unwrap(), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(
            r#"
pattern: "app/*.py"
tools:
  linter:
    program: pylint3
    config: setup.cfg
  security_scanner:
    extra_args: ["-q", "-ll"]
"#,
        )
        .unwrap();

        assert_eq!(config.pattern(), "app/*.py");
        assert_eq!(config.program(ToolRole::Linter), "pylint3");
        assert_eq!(config.config_file(ToolRole::Linter), Some("setup.cfg"));
        assert_eq!(config.extra_args(ToolRole::SecurityScanner), ["-q", "-ll"]);
        assert_eq!(config.program(ToolRole::StyleChecker), "flake8");
    }

    #[test]
    fn errors_are_configuration_errors() {
        let err = load("tools: [unterminated").unwrap_err();
        let run_error = err.downcast_ref::<RunError>().unwrap();
        assert_eq!(run_error.exit_code(), 2);
        assert!(err.to_string().contains("Failed to parse YAML"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load("tools:\n  typechecker:\n    program: mypy\n").unwrap_err();
        assert!(err.to_string().contains("does not match the schema"));
    }

    #[test]
    fn traversal_in_tool_config_is_rejected() {
        let err = load("tools:\n  linter:\n    config: ../../.pylintrc\n").unwrap_err();
        assert!(err.to_string().contains("unsafe directory traversal"));
    }
}
