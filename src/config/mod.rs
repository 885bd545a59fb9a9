//! Configuration management module
//!
//! Handles YAML configuration lookup, JSON schema validation, and the
//! fallback to built-in tool defaults

pub mod schema;
pub mod validation;
pub mod yaml;

use crate::error::RunError;
use crate::system::System;
use crate::targets::ToolRole;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Source pattern used when the configuration does not set one
pub const DEFAULT_PATTERN: &str = "*.py";

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "pyqa.yaml";

/// Main configuration structure
///
/// Every field is optional; unset fields fall back to the defaults of
/// [`ToolRole`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Source glob handed to every tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Per-role tool overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub formatter: ToolConfig,
    #[serde(default)]
    pub style_checker: ToolConfig,
    #[serde(default)]
    pub linter: ToolConfig,
    #[serde(default)]
    pub security_scanner: ToolConfig,
}

impl ToolsConfig {
    #[must_use]
    pub const fn get(&self, role: ToolRole) -> &ToolConfig {
        match role {
            ToolRole::Formatter => &self.formatter,
            ToolRole::StyleChecker => &self.style_checker,
            ToolRole::Linter => &self.linter,
            ToolRole::SecurityScanner => &self.security_scanner,
        }
    }
}

/// Overrides for a single tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Program name or path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Tool configuration file; an empty string disables the flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    /// Arguments inserted before the source pattern
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

impl Config {
    /// Source pattern, configured or default
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or(DEFAULT_PATTERN)
    }

    /// Program for `role`, configured or default
    #[must_use]
    pub fn program(&self, role: ToolRole) -> &str {
        self.tools
            .get(role)
            .program
            .as_deref()
            .unwrap_or_else(|| role.default_program())
    }

    /// Configuration file for `role`, or `None` when no flag should be passed
    #[must_use]
    pub fn config_file(&self, role: ToolRole) -> Option<&str> {
        match self.tools.get(role).config.as_deref() {
            Some("") => None,
            Some(file) => Some(file),
            None => role.default_config_file(),
        }
    }

    #[must_use]
    pub fn extra_args(&self, role: ToolRole) -> &[String] {
        &self.tools.get(role).extra_args
    }

    /// Load configuration from file
    pub fn load_from_file(system: &dyn System, path: &Path) -> Result<Self> {
        yaml::load_config(system, path)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Find and load the configuration that applies to `working_dir`
    ///
    /// Lookup order: the explicit path (which must exist), `pyqa.yaml` in the
    /// working directory, `pyqa/pyqa.yaml` in the user config directory, and
    /// finally the built-in defaults.
    pub fn locate(
        system: &dyn System,
        explicit: Option<&Path>,
        working_dir: &Path,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            let path = if path.is_relative() {
                let current_dir = system.current_dir().map_err(|e| {
                    RunError::filesystem(format!(
                        "Failed to resolve configuration path {}: {e}",
                        path.display()
                    ))
                })?;
                current_dir.join(path)
            } else {
                path.to_path_buf()
            };
            return Self::load_from_file(system, &path);
        }

        let local = working_dir.join(CONFIG_FILE_NAME);
        if system.is_file(&local) {
            return Self::load_from_file(system, &local);
        }

        if let Some(config_dir) = system.config_dir() {
            let user = config_dir.join("pyqa").join(CONFIG_FILE_NAME);
            if system.is_file(&user) {
                return Self::load_from_file(system, &user);
            }
        }

        debug!("No configuration file found, using built-in defaults");
        Ok(Self::default())
    }
}
