//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for pyqa operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RunError {
    /// The requested target is not in the target table
    #[error("No rule to make target '{target}'. Known targets: {}", known.join(", "))]
    UnknownTarget { target: String, known: Vec<String> },

    /// Configuration Error - missing or invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem Error - working directory or file lookup failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },

    /// A tool ran and reported failure
    #[error("{role} '{program}' failed with exit code {code}")]
    ToolFailed {
        program: String,
        role: String,
        code: i32,
    },

    /// The tool's program could not be found on PATH
    #[error("Command not found: '{program}'")]
    ToolNotFound { program: String },

    /// The tool exists but could not be started
    #[error("Failed to start '{program}': {message}")]
    Spawn { program: String, message: String },
}

impl RunError {
    /// Get the appropriate exit code for this error type
    ///
    /// A failing tool's own exit code is passed through unchanged.
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::UnknownTarget { .. } | Self::Configuration { .. } | Self::Filesystem { .. } => 2,
            Self::ToolFailed { code, .. } => code,
            Self::ToolNotFound { .. } => 127,
            Self::Spawn { .. } => 126,
        }
    }

    /// Create an unknown target error
    #[inline]
    pub fn unknown_target<S: Into<String>>(target: S, known: Vec<String>) -> Self {
        Self::UnknownTarget {
            target: target.into(),
            known,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }

    /// Create a tool failure error
    #[inline]
    pub fn tool_failed<P: Into<String>, R: Into<String>>(program: P, role: R, code: i32) -> Self {
        Self::ToolFailed {
            program: program.into(),
            role: role.into(),
            code,
        }
    }

    /// Create a tool-not-found error
    #[inline]
    pub fn tool_not_found<S: Into<String>>(program: S) -> Self {
        Self::ToolNotFound {
            program: program.into(),
        }
    }

    /// Create a spawn error
    #[inline]
    pub fn spawn<P: Into<String>, M: Into<String>>(program: P, message: M) -> Self {
        Self::Spawn {
            program: program.into(),
            message: message.into(),
        }
    }
}
