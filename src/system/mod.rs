//! System abstraction for environment, filesystem and process operations
//!
//! This module provides a unified trait for all external system interactions,
//! allowing for easy testing with mock implementations.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// A fully resolved subprocess: program, expanded arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// How a finished process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Terminating signal, if the process was killed (unix only)
    pub signal: Option<i32>,
}

impl ProcessStatus {
    /// A status for a process that exited with `code`
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// A status for a process killed by `signal`
    #[must_use]
    pub const fn killed(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Exit code to report for this status, using the shell's `128 + signal`
    /// convention for killed processes
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => 1,
        }
    }
}

/// Unified trait for system operations (environment + filesystem + processes)
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::env`, `std::fs` and `std::process`
/// - `MockSystem`: Test implementation using in-memory storage and scripted processes
pub trait System: Send + Sync {
    // ==================== Environment Operations ====================

    /// Get the current working directory
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// The per-user configuration directory, if the platform has one
    fn config_dir(&self) -> Option<PathBuf>;

    // ==================== Filesystem Operations ====================

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path points to a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read directory entries, returning paths of all entries
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    // ==================== Process Operations ====================

    /// Run a process to completion with inherited stdio
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be started. A process that
    /// starts and then fails is reported through the returned status.
    fn run_process(&self, invocation: &Invocation) -> io::Result<ProcessStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_prefers_process_code() {
        assert_eq!(ProcessStatus::exited(0).exit_code(), 0);
        assert_eq!(ProcessStatus::exited(4).exit_code(), 4);
        assert!(ProcessStatus::exited(0).success());
        assert!(!ProcessStatus::exited(4).success());
    }

    #[test]
    fn killed_process_maps_to_shell_convention() {
        let status = ProcessStatus::killed(9);
        assert!(!status.success());
        assert_eq!(status.exit_code(), 137);
    }
}
