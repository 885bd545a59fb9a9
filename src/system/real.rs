//! Real system implementation using `std::env`, `std::fs` and `std::process`

use super::{Invocation, ProcessStatus, System};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Production implementation of System trait
///
/// This implementation directly delegates to the standard library's
/// environment, filesystem and process functions.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RealSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn run_process(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        // Inherited stdio so the tool's own diagnostics reach the user untouched
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .status()?;

        Ok(to_process_status(status))
    }
}

#[cfg(unix)]
fn to_process_status(status: ExitStatus) -> ProcessStatus {
    use std::os::unix::process::ExitStatusExt as _;

    ProcessStatus {
        code: status.code(),
        signal: status.signal(),
    }
}

#[cfg(not(unix))]
fn to_process_status(status: ExitStatus) -> ProcessStatus {
    ProcessStatus {
        code: status.code(),
        signal: None,
    }
}
