//! Mock system implementation for testing

use super::{Invocation, ProcessStatus, System};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory filesystem and process table. Every
/// process run is recorded; exit statuses are scripted per program and default
/// to success.
///
/// # Example
/// ```
/// use pyqa::system::{mock::MockSystem, Invocation, ProcessStatus, System};
/// use std::path::{Path, PathBuf};
///
/// let system = MockSystem::new()
///     .with_file("/project/app.py", b"print('hi')\n").unwrap()
///     .with_process("flake8", ProcessStatus::exited(1)).unwrap();
///
/// let status = system
///     .run_process(&Invocation {
///         program: "flake8".to_owned(),
///         args: vec!["app.py".to_owned()],
///         working_dir: PathBuf::from("/project"),
///     })
///     .unwrap();
///
/// assert_eq!(status.code, Some(1));
/// assert!(system.exists(Path::new("/project/app.py")));
/// assert_eq!(system.invocations().len(), 1);
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    current_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    processes: HashMap<String, ProcessStatus>,
    missing_programs: HashSet<String>,
    invocations: Vec<Invocation>,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                current_dir: Some(PathBuf::from("/")),
                config_dir: None,
                files: HashMap::new(),
                dirs: HashSet::from([PathBuf::from("/")]),
                processes: HashMap::new(),
                missing_programs: HashSet::new(),
                invocations: Vec::new(),
            })),
        }
    }

    /// Set the current working directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_current_dir<P: AsRef<Path>>(self, dir: P) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let dir = dir.as_ref().to_path_buf();
        Self::ensure_parent_dirs(&mut state.dirs, &dir);
        state.current_dir = Some(dir);
        drop(state);
        Ok(self)
    }

    /// Make `current_dir` fail, as it does once the directory has been removed
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn without_current_dir(self) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.current_dir = None;
        drop(state);
        Ok(self)
    }

    /// Set the per-user configuration directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_config_dir<P: AsRef<Path>>(self, dir: P) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let dir = dir.as_ref().to_path_buf();
        Self::ensure_parent_dirs(&mut state.dirs, &dir);
        state.config_dir = Some(dir);
        drop(state);
        Ok(self)
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if let Some(parent) = path_buf.parent() {
            Self::ensure_parent_dirs(&mut state.dirs, parent);
        }

        state.files.insert(path_buf, contents.to_vec());
        drop(state);
        Ok(self)
    }

    /// Add a directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_parent_dirs(&mut state.dirs, &path_buf);
        drop(state);
        Ok(self)
    }

    /// Script the status returned whenever `program` is run (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_process(self, program: &str, status: ProcessStatus) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.processes.insert(program.to_owned(), status);
        drop(state);
        Ok(self)
    }

    /// Make `program` fail to start as if it were not installed (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_missing_program(self, program: &str) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.missing_programs.insert(program.to_owned());
        drop(state);
        Ok(self)
    }

    /// All process invocations that were started, in order
    #[must_use]
    #[inline]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state
            .read()
            .map(|state| state.invocations.clone())
            .unwrap_or_default()
    }

    /// Programs of all started invocations, in order
    #[must_use]
    #[inline]
    pub fn invoked_programs(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|invocation| invocation.program)
            .collect()
    }

    #[inline]
    fn ensure_parent_dirs(dirs: &mut HashSet<PathBuf>, path: &Path) {
        let mut current = Some(path);
        while let Some(dir) = current {
            if dir == Path::new("") {
                break;
            }
            dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn current_dir(&self) -> io::Result<PathBuf> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.current_dir.clone().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Current directory has been removed",
            )
        })
    }

    #[inline]
    fn config_dir(&self) -> Option<PathBuf> {
        self.state.read().ok()?.config_dir.clone()
    }

    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let bytes = state.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        String::from_utf8(bytes.clone()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    #[inline]
    fn is_file(&self, path: &Path) -> bool {
        self.state
            .read()
            .is_ok_and(|state| state.files.contains_key(path))
    }

    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        self.state
            .read()
            .is_ok_and(|state| state.dirs.contains(path))
    }

    #[inline]
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        let mut entries = Vec::new();

        // Find all direct children (files and directories)
        for file_path in state.files.keys() {
            if let Some(parent) = file_path.parent()
                && parent == path
            {
                entries.push(file_path.clone());
            }
        }

        for dir_path in &state.dirs {
            if let Some(parent) = dir_path.parent()
                && parent == path
                && dir_path != path
            {
                entries.push(dir_path.clone());
            }
        }

        drop(state);

        Ok(entries)
    }

    #[inline]
    fn run_process(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if state.missing_programs.contains(&invocation.program) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file or directory: {}", invocation.program),
            ));
        }

        state.invocations.push(invocation.clone());
        let status = state
            .processes
            .get(&invocation.program)
            .copied()
            .unwrap_or(ProcessStatus::exited(0));
        drop(state);

        Ok(status)
    }
}
