//! Shell-style expansion of glob arguments
//!
//! Tools are spawned directly rather than through a shell, so patterns such
//! as `*.py` are expanded here the way `sh` would expand them: sorted, hidden
//! entries only matched by an explicit leading dot, and unmatched patterns
//! passed through unchanged.

use crate::error::RunError;
use crate::system::System;
use anyhow::Result;
use glob::{MatchOptions, Pattern};
use std::path::Path;
use tracing::{debug, warn};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Whether `arg` contains glob metacharacters
#[must_use]
pub fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expand every pattern argument against `working_dir`
pub fn expand_args(
    system: &dyn System,
    working_dir: &Path,
    args: &[String],
) -> Result<Vec<String>> {
    let mut expanded = Vec::with_capacity(args.len());
    for arg in args {
        expanded.extend(expand_arg(system, working_dir, arg)?);
    }
    Ok(expanded)
}

/// Expand a single argument
///
/// Only the final path component may contain a pattern; any directory prefix
/// before the last `/` is taken literally and kept in the results.
pub fn expand_arg(system: &dyn System, working_dir: &Path, arg: &str) -> Result<Vec<String>> {
    if !is_pattern(arg) {
        return Ok(vec![arg.to_owned()]);
    }

    let (prefix, name_pattern) = match arg.rfind('/') {
        Some(index) => arg.split_at(index + 1),
        None => ("", arg),
    };

    // A malformed pattern is left to the tool, as a shell would
    let Ok(pattern) = Pattern::new(name_pattern) else {
        return Ok(vec![arg.to_owned()]);
    };

    let search_dir = if prefix.is_empty() {
        working_dir.to_path_buf()
    } else {
        working_dir.join(prefix)
    };
    if !system.is_dir(&search_dir) {
        debug!("No directory {} for pattern '{arg}'", search_dir.display());
        return Ok(vec![arg.to_owned()]);
    }

    let entries = system.read_dir(&search_dir).map_err(|e| {
        RunError::filesystem(format!(
            "Failed to read directory {}: {e}",
            search_dir.display()
        ))
    })?;

    let mut matches = Vec::new();
    for entry in &entries {
        let Some(file_name) = entry.file_name() else {
            continue;
        };
        match file_name.to_str() {
            Some(name) if pattern.matches_with(name, MATCH_OPTIONS) => {
                matches.push(format!("{prefix}{name}"));
            }
            Some(_) => {}
            None if pattern.matches_with(&file_name.to_string_lossy(), MATCH_OPTIONS) => {
                warn!("Skipping {}: file name is not valid UTF-8", entry.display());
            }
            None => {}
        }
    }

    if matches.is_empty() {
        debug!("Pattern '{arg}' matched nothing in {}", search_dir.display());
        return Ok(vec![arg.to_owned()]);
    }

    matches.sort();
    debug!("Pattern '{arg}' matched {} entries", matches.len());
    Ok(matches)
}
