//! Shared utilities for command implementations.

use crate::error::{CliError, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Files a complete site is expected to have, relative to the source dir.
pub const KEY_FILES: &[&str] = &["index.html", "css/style.css", "js/main.js"];

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else if path == Path::new(".") {
        cwd.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Determine the project root from an optional `--cwd`.
///
/// # Errors
///
/// [`CliError::FileNotFound`] if the given directory doesn't exist.
pub fn project_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir().context("Cannot determine the working directory")?;

    let Some(cwd) = cwd else {
        return Ok(current);
    };

    let root = resolve_path(cwd, &current);
    if !root.is_dir() {
        return Err(CliError::FileNotFound(root));
    }
    Ok(root)
}

/// True for dot-prefixed names such as `.git`.
pub fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
