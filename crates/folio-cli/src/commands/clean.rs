//! Clean command implementation.
//!
//! Removes build output directories and stray `*.log` files.

use crate::cli::CleanArgs;
use crate::commands::utils;
use crate::config::{ConfigOverrides, FolioConfig};
use crate::error::Result;
use crate::ui;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Build output directories removed besides the configured one.
const ARTIFACT_DIRS: &[&str] = &["dist", "build"];

/// Execute the clean command.
///
/// Removes `dist`, `build` and the configured build directory, then every
/// `*.log` file under the project outside hidden directories and
/// `node_modules`. A directory that contains the site sources is never
/// removed.
pub async fn execute(args: CleanArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;
    let config = FolioConfig::load(&ConfigOverrides::default(), &root, None)?;
    let source_dir = utils::resolve_path(&config.source_dir, &root);

    let mut dirs: Vec<PathBuf> = ARTIFACT_DIRS.iter().map(|d| root.join(d)).collect();
    let configured = utils::resolve_path(&config.build_dir, &root);
    if !dirs.contains(&configured) {
        dirs.push(configured);
    }

    let mut removed = 0;
    for dir in dirs.iter().filter(|d| d.is_dir()) {
        if contains(dir, &source_dir) {
            ui::warning(&format!(
                "Not removing {}: it contains the site sources",
                dir.display()
            ));
            continue;
        }
        fs::remove_dir_all(dir)?;
        ui::success(&format!("Removed {}", display(dir, &root)));
        removed += 1;
    }

    for log in find_log_files(&root) {
        fs::remove_file(&log)?;
        ui::success(&format!("Removed {}", display(&log, &root)));
        removed += 1;
    }

    if removed == 0 {
        ui::info("Nothing to clean");
    }

    Ok(())
}

/// Every `*.log` file under `root`, skipping hidden directories and
/// `node_modules`.
fn find_log_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !(utils::is_hidden(entry.file_name()) || entry.file_name() == "node_modules")
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "log")
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn contains(dir: &Path, path: &Path) -> bool {
    match (dir.canonicalize(), path.canonicalize()) {
        (Ok(dir), Ok(path)) => path.starts_with(dir),
        _ => false,
    }
}

fn display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
