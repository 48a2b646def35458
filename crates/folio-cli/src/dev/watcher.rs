//! File system watcher for development mode.
//!
//! Watches the served directory recursively and forwards changes through a
//! bounded channel, skipping hidden paths and configured directories such as
//! `node_modules` and the build output.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc;

/// Capacity of the change channel.
const CHANNEL_CAPACITY: usize = 100;

/// Kind of change observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    Created,
    Modified,
    Removed,
}

/// A change to one path, stamped when the backend reported it.
#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub kind: WatchKind,
    pub at: Instant,
}

/// Recursive watch over a directory.
///
/// Dropping the watcher releases the OS watch and closes the channel.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// # Returns
    ///
    /// Tuple of (FileWatcher, receiver for change events)
    ///
    /// # Errors
    ///
    /// Returns error if the directory doesn't exist or the watch cannot be
    /// registered.
    pub fn new(root: &Path, ignore_patterns: Vec<String>) -> Result<(Self, mpsc::Receiver<WatchEvent>)> {
        if !root.is_dir() {
            return Err(CliError::FileNotFound(root.to_path_buf()));
        }
        // Backends report canonical paths
        let root = root.canonicalize()?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let callback_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Watch error: {}", e);
                    return;
                }
            };

            let kind = match event.kind {
                EventKind::Create(_) => WatchKind::Created,
                EventKind::Modify(_) => WatchKind::Modified,
                EventKind::Remove(_) => WatchKind::Removed,
                _ => return,
            };
            let at = Instant::now();

            for path in event.paths {
                if Self::should_ignore(&path, &callback_root, &ignore_patterns) {
                    continue;
                }
                // Fails only once the receiver is gone during shutdown
                let _ = tx.blocking_send(WatchEvent { path, kind, at });
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Check if a path should be ignored.
    ///
    /// Paths outside `root`, paths with a hidden component, and paths inside
    /// an ignored directory are skipped. A pattern matches a single path
    /// component (`node_modules`) or a relative prefix (`build/site`).
    pub fn should_ignore(path: &Path, root: &Path, ignore_patterns: &[String]) -> bool {
        let Ok(rel_path) = path.strip_prefix(root) else {
            return true;
        };

        let hidden = rel_path.components().any(|component| match component {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        });
        if hidden {
            return true;
        }

        ignore_patterns.iter().any(|pattern| {
            let pattern = Path::new(pattern);
            rel_path.starts_with(pattern)
                || rel_path
                    .components()
                    .any(|c| c.as_os_str() == pattern.as_os_str())
        })
    }

    /// Get the (canonical) root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Vec<String> {
        vec!["node_modules".to_string(), "dist".to_string()]
    }

    #[test]
    fn test_should_ignore_configured_dirs() {
        let root = PathBuf::from("/project");

        for ignored in [
            "/project/node_modules/pkg/index.js",
            "/project/dist/index.html",
            "/project/js/node_modules/x.js",
        ] {
            assert!(
                FileWatcher::should_ignore(Path::new(ignored), &root, &patterns()),
                "{ignored} should be ignored"
            );
        }

        for watched in ["/project/index.html", "/project/css/style.css", "/project/distant.js"] {
            assert!(
                !FileWatcher::should_ignore(Path::new(watched), &root, &patterns()),
                "{watched} should be watched"
            );
        }
    }

    #[test]
    fn test_should_ignore_nested_pattern() {
        let root = PathBuf::from("/project");
        let patterns = vec!["build/site".to_string()];

        assert!(FileWatcher::should_ignore(
            Path::new("/project/build/site/index.html"),
            &root,
            &patterns
        ));
        assert!(!FileWatcher::should_ignore(
            Path::new("/project/build/other.html"),
            &root,
            &patterns
        ));
    }

    #[test]
    fn test_should_ignore_hidden_files() {
        let root = PathBuf::from("/project");

        assert!(FileWatcher::should_ignore(Path::new("/project/.git/index"), &root, &[]));
        assert!(FileWatcher::should_ignore(Path::new("/project/.index.html.swp"), &root, &[]));
        assert!(FileWatcher::should_ignore(Path::new("/project/css/.cache/a.css"), &root, &[]));
    }

    #[test]
    fn test_should_ignore_outside_root() {
        let root = PathBuf::from("/project");
        assert!(FileWatcher::should_ignore(Path::new("/other/file.js"), &root, &[]));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = FileWatcher::new(&temp.path().join("missing"), patterns());
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
