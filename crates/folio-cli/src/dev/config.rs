//! Development server configuration.
//!
//! Resolves the project-relative [`FolioConfig`] into absolute paths and the
//! values the server, watcher and reload handler need.

use crate::commands::utils::resolve_path;
use crate::config::FolioConfig;
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Development server configuration.
#[derive(Debug, Clone)]
pub struct DevConfig {
    /// Directory served and watched
    pub root: PathBuf,
    /// Build output directory, never watched
    pub build_dir: PathBuf,
    pub host: String,
    pub port: u16,
    /// Open the browser after startup
    pub open: bool,
    /// Watch files and inject the reload client
    pub live_reload: bool,
    /// Minimum time between two reloads
    pub debounce: Duration,
    /// Serve the root document for unknown paths
    pub spa_fallback: bool,
    /// Path components the watcher skips
    pub watch_ignore: Vec<String>,
    /// File served for `/`
    pub root_document: String,
}

impl DevConfig {
    /// Build the dev configuration for a project rooted at `project_root`.
    pub fn from_config(config: &FolioConfig, project_root: &Path) -> Self {
        let root = resolve_path(&config.source_dir, project_root);
        let build_dir = resolve_path(&config.build_dir, project_root);

        let mut watch_ignore = config.watch_ignore.clone();
        if let Ok(relative) = build_dir.strip_prefix(&root) {
            let relative = relative.to_string_lossy().into_owned();
            if !relative.is_empty() && !watch_ignore.contains(&relative) {
                watch_ignore.push(relative);
            }
        }

        Self {
            root,
            build_dir,
            host: config.host.clone(),
            port: config.port,
            open: config.open,
            live_reload: config.live_reload,
            debounce: Duration::from_millis(config.debounce_ms),
            spa_fallback: config.spa_fallback,
            watch_ignore,
            root_document: config.root_document.clone(),
        }
    }

    /// URL shown to the user and opened in the browser.
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Absolute path of the root document.
    pub fn root_document_path(&self) -> PathBuf {
        self.root.join(&self.root_document)
    }

    /// Check that there is something to serve before binding.
    ///
    /// # Errors
    ///
    /// [`CliError::FileNotFound`] when the served directory or the root
    /// document is missing.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(CliError::FileNotFound(self.root.clone()));
        }

        let document = self.root_document_path();
        if !document.is_file() {
            return Err(CliError::FileNotFound(document));
        }

        Ok(())
    }
}
