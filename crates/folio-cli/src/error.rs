//! Error handling for the Folio CLI.
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain errors** (`ConfigError`, [`folio_build::BuildError`]) carry the details
//! - **Conversion** is automatic via `#[from]` attributes
//! - **Context helpers** ([`ResultExt`]) attach paths and hints
//!
//! Per-file build problems are not errors: they are reported in the
//! [`folio_build::BuildReport`] and the command still succeeds.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_root_document(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Create index.html in the site directory")
//! }
//! ```

mod diagnostic;

pub use diagnostic::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration errors (invalid file, bad values)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal build pipeline errors
    #[error("Build error: {0}")]
    Build(#[from] folio_build::BuildError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `folio check` found problems
    #[error("Site check failed with {0} error(s)")]
    CheckFailed(usize),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a folio.config.json file or omit --config", .0.display())]
    NotFound(PathBuf),

    /// The merged configuration could not be extracted
    #[error("Invalid configuration: {message}\n\nHint: Check folio.config.json syntax and FOLIO_* environment variables")]
    Invalid {
        /// Message from the configuration loader
        message: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a "not found" I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
