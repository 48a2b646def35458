//! Error types for the build pipeline.
//!
//! [`BuildError`] is returned only for failures that abort a whole run.
//! Per-file problems are reported as [`TransformError`] values inside a
//! [`crate::FileOutcome`] and never stop the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The build directory could not be removed or recreated
    #[error("Failed to prepare build directory {}: {source}", .path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build directory would delete the sources it is built from
    #[error("Refusing to use {} as build directory: it contains the source directory", .0.display())]
    UnsafeBuildDir(PathBuf),

    /// A source directory exists but could not be listed
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output subdirectory could not be created
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be written
    #[error("Failed to write build manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be serialized or parsed
    #[error("Invalid build manifest: {0}")]
    ManifestFormat(#[from] serde_json::Error),
}

/// Result alias for fatal build errors.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Why a single asset could not be transformed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransformError {
    #[error("file is not valid UTF-8")]
    InvalidUtf8,

    #[error("markup parse error: {0}")]
    Markup(#[from] MarkupError),

    #[error("stylesheet error: {0}")]
    Stylesheet(String),

    #[error("script error: {0}")]
    Script(String),
}

/// Markup tokenizer failures. Offsets are byte positions in the source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("unterminated declaration starting at byte {offset}")]
    UnterminatedDeclaration { offset: usize },

    #[error("unterminated <{name}> tag starting at byte {offset}")]
    UnterminatedTag { offset: usize, name: String },

    #[error("unterminated value for attribute '{name}' starting at byte {offset}")]
    UnterminatedAttribute { offset: usize, name: String },

    #[error("missing </{name}> for element starting at byte {offset}")]
    UnterminatedRawText { offset: usize, name: String },
}
