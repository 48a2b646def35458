//! Per-file outcomes and the per-run build report.

use crate::error::TransformError;
use crate::manifest::BuildManifest;
use std::path::{Path, PathBuf};

/// Pipeline stage that produced a [`FileReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Static,
    Markup,
    Stylesheet,
    Script,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Static => "static",
            Stage::Markup => "html",
            Stage::Stylesheet => "css",
            Stage::Script => "js",
        }
    }
}

/// What happened to a single source file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Transformed and written
    Minified { original: u64, minified: u64 },
    /// Copied byte-for-byte
    Copied { bytes: u64 },
    /// Transformation failed; the original content was written instead
    Fallback { reason: TransformError },
    /// Nothing was written for this file
    Failed { reason: String },
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FileOutcome::Fallback { .. })
    }
}

/// One entry of a [`BuildReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub stage: Stage,
    pub source: PathBuf,
    /// Destination path, if anything was written
    pub output: Option<PathBuf>,
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Size of what was written, when known.
    pub fn output_size(&self) -> Option<u64> {
        match self.outcome {
            FileOutcome::Minified { minified, .. } => Some(minified),
            FileOutcome::Copied { bytes } => Some(bytes),
            _ => None,
        }
    }
}

/// Everything a build run did, in processing order.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub files: Vec<FileReport>,
    /// Set once the manifest has been written
    pub manifest: Option<BuildManifest>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Stage, source: &Path, output: Option<PathBuf>, outcome: FileOutcome) {
        self.files.push(FileReport {
            stage,
            source: source.to_path_buf(),
            output,
            outcome,
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_failure())
    }

    pub fn fallbacks(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_fallback())
    }

    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |f| f.stage == stage)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Number of files that produced an artifact.
    pub fn written(&self) -> usize {
        self.files.iter().filter(|f| f.output.is_some()).count()
    }

    /// Bytes written over files with a known output size (minified and
    /// copied files).
    pub fn output_bytes(&self) -> u64 {
        self.files.iter().filter_map(FileReport::output_size).sum()
    }

    /// Total bytes before minification, over minified files only.
    pub fn total_original(&self) -> u64 {
        self.minified_sizes().map(|(original, _)| original).sum()
    }

    /// Total bytes after minification, over minified files only.
    pub fn total_minified(&self) -> u64 {
        self.minified_sizes().map(|(_, minified)| minified).sum()
    }

    fn minified_sizes(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.files.iter().filter_map(|f| match f.outcome {
            FileOutcome::Minified { original, minified } => Some((original, minified)),
            _ => None,
        })
    }
}

/// Percentage of `original` saved by shrinking it to `minified`.
///
/// An empty original reports 0.0. Growth yields a negative percentage.
pub fn savings_percent(original: u64, minified: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - minified as f64 / original as f64) * 100.0
}
