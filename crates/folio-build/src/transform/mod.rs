//! Per-file transformations applied by the pipeline.
//!
//! Each minifier implements [`Transform`]. The pipeline pairs a transform
//! with a [`FailurePolicy`] that decides what happens to a file whose
//! transformation fails.

mod markup;
mod script;
mod stylesheet;

pub use markup::{scan_elements, MarkupElement, MarkupMinifier, MarkupOptions};
pub use script::ScriptMinifier;
pub use stylesheet::StylesheetMinifier;

use crate::error::TransformError;
use std::path::Path;

/// A source-to-source transformation of one asset.
pub trait Transform {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Transform `source`, read from `path`.
    fn transform(&self, path: &Path, source: &str) -> Result<String, TransformError>;
}

/// What to do with a file whose transformation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Write nothing for the file and record a failure.
    Skip,
    /// Write the original bytes unchanged and record a warning.
    KeepOriginal,
}
