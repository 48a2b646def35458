//! # folio-build
//!
//! Build pipeline for a static website: reads the source tree, minifies
//! markup, stylesheets and scripts, copies static assets verbatim and emits
//! a build manifest.
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio_build::SiteBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = SiteBuilder::new(".", "dist").build()?;
//!
//! for file in report.failures() {
//!     eprintln!("{} failed", file.source.display());
//! }
//! # Ok(()) }
//! ```
//!
//! ## Stages
//!
//! A build runs the stages in a fixed order:
//!
//! ```text
//! clean → static assets → markup → stylesheets → scripts → manifest
//! ```
//!
//! Only `clean` and the manifest write are fatal. Every other failure is
//! recorded per file in the [`BuildReport`] and the run continues. The
//! script stage writes the original source when minification fails.

pub mod asset;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod report;
pub mod transform;

pub use asset::{discover, Asset, AssetKind, STATIC_EXTENSIONS};
pub use error::{BuildError, MarkupError, Result, TransformError};
pub use manifest::{BuildManifest, BUILD_TOOL, MANIFEST_FILE};
pub use pipeline::{SiteBuilder, SCRIPT_DIR, STYLESHEET_DIR};
pub use report::{savings_percent, BuildReport, FileOutcome, FileReport, Stage};
pub use transform::{
    scan_elements, FailurePolicy, MarkupElement, MarkupMinifier, MarkupOptions, ScriptMinifier,
    StylesheetMinifier, Transform,
};
