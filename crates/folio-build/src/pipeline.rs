//! The build driver.
//!
//! [`SiteBuilder`] runs every stage over a flat source layout:
//!
//! ```text
//! source/*.html        → build/*.html        (minified, skipped on failure)
//! source/<static>      → build/<static>      (copied)
//! source/css/*.css     → build/css/*.css     (minified, skipped on failure)
//! source/js/*.js       → build/js/*.js       (minified, original on failure)
//!                        build/build-info.json
//! ```
//!
//! Files are processed one at a time in sorted path order, so two runs over
//! unchanged sources write identical artifacts.

use crate::asset::{discover, AssetKind};
use crate::error::{BuildError, Result, TransformError};
use crate::manifest::BuildManifest;
use crate::report::{savings_percent, BuildReport, FileOutcome, Stage};
use crate::transform::{
    FailurePolicy, MarkupMinifier, MarkupOptions, ScriptMinifier, StylesheetMinifier, Transform,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Stylesheet subdirectory, relative to the source and build directories.
pub const STYLESHEET_DIR: &str = "css";

/// Script subdirectory, relative to the source and build directories.
pub const SCRIPT_DIR: &str = "js";

/// Builds a site from `source_dir` into `build_dir`.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    source_dir: PathBuf,
    build_dir: PathBuf,
    markup: MarkupMinifier,
    stylesheet: StylesheetMinifier,
    script: ScriptMinifier,
}

impl SiteBuilder {
    pub fn new(source_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            markup: MarkupMinifier::new(),
            stylesheet: StylesheetMinifier::new(),
            script: ScriptMinifier::new(),
        }
    }

    pub fn with_markup_options(mut self, options: MarkupOptions) -> Self {
        self.markup = MarkupMinifier::with_options(options);
        self
    }

    pub fn with_script_mangle(mut self, mangle: bool) -> Self {
        self.script = self.script.with_mangle(mangle);
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Run every stage and return what happened to each file.
    ///
    /// Only [`clean`](Self::clean), unreadable source directories and the
    /// manifest write return an error. Per-file problems end up in the
    /// report.
    pub fn build(&self) -> Result<BuildReport> {
        tracing::info!(
            "Building {} into {}",
            self.source_dir.display(),
            self.build_dir.display()
        );

        self.clean()?;

        let mut report = BuildReport::new();
        self.copy_static_assets(&mut report)?;
        self.minify_markup(&mut report)?;
        self.minify_stylesheets(&mut report)?;
        self.minify_scripts(&mut report)?;
        report.manifest = Some(self.write_manifest()?);

        tracing::info!(
            "Build finished: {} files written, {} failed, {} unminified",
            report.written(),
            report.failures().count(),
            report.fallbacks().count()
        );

        Ok(report)
    }

    /// Remove the build directory if present and recreate it empty.
    pub fn clean(&self) -> Result<()> {
        self.check_build_dir()?;

        let path = &self.build_dir;
        if path.exists() {
            tracing::debug!("Removing {}", path.display());
            fs::remove_dir_all(path).map_err(|source| BuildError::Clean {
                path: path.clone(),
                source,
            })?;
        }

        fs::create_dir_all(path).map_err(|source| BuildError::Clean {
            path: path.clone(),
            source,
        })
    }

    /// Copy static assets directly under the source directory byte-for-byte.
    pub fn copy_static_assets(&self, report: &mut BuildReport) -> Result<()> {
        let files = self.discover(&self.source_dir, AssetKind::Static)?;
        tracing::info!("Copying {} static assets", files.len());

        for source in files {
            let Some(name) = source.file_name() else {
                continue;
            };
            let dest = self.build_dir.join(name);

            match fs::copy(&source, &dest) {
                Ok(bytes) => {
                    tracing::debug!("Copied {} ({} bytes)", source.display(), bytes);
                    report.push(Stage::Static, &source, Some(dest), FileOutcome::Copied { bytes });
                }
                Err(e) => {
                    tracing::warn!("Failed to copy {}: {}", source.display(), e);
                    report.push(
                        Stage::Static,
                        &source,
                        None,
                        FileOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        Ok(())
    }

    /// Minify every `*.html` directly under the source directory.
    pub fn minify_markup(&self, report: &mut BuildReport) -> Result<()> {
        self.run_stage(
            Stage::Markup,
            &self.source_dir,
            &self.build_dir,
            &self.markup,
            FailurePolicy::Skip,
            report,
        )
    }

    /// Minify `css/*.css`. Does nothing when the source has no `css` directory.
    pub fn minify_stylesheets(&self, report: &mut BuildReport) -> Result<()> {
        self.run_subdir_stage(
            Stage::Stylesheet,
            STYLESHEET_DIR,
            &self.stylesheet,
            FailurePolicy::Skip,
            report,
        )
    }

    /// Minify `js/*.js`. A script that fails to minify is written unchanged.
    pub fn minify_scripts(&self, report: &mut BuildReport) -> Result<()> {
        self.run_subdir_stage(
            Stage::Script,
            SCRIPT_DIR,
            &self.script,
            FailurePolicy::KeepOriginal,
            report,
        )
    }

    /// Write `build-info.json` into the build directory.
    pub fn write_manifest(&self) -> Result<BuildManifest> {
        let manifest = BuildManifest::now();
        manifest.write_to(&self.build_dir)?;
        tracing::debug!("Wrote manifest ({})", manifest.build_time);
        Ok(manifest)
    }

    fn check_build_dir(&self) -> Result<()> {
        let (Ok(source), Ok(build)) = (
            self.source_dir.canonicalize(),
            self.build_dir.canonicalize(),
        ) else {
            return Ok(());
        };

        if source.starts_with(&build) {
            return Err(BuildError::UnsafeBuildDir(self.build_dir.clone()));
        }
        Ok(())
    }

    fn discover(&self, dir: &Path, kind: AssetKind) -> Result<Vec<PathBuf>> {
        discover(dir, kind).map_err(|source| BuildError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn run_subdir_stage(
        &self,
        stage: Stage,
        subdir: &str,
        transform: &dyn Transform,
        policy: FailurePolicy,
        report: &mut BuildReport,
    ) -> Result<()> {
        let source_dir = self.source_dir.join(subdir);
        if !source_dir.is_dir() {
            tracing::debug!("No {} directory, skipping {}", subdir, transform.name());
            return Ok(());
        }

        let dest_dir = self.build_dir.join(subdir);
        fs::create_dir_all(&dest_dir).map_err(|source| BuildError::CreateDir {
            path: dest_dir.clone(),
            source,
        })?;

        self.run_stage(stage, &source_dir, &dest_dir, transform, policy, report)
    }

    fn run_stage(
        &self,
        stage: Stage,
        source_dir: &Path,
        dest_dir: &Path,
        transform: &dyn Transform,
        policy: FailurePolicy,
        report: &mut BuildReport,
    ) -> Result<()> {
        let files = self.discover(source_dir, stage_kind(stage))?;
        tracing::info!("Minifying {} {} files", files.len(), transform.name());

        for source in files {
            let Some(name) = source.file_name() else {
                continue;
            };
            let dest = dest_dir.join(name);
            let (output, outcome) = process_file(&source, &dest, transform, policy);
            report.push(stage, &source, output, outcome);
        }

        Ok(())
    }
}

fn stage_kind(stage: Stage) -> AssetKind {
    match stage {
        Stage::Static => AssetKind::Static,
        Stage::Markup => AssetKind::Markup,
        Stage::Stylesheet => AssetKind::Stylesheet,
        Stage::Script => AssetKind::Script,
    }
}

fn process_file(
    source: &Path,
    dest: &Path,
    transform: &dyn Transform,
    policy: FailurePolicy,
) -> (Option<PathBuf>, FileOutcome) {
    let bytes = match fs::read(source) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", source.display(), e);
            return (
                None,
                FileOutcome::Failed {
                    reason: e.to_string(),
                },
            );
        }
    };

    let result = std::str::from_utf8(&bytes)
        .map_err(|_| TransformError::InvalidUtf8)
        .and_then(|text| transform.transform(source, text));

    match result {
        Ok(minified) => {
            if let Err(e) = fs::write(dest, &minified) {
                tracing::warn!("Failed to write {}: {}", dest.display(), e);
                return (
                    None,
                    FileOutcome::Failed {
                        reason: e.to_string(),
                    },
                );
            }

            let original = bytes.len() as u64;
            let minified = minified.len() as u64;
            tracing::debug!(
                "{}: {} -> {} bytes ({:.1}% saved)",
                source.display(),
                original,
                minified,
                savings_percent(original, minified)
            );
            (
                Some(dest.to_path_buf()),
                FileOutcome::Minified { original, minified },
            )
        }
        Err(err) => match policy {
            FailurePolicy::Skip => {
                tracing::warn!("Skipping {}: {}", source.display(), err);
                (
                    None,
                    FileOutcome::Failed {
                        reason: err.to_string(),
                    },
                )
            }
            FailurePolicy::KeepOriginal => {
                tracing::warn!(
                    "Could not minify {}, using original: {}",
                    source.display(),
                    err
                );
                match fs::write(dest, &bytes) {
                    Ok(()) => (
                        Some(dest.to_path_buf()),
                        FileOutcome::Fallback { reason: err },
                    ),
                    Err(e) => (
                        None,
                        FileOutcome::Failed {
                            reason: e.to_string(),
                        },
                    ),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_creates_missing_dir() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("dist");

        SiteBuilder::new(temp.path(), &build).clean().unwrap();
        assert!(build.is_dir());
    }

    #[test]
    fn test_clean_refuses_source_dir() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        fs::create_dir(&site).unwrap();

        let err = SiteBuilder::new(&site, temp.path()).clean().unwrap_err();
        assert!(matches!(err, BuildError::UnsafeBuildDir(_)));
        assert!(site.is_dir());
    }

    #[test]
    fn test_missing_stylesheet_dir_is_skipped() {
        let temp = TempDir::new().unwrap();
        let builder = SiteBuilder::new(temp.path(), temp.path().join("dist"));
        builder.clean().unwrap();

        let mut report = BuildReport::new();
        builder.minify_stylesheets(&mut report).unwrap();
        assert!(report.files.is_empty());
        assert!(!temp.path().join("dist").join(STYLESHEET_DIR).exists());
    }

    #[test]
    fn test_invalid_utf8_markup_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.html"), [0x3c, 0x70, 0x3e, 0xff, 0xfe]).unwrap();
        let builder = SiteBuilder::new(temp.path(), temp.path().join("dist"));
        builder.clean().unwrap();

        let mut report = BuildReport::new();
        builder.minify_markup(&mut report).unwrap();
        assert_eq!(report.failures().count(), 1);
        assert!(!temp.path().join("dist").join("bad.html").exists());
    }
}
