//! Build command implementation.
//!
//! Runs the [`folio_build`] pipeline on a blocking thread and prints the
//! per-file summary.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::{ConfigOverrides, FolioConfig};
use crate::error::{CliError, Result};
use crate::ui;
use folio_build::SiteBuilder;
use std::time::Instant;

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load configuration (CLI > Env > File > Defaults)
/// 2. Clear the build directory (and stop there with `--clean-only`)
/// 3. Copy static assets, minify HTML, CSS and JavaScript
/// 4. Write build-info.json
/// 5. Display build summary
///
/// Per-file failures are listed in the summary and do not fail the command.
///
/// # Errors
///
/// Returns errors for invalid configuration, a missing source directory, a
/// build directory that cannot be cleared, or a failed manifest write.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let root = utils::project_root(args.cwd.as_deref())?;
    let config = FolioConfig::load(
        &ConfigOverrides::from(&args),
        &root,
        args.config.as_deref(),
    )?;

    let source_dir = utils::resolve_path(&config.source_dir, &root);
    let build_dir = utils::resolve_path(&config.build_dir, &root);
    if !source_dir.is_dir() {
        return Err(CliError::FileNotFound(source_dir));
    }

    let builder = SiteBuilder::new(&source_dir, &build_dir);

    if args.clean_only {
        tokio::task::spawn_blocking(move || builder.clean())
            .await
            .map_err(|e| CliError::Custom(format!("Clean task failed: {}", e)))??;
        ui::success(&format!("Cleaned {}", build_dir.display()));
        return Ok(());
    }

    let spinner = ui::Spinner::new("Building site...");
    let result = tokio::task::spawn_blocking(move || builder.build())
        .await
        .map_err(|e| CliError::Custom(format!("Build task failed: {}", e)))?;

    let report = match result {
        Ok(report) => {
            spinner.finish("Site built");
            report
        }
        Err(e) => {
            spinner.fail("Build failed");
            return Err(e.into());
        }
    };

    ui::print_build_summary(&report, &source_dir, start_time.elapsed());

    let failures = report.failures().count();
    let fallbacks = report.fallbacks().count();
    if fallbacks > 0 {
        ui::warning(&format!("{} script(s) written unminified", fallbacks));
    }
    if failures > 0 {
        ui::warning(&format!("{} file(s) could not be processed and were skipped", failures));
    } else {
        ui::success(&format!("Build output in {}", build_dir.display()));
    }

    Ok(())
}
