//! Conversion of CLI errors into miette reports.

use crate::error::CliError;
use folio_build::BuildError;
use miette::Report;

/// Convert a [`CliError`] into a miette [`Report`] for display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::FileNotFound(path) => miette::miette!(
            help = "Run the command from the site directory or pass --cwd",
            "File not found: {}",
            path.display()
        ),
        CliError::CheckFailed(count) => miette::miette!(
            help = "Fix the errors listed above and run `folio check` again",
            "Site check failed with {} error(s)",
            count
        ),
        _ => miette::miette!("{}", err),
    }
}

fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::UnsafeBuildDir(path) => miette::miette!(
            help = "Choose a build directory that is not the source directory or one of its parents",
            "Refusing to clean {}",
            path.display()
        ),
        BuildError::Clean { path, source } => miette::miette!(
            help = "Check that no other process holds files in the build directory",
            "Failed to prepare build directory {}: {}",
            path.display(),
            source
        ),
        _ => miette::miette!("Build failed: {}", err),
    }
}
