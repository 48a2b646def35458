use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_port;

/// Available Folio subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the site for production
    ///
    /// Clears the build directory, copies static assets, minifies HTML, CSS
    /// and JavaScript, and writes build-info.json.
    Build(BuildArgs),

    /// Start the development server
    ///
    /// Serves the site sources directly and reloads connected browsers
    /// when HTML, CSS, JavaScript or JSON files change.
    Dev(DevArgs),

    /// Remove build output and log files
    Clean(CleanArgs),

    /// Show which key project files exist
    Status(StatusArgs),

    /// Show project information and available commands
    Info(InfoArgs),

    /// Validate the site sources
    ///
    /// Checks that required files exist, that every HTML page has a title,
    /// charset and viewport meta tags and alt text on images, and that
    /// stylesheets and scripts parse.
    Check(CheckArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Source directory
    ///
    /// Defaults to `sourceDir` from folio.config.json, or the project root.
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Build directory
    ///
    /// Removed and recreated on every build. Defaults to `buildDir` from
    /// folio.config.json, or `dist`.
    #[arg(short, long, value_name = "DIR")]
    pub build: Option<PathBuf>,

    /// Only clear the build directory, don't build
    #[arg(long)]
    pub clean_only: bool,

    /// Path to folio.config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the dev command
#[derive(Args, Debug, Default)]
pub struct DevArgs {
    /// Host to bind
    #[arg(short = 'H', long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    ///
    /// The server does not fall back to another port: if this one is taken,
    /// the command fails.
    #[arg(short, long, value_parser = parse_port, value_name = "PORT")]
    pub port: Option<u16>,

    /// Serve files without watching or reloading
    #[arg(long)]
    pub no_reload: bool,

    /// Don't open the browser on start
    #[arg(long)]
    pub no_browser: bool,

    /// Path to folio.config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the clean command
#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the info command
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    /// Print the JSON schema of folio.config.json to stdout instead
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}
