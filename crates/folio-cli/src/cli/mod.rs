//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `folio build` - Minify the site into the build directory
//! - `folio dev` - Serve the site with live reload
//! - `folio clean` - Remove build output and log files
//! - `folio status` - Show which key files exist
//! - `folio info` - Project and command overview
//! - `folio check` - Validate the site sources

mod commands;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, CleanArgs, Command, DevArgs, InfoArgs, StatusArgs};
pub use validation::parse_port;

/// Folio - build and serve a static website
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Build and serve a static website",
    long_about = "Folio minifies a static website (HTML, CSS, JavaScript) into a deployable\n\
                  build directory and serves the sources locally with live reload."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows per-file sizes and every skipped or unminified file.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
