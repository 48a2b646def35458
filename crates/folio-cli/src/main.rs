//! Folio CLI - build a static website and serve it with live reload.
//!
//! This is the main entry point. It parses arguments, initializes logging and
//! dispatches to the command implementations.

use clap::Parser;
use folio_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Dev(dev_args) => commands::dev_execute(dev_args).await,
        cli::Command::Clean(clean_args) => commands::clean_execute(clean_args).await,
        cli::Command::Status(status_args) => commands::status_execute(status_args).await,
        cli::Command::Info(info_args) => commands::info_execute(info_args).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
    };

    // Convert CLI errors to miette diagnostics for display
    result.map_err(error::cli_error_to_miette)
}
