//! Folio CLI - build a static website and serve it with live reload.
//!
//! This crate is the command-line front end of the [`folio_build`] pipeline
//! and hosts the development server.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status lines, spinners and the build summary
//! - [`cli`] - Argument parsing
//! - [`config`] - `folio.config.json` loading (CLI > Env > File > Defaults)
//! - [`dev`] - Development server: routing, watcher, debounce and reload
//! - [`commands`] - One module per subcommand
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
