//! Command implementations for the Folio CLI.
//!
//! - [`build`] - Minify the site into the build directory
//! - [`dev`] - Development server with live reload
//! - [`clean`] - Remove build output and log files
//! - [`status`] - Key file presence
//! - [`info`] - Project overview and config schema
//! - [`check`] - Site source validation
//!
//! Each command is implemented in its own module and provides an `execute`
//! function that takes the parsed command arguments and returns a Result.

pub mod build;
pub mod check;
pub mod clean;
pub mod dev;
pub mod info;
pub mod status;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use clean::execute as clean_execute;
pub use dev::execute as dev_execute;
pub use info::execute as info_execute;
pub use status::execute as status_execute;
