//! Logging setup for the Folio CLI.
//!
//! Logging uses the `tracing` ecosystem. The build pipeline logs every stage
//! at `info` and every file at `debug`, so `--verbose` shows per-file sizes.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Starting build");
//! debug!("Processing file: {}", "index.html");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "folio=debug,folio_build=debug,folio_cli=debug";
const QUIET_FILTER: &str = "folio=error,folio_build=error,folio_cli=error";
const DEFAULT_FILTER: &str = "folio=info,folio_build=info,folio_cli=info";

/// Initialize the tracing subscriber.
///
/// Call once at the start of the program, before any logging occurs.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: DEBUG for folio crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG` environment variable
/// 4. Default: INFO for folio crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = select_filter(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_enables_debug() {
        let filter = select_filter(true, false).to_string();
        assert!(filter.contains("folio_build=debug"));
        assert!(filter.contains("folio_cli=debug"));
    }

    #[test]
    fn test_quiet_filter_is_errors_only() {
        let filter = select_filter(false, true).to_string();
        assert!(filter.contains("folio_build=error"));
        assert!(!filter.contains("info"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
