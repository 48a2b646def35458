//! Info command implementation.

use crate::cli::InfoArgs;
use crate::config::{FolioConfig, CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;
use crate::ui;
use folio_build::{SCRIPT_DIR, STATIC_EXTENSIONS, STYLESHEET_DIR};

const COMMANDS: &[(&str, &str)] = &[
    ("build", "Minify the site into the build directory"),
    ("dev", "Serve the site with live reload"),
    ("clean", "Remove build output and log files"),
    ("status", "Show which key files exist"),
    ("check", "Validate the site sources"),
    ("info", "Show this overview (--schema prints the config schema)"),
];

/// Execute the info command.
///
/// With `--schema`, prints the JSON schema of the config file to stdout so
/// it can be redirected into a file.
pub async fn execute(args: InfoArgs) -> Result<()> {
    if args.schema {
        let schema = FolioConfig::json_schema()?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    ui::info(&format!("folio {}", env!("CARGO_PKG_VERSION")));
    eprintln!();
    eprintln!("Site layout:");
    eprintln!("  *.html              minified into the build directory");
    eprintln!("  {}/*.css           minified", STYLESHEET_DIR);
    eprintln!("  {}/*.js             minified (original kept on error)", SCRIPT_DIR);
    eprintln!("  {}", STATIC_EXTENSIONS.join(", "));
    eprintln!("                      copied unchanged");
    eprintln!();
    eprintln!("Commands:");
    for (name, about) in COMMANDS {
        eprintln!("  folio {:<8} {}", name, about);
    }
    eprintln!();
    eprintln!(
        "Configuration: {} and {}* environment variables",
        CONFIG_FILE, ENV_PREFIX
    );

    Ok(())
}
