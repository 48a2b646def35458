//! Development server command implementation.
//!
//! Orchestrates the dev server lifecycle:
//! - Configuration and root document check
//! - Binding the listener (fatal on failure, no port fallback)
//! - File watching with debounced reloads
//! - Graceful shutdown on Ctrl+C

use crate::cli::DevArgs;
use crate::commands::utils;
use crate::config::{ConfigOverrides, FolioConfig};
use crate::dev::{
    DevConfig, DevServer, DevServerState, FileWatcher, ReloadHandler, SharedState, WatchEvent,
};
use crate::error::{CliError, Result};
use crate::ui;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};

/// Delay before the browser is pointed at the server.
const BROWSER_DELAY: Duration = Duration::from_secs(1);

/// How long in-flight requests get to finish after Ctrl+C.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Why the main loop ended.
enum Shutdown {
    Interrupted,
    ServerExited(std::result::Result<Result<()>, JoinError>),
}

/// Execute the dev command.
///
/// # Process Flow
///
/// 1. Load configuration and check the root document exists
/// 2. Bind the listener and start serving in a background task
/// 3. Open the browser after a short delay
/// 4. Watch the site directory (unless `--no-reload`)
/// 5. Main event loop:
///    - Debounce changes and broadcast reloads
///    - Handle Ctrl+C for graceful shutdown
///
/// # Errors
///
/// Returns errors for invalid configuration, a missing root document, a
/// port that cannot be bound, or a watcher that cannot be started.
pub async fn execute(args: DevArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;
    let folio = FolioConfig::load(&ConfigOverrides::from(&args), &root, args.config.as_deref())?;
    let config = DevConfig::from_config(&folio, &root);
    config.validate()?;

    let state: SharedState = Arc::new(DevServerState::new(&config));
    let server = DevServer::bind(&config, state.clone()).await?;

    let (watcher, mut change_rx) = if config.live_reload {
        let (watcher, rx) = FileWatcher::new(&config.root, config.watch_ignore.clone())?;
        (Some(watcher), Some(rx))
    } else {
        (None, None)
    };
    let handler = ReloadHandler::new(config.debounce);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server_handle: JoinHandle<Result<()>> = tokio::spawn(server.serve(async move {
        let _ = shutdown_rx.await;
    }));

    let url = config.server_url();
    ui::success(&format!("Development server running at {}", url));
    ui::info(&format!("Serving {}", config.root.display()));
    match &watcher {
        Some(watcher) => ui::info(&format!(
            "Watching for changes in {} (debounce {}ms)",
            watcher.root().display(),
            config.debounce.as_millis()
        )),
        None => ui::info("Live reload disabled"),
    }

    if config.open {
        tokio::spawn(async move {
            tokio::time::sleep(BROWSER_DELAY).await;
            open_browser(&url);
        });
    }

    ui::info("Press Ctrl+C to stop");

    let outcome = loop {
        tokio::select! {
            change = next_change(&mut change_rx) => match (change, &watcher) {
                (Some(event), Some(watcher)) => handle_change(&event, watcher.root(), &handler, &state),
                _ => {
                    ui::warning("File watcher stopped, live reload disabled");
                    change_rx = None;
                }
            },

            interrupt = signal::ctrl_c() => {
                if let Err(e) = interrupt {
                    tracing::warn!("Failed to listen for Ctrl+C: {}", e);
                }
                break Shutdown::Interrupted;
            }

            result = &mut server_handle => break Shutdown::ServerExited(result),
        }
    };

    // Release the OS watch before waiting on the server
    drop(watcher);

    match outcome {
        Shutdown::Interrupted => {
            ui::info("Shutting down development server...");
            state.disconnect_all();
            let _ = shutdown_tx.send(());

            match tokio::time::timeout(SHUTDOWN_TIMEOUT, server_handle).await {
                Ok(joined) => server_result(joined)?,
                Err(_) => ui::warning("Server did not stop in time, exiting anyway"),
            }

            ui::success("Development server stopped");
            Ok(())
        }
        Shutdown::ServerExited(joined) => {
            server_result(joined)?;
            Err(CliError::Server("Server stopped unexpectedly".to_string()))
        }
    }
}

/// Next watch event, or never when watching is off.
async fn next_change(rx: &mut Option<mpsc::Receiver<WatchEvent>>) -> Option<WatchEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn handle_change(event: &WatchEvent, root: &Path, handler: &ReloadHandler, state: &SharedState) {
    let shown = event
        .path
        .strip_prefix(root)
        .unwrap_or(&event.path)
        .display()
        .to_string();

    if handler.handle(event, &shown, state) {
        ui::info(&format!("{} changed, reloading", shown));
    }
}

fn server_result(joined: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    joined.map_err(|e| CliError::Server(format!("Server task failed: {}", e)))?
}

/// Open the server URL in the default browser.
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Windows: `start`
/// - Linux: `xdg-open`
fn open_browser(url: &str) {
    use std::process::Command;

    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => tracing::debug!("Opened browser at {}", url),
        Err(e) => ui::warning(&format!("Failed to open browser: {}", e)),
    }
}
