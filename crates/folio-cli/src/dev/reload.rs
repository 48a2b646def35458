//! Turning watch events into reload signals.

use crate::dev::{DebounceGate, DevServerState, ReloadEvent, WatchEvent};
use std::path::Path;
use std::time::Duration;

/// Extensions whose changes reload the browser.
pub const WATCHED_EXTENSIONS: &[&str] = &["html", "css", "js", "json"];

/// Decides which watch events reload the browser.
///
/// Owns only the debounce gate: the watch subscription lives in
/// [`FileWatcher`](crate::dev::FileWatcher), the clients in
/// [`DevServerState`].
#[derive(Debug)]
pub struct ReloadHandler {
    gate: DebounceGate,
}

impl ReloadHandler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            gate: DebounceGate::new(debounce),
        }
    }

    /// True for files with a watched extension.
    pub fn is_watched(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                WATCHED_EXTENSIONS
                    .iter()
                    .any(|watched| ext.eq_ignore_ascii_case(watched))
            })
    }

    /// Filter and debounce. Directories and unwatched extensions never pass
    /// and never consume the window.
    pub fn accept(&self, event: &WatchEvent) -> bool {
        if event.path.is_dir() || !Self::is_watched(&event.path) {
            return false;
        }
        self.gate.try_accept(event.at)
    }

    /// Broadcast a reload for `event` if it is accepted.
    ///
    /// `shown` is how the changed path is shown to the user and sent to
    /// the clients. Returns whether a reload was sent.
    pub fn handle(&self, event: &WatchEvent, shown: &str, state: &DevServerState) -> bool {
        if !self.accept(event) {
            tracing::debug!("Ignoring change to {}", shown);
            return false;
        }

        let clients = state.broadcast(&ReloadEvent::Reload {
            path: shown.to_string(),
        });
        tracing::debug!("Reload for {} sent to {} client(s)", shown, clients);
        true
    }
}
