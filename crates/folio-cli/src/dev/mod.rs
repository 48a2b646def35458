//! Development server module.
//!
//! Serves the site sources directly and reloads connected browsers:
//! - Static file routing with root-document fallback
//! - Reload notifications via Server-Sent Events
//! - File watching through notify
//! - A debounce gate so a burst of writes yields one reload

pub mod config;
pub mod debounce;
pub mod reload;
pub mod server;
pub mod state;
pub mod watcher;

// Re-exports
pub use config::DevConfig;
pub use debounce::DebounceGate;
pub use reload::{ReloadHandler, WATCHED_EXTENSIONS};
pub use server::{build_router, DevServer, RELOAD_SCRIPT_PATH, SSE_PATH};
pub use state::{ClientRegistry, DevServerState, SharedState};
pub use watcher::{FileWatcher, WatchEvent, WatchKind};

use serde::{Deserialize, Serialize};

/// Messages pushed to connected browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReloadEvent {
    /// Sent once when a client subscribes
    Connected { id: usize },

    /// A watched file changed; the page should reload
    Reload { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_event_wire_format() {
        let json = serde_json::to_string(&ReloadEvent::Reload {
            path: "css/style.css".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"reload","path":"css/style.css"}"#);

        let json = serde_json::to_string(&ReloadEvent::Connected { id: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"connected","id":3}"#);
    }
}
