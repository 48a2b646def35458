//! Shared state for the development server.
//!
//! Holds what the request handlers need to resolve files and the registry of
//! connected SSE clients. The registry uses parking_lot's RwLock; it is only
//! ever held for a map operation, never across an await.

use crate::dev::{DevConfig, ReloadEvent};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Messages buffered per client before further events are dropped for it.
const CLIENT_BUFFER: usize = 16;

/// Client connection tracker for Server-Sent Events.
pub type ClientRegistry = Arc<RwLock<HashMap<usize, mpsc::Sender<String>>>>;

/// Shared development server state.
pub struct DevServerState {
    /// Connected SSE clients
    clients: ClientRegistry,
    next_client_id: AtomicUsize,
    /// Directory files are served from
    root: PathBuf,
    root_document: String,
    spa_fallback: bool,
    live_reload: bool,
}

impl DevServerState {
    pub fn new(config: &DevConfig) -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            next_client_id: AtomicUsize::new(0),
            root: config.root.clone(),
            root_document: config.root_document.clone(),
            spa_fallback: config.spa_fallback,
            live_reload: config.live_reload,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_document(&self) -> &str {
        &self.root_document
    }

    pub fn spa_fallback(&self) -> bool {
        self.spa_fallback
    }

    pub fn live_reload(&self) -> bool {
        self.live_reload
    }

    /// Register a new SSE client.
    ///
    /// # Returns
    ///
    /// Client ID and receiver for serialized events
    pub fn register_client(&self) -> (usize, mpsc::Receiver<String>) {
        let id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(CLIENT_BUFFER);
        self.clients.write().insert(id, tx);
        (id, rx)
    }

    /// Unregister an SSE client.
    pub fn unregister_client(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    /// Send `event` to every connected client.
    ///
    /// Clients whose stream has gone away are removed. A client that has not
    /// drained its buffer misses this event but stays registered.
    ///
    /// # Returns
    ///
    /// Number of clients the event was queued for
    pub fn broadcast(&self, event: &ReloadEvent) -> usize {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize {:?}: {}", event, e);
                return 0;
            }
        };

        let clients = self.clients.read().clone();
        let mut delivered = 0;
        let mut closed = Vec::new();

        for (id, tx) in clients {
            match tx.try_send(json.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::debug!("Client {} is not keeping up, skipping event", id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => closed.push(id),
            }
        }

        for id in closed {
            tracing::debug!("Client {} disconnected", id);
            self.unregister_client(id);
        }

        delivered
    }

    /// Get number of connected clients.
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }

    /// Drop every client sender so their SSE streams end.
    pub fn disconnect_all(&self) {
        self.clients.write().clear();
    }
}

/// Shared state handle for passing around the application.
pub type SharedState = Arc<DevServerState>;
