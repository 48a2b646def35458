//! Development server with live reload via Server-Sent Events.
//!
//! Serves files straight from the site directory. Unknown paths get the root
//! document (single-page-app fallback) unless that is turned off.

use crate::dev::{DevConfig, ReloadEvent, SharedState};
use crate::error::{CliError, Result};
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
    routing::get,
    Router,
};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};
use tower_http::cors::{Any, CorsLayer};

/// SSE endpoint the reload client subscribes to.
pub const SSE_PATH: &str = "/__folio_sse__";

/// Route serving the reload client script.
pub const RELOAD_SCRIPT_PATH: &str = "/__folio_reload__.js";

const RELOAD_SCRIPT: &str = include_str!("../../assets/dev/reload-client.js");

const HTML: &str = "text/html; charset=utf-8";

/// Development server bound to its listening socket.
pub struct DevServer {
    listener: TcpListener,
    router: Router,
}

impl DevServer {
    /// Bind the configured address.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Server`] if the address cannot be bound. There is
    /// no fallback to another port.
    pub async fn bind(config: &DevConfig, state: SharedState) -> Result<Self> {
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|e| {
                CliError::Server(format!(
                    "Failed to bind to {}:{}: {}",
                    config.host, config.port, e
                ))
            })?;

        Ok(Self {
            listener,
            router: build_router(state),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))
    }
}

/// Build the axum router with all routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route(SSE_PATH, get(handle_sse))
        .route(RELOAD_SCRIPT_PATH, get(handle_reload_script))
        .fallback(handle_request)
        .layer(
            // CORS: Allow all origins for dev
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Handle SSE connections for reload events.
async fn handle_sse(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let (id, rx) = state.register_client();
    tracing::debug!("Client {} connected via SSE", id);

    let greeting = serde_json::to_string(&ReloadEvent::Connected { id })
        .unwrap_or_else(|_| "{}".to_string());

    let stream = tokio_stream::once(greeting)
        .chain(ReceiverStream::new(rx))
        .map(|data| Ok(Event::default().data(data)));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Serve the reload client script.
async fn handle_reload_script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        RELOAD_SCRIPT,
    )
}

/// Serve a file from the site directory, or fall back to the root document.
async fn handle_request(State(state): State<SharedState>, uri: Uri) -> Response {
    let raw = uri.path();

    if raw == "/" {
        return serve_root_document(&state, raw).await;
    }

    let decoded = decode_path(raw);
    let path = decoded.as_deref().unwrap_or(raw);

    if let Some(file) = decoded.as_deref().and_then(|p| resolve_file(state.root(), p)) {
        if file.is_file() {
            match tokio::fs::read(&file).await {
                Ok(content) => return file_response(&state, content_type(path), content),
                Err(e) => tracing::warn!("Failed to read {}: {}", file.display(), e),
            }
        }
    }

    if state.spa_fallback() {
        tracing::debug!("{} not found, serving {}", path, state.root_document());
        serve_root_document(&state, path).await
    } else {
        not_found(path)
    }
}

async fn serve_root_document(state: &SharedState, request_path: &str) -> Response {
    let document = state.root().join(state.root_document());
    match tokio::fs::read(&document).await {
        Ok(content) => file_response(state, HTML, content),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", document.display(), e);
            not_found(request_path)
        }
    }
}

fn file_response(state: &SharedState, content_type: &'static str, content: Vec<u8>) -> Response {
    let body = if state.live_reload() && content_type.starts_with("text/html") {
        inject_reload_script(&content)
    } else {
        content
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("File not found: {}", path),
    )
        .into_response()
}

/// Percent-decode a request path.
///
/// `None` when the result is not UTF-8 or contains a NUL byte.
fn decode_path(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }
    Some(decoded.into_owned())
}

/// Map a decoded request path onto `root`.
///
/// Returns `None` for anything that is not a plain relative path (`..`,
/// absolute or prefixed components, empty paths).
fn resolve_file(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));

    let mut components = relative.components().peekable();
    components.peek()?;
    if !components.all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }

    Some(root.join(relative))
}

/// Content type for a request path.
///
/// Everything under `css/` is a stylesheet and everything under `js/` a
/// script, whatever the extension says.
fn content_type(request_path: &str) -> &'static str {
    let relative = request_path.trim_start_matches('/');
    if relative.starts_with("css/") {
        return "text/css";
    }
    if relative.starts_with("js/") {
        return "application/javascript";
    }

    let extension = Path::new(relative)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "html" | "htm" => HTML,
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}

/// Inject the reload client before the closing `</body>` tag, or append it
/// when there is none.
fn inject_reload_script(content: &[u8]) -> Vec<u8> {
    let html = String::from_utf8_lossy(content);
    let script_tag = format!(r#"<script src="{}"></script>"#, RELOAD_SCRIPT_PATH);

    let mut result = String::with_capacity(html.len() + script_tag.len() + 1);
    match html.rfind("</body>") {
        Some(pos) => {
            result.push_str(&html[..pos]);
            result.push_str(&script_tag);
            result.push_str(&html[pos..]);
        }
        None => {
            result.push_str(&html);
            result.push('\n');
            result.push_str(&script_tag);
        }
    }
    result.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_reload_script_with_body() {
        let result = inject_reload_script(b"<html><body><h1>Test</h1></body></html>");
        let result = String::from_utf8(result).unwrap();

        assert_eq!(
            result,
            r#"<html><body><h1>Test</h1><script src="/__folio_reload__.js"></script></body></html>"#
        );
    }

    #[test]
    fn test_inject_reload_script_without_body() {
        let result = String::from_utf8(inject_reload_script(b"<h1>Test</h1>")).unwrap();
        assert!(result.starts_with("<h1>Test</h1>"));
        assert!(result.ends_with(r#"<script src="/__folio_reload__.js"></script>"#));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("/index.html"), HTML);
        assert_eq!(content_type("/css/style.css"), "text/css");
        assert_eq!(content_type("/css/theme.txt"), "text/css");
        assert_eq!(content_type("/js/main.js"), "application/javascript");
        assert_eq!(content_type("/js/data.json"), "application/javascript");
        assert_eq!(content_type("/logo.PNG"), "image/png");
        assert_eq!(content_type("/font.woff2"), "font/woff2");
        assert_eq!(content_type("/archive.tar"), "application/octet-stream");
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/my%20photo.png").as_deref(), Some("/my photo.png"));
        assert_eq!(decode_path("/caf%C3%A9.html").as_deref(), Some("/café.html"));
        assert_eq!(decode_path("/plain.css").as_deref(), Some("/plain.css"));
        assert_eq!(decode_path("/a%00b.html"), None);
        assert_eq!(decode_path("/%FF.html"), None);
    }

    #[test]
    fn test_encoded_traversal_is_rejected() {
        let root = Path::new("/site");
        let decoded = decode_path("/%2E%2E/etc/passwd").unwrap();
        assert_eq!(resolve_file(root, &decoded), None);
        let decoded = decode_path("/css/..%2F..%2Fsecret").unwrap();
        assert_eq!(resolve_file(root, &decoded), None);
    }

    #[test]
    fn test_resolve_file_rejects_traversal() {
        let root = Path::new("/site");

        assert_eq!(
            resolve_file(root, "/css/style.css"),
            Some(PathBuf::from("/site/css/style.css"))
        );
        assert_eq!(resolve_file(root, "/../etc/passwd"), None);
        assert_eq!(resolve_file(root, "/css/../../secret"), None);
        assert_eq!(resolve_file(root, "/"), None);
        assert_eq!(resolve_file(root, "//etc/passwd"), Some(PathBuf::from("/site/etc/passwd")));
    }
}
