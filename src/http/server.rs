//! Auxiliary HTTP listener.
//!
//! A small health-check server bound to all interfaces on the
//! stage-derived port. The listener is bound before the serving task is
//! spawned, so a port conflict surfaces at startup and the server is
//! reachable as soon as [`serve`] returns.

use std::net::SocketAddr;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::{Settings, Stage};

/// Errors that can occur while starting the HTTP listener.
#[derive(Debug, Error)]
pub enum HttpServerError {
    #[error("Failed to bind HTTP listener: {0}")]
    Bind(#[source] std::io::Error),
}

/// Read-only values reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthState {
    stage: Stage,
    port: u16,
    release_tag: String,
}

impl HealthState {
    /// Creates health state from the process settings.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            stage: settings.stage,
            port: settings.port(),
            release_tag: settings.release_tag.clone(),
        }
    }
}

/// Handle to the running HTTP listener.
#[derive(Debug)]
pub struct HttpServerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl HttpServerHandle {
    /// Returns the address the listener is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signals the server to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.task.await;
    }
}

/// Builds the router served by the auxiliary listener.
pub fn router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `0.0.0.0:<port>` and serves the health router on a background task.
///
/// # Errors
///
/// Returns an error if the port is already bound.
pub async fn serve(port: u16, state: HealthState) -> Result<HttpServerHandle, HttpServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.map_err(HttpServerError::Bind)?;
    let local_addr = listener.local_addr().map_err(HttpServerError::Bind)?;

    info!("HTTP listener bound on {}", local_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let app = router(state);

    let task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;

        if let Err(e) = result {
            error!("HTTP server error: {}", e);
        }
        info!("HTTP server stopped");
    });

    Ok(HttpServerHandle {
        shutdown: shutdown_tx,
        task,
        local_addr,
    })
}

async fn root() -> &'static str {
    "OK"
}

/// Health report returned by `GET /health`.
#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    stage: Stage,
    port: u16,
    release_tag: String,
}

async fn health(State(state): State<HealthState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        stage: state.stage,
        port: state.port,
        release_tag: state.release_tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::path::PathBuf;
    use tower::util::ServiceExt;

    fn test_state(stage: Stage, release_tag: &str) -> HealthState {
        HealthState::new(&Settings {
            bot_token: "123:abc".to_owned(),
            api_id: 12345,
            api_hash: "abc123".to_owned(),
            stage,
            release_tag: release_tag.to_owned(),
            session_path: PathBuf::from("test.session"),
        })
    }

    #[tokio::test]
    async fn test_root_returns_ok() {
        let app = router(test_state(Stage::Dev, "Unknown"));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_health_reports_stage_and_port() {
        let app = router(test_state(Stage::Prod, "v1.2.3"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let report: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(report["status"], "ok");
        assert_eq!(report["stage"], "prod");
        assert_eq!(report["port"], 8080);
        assert_eq!(report["release_tag"], "v1.2.3");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = router(test_state(Stage::Dev, "Unknown"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serve_accepts_connections_after_return() {
        // Port 0 keeps the test independent of the stage mapping.
        let handle = serve(0, test_state(Stage::Dev, "Unknown")).await.unwrap();
        let addr = handle.local_addr();

        let stream = tokio::net::TcpStream::connect(addr).await;
        assert!(stream.is_ok());

        handle.shutdown().await;
    }
}
