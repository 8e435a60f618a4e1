//! Embedded HTTP server exposing the content catalog.
//!
//! Serves a health endpoint and the GraphQL-shaped JSON API on
//! localhost. The catalog is immutable once loaded, so state is a
//! plain `Arc` with no interior locking.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::content::ContentCatalog;

pub mod graphql;

pub use graphql::{operation_name, resolve, GraphQLRequest};

/// Server state shared across requests.
pub struct AppState {
    pub catalog: ContentCatalog,
}

/// API server handle for managing the server lifecycle.
pub struct ApiServer {
    /// Port the server is listening on.
    pub port: u16,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Get the base URL for this server.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the server gracefully.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn health(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "pantheons": state.catalog.pantheons().len(),
        "deities": state.catalog.deities().len(),
        "stories": state.catalog.stories().len(),
    }))
}

/// Start the API server on the given address (e.g. `127.0.0.1:4000`;
/// port 0 picks a free port).
///
/// Returns an ApiServer handle that reports the bound port and stops
/// the server on request.
pub async fn start_server(
    catalog: ContentCatalog,
    bind_addr: &str,
) -> Result<ApiServer, Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState { catalog });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/graphql", get(graphql::describe).post(graphql::execute))
        .layer(cors)
        .with_state(state);

    let listener = TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    let port = addr.port();

    log::info!("API server started on http://{}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("API server shutting down");
            })
            .await
            .ok();
    });

    Ok(ApiServer {
        port,
        shutdown_tx: Some(shutdown_tx),
    })
}
