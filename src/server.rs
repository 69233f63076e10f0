use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api::{self, MessageResponse};
use crate::config::{AppConfig, ServerConfig, StorageConfig, StorageProvider};
use crate::persistence::{FileStore, MemoryStore, NoteStore};
use crate::service::NoteService;

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let store = build_store(&config.storage);
    info!(
        name: "store.config.loaded",
        provider = store.provider_name(),
        path = %config.storage.path.display(),
        "Note store configured"
    );

    let state = AppState::new(NoteService::new(store));
    let app = build_app(state, &config.server);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

/// Select the store provider named by the configuration.
pub fn build_store(config: &StorageConfig) -> Arc<dyn NoteStore> {
    match config.provider {
        StorageProvider::File => Arc::new(FileStore::new(&config.path)),
        StorageProvider::Memory => Arc::new(MemoryStore::new()),
    }
}

/// Build the full application router with its middleware stack.
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let timeout = config.request_timeout();

    Router::new()
        .route("/health", get(health))
        .nest("/notes", api::build_router())
        .nest("/api/notes", api::build_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.body_limit_bytes))
                // A timed-out handler is dropped as is; a save it already
                // completed is not rolled back.
                .layer(axum::middleware::from_fn(
                    move |req: Request, next: Next| async move {
                        match tokio::time::timeout(timeout, next.run(req)).await {
                            Ok(res) => res,
                            Err(_) => (
                                StatusCode::REQUEST_TIMEOUT,
                                Json(MessageResponse::new("Request timed out")),
                            )
                                .into_response(),
                        }
                    },
                )),
        )
        .with_state(state)
}

/// GET /health - Liveness probe; does not touch the store.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "store": state.notes.provider_name(),
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down...");
}
