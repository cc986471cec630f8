//! Application builder: wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use gasdesk_client::ApiClient;
use gasdesk_core::config::AppConfig;
use gasdesk_core::error::AppError;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::WebState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: WebState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the web front until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        api = %config.api.base_url,
        environment = %config.server.environment,
        "Starting GasDesk web front..."
    );

    let client = ApiClient::new(&config.api)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = WebState::new(config, Arc::new(client));
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::configuration(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("GasDesk web front listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
