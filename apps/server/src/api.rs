//! REST API for reading and changing the alert config.
//!
//! - `GET  /api/config` current config
//! - `POST /api/config` replace config
//! - `GET  /api/status` last price and monitor counters
//! - `GET  /health`
//!
//! With a static directory configured, `/static/*` and any other unmatched
//! path are served from it, so `/` returns its `index.html`.

use crate::error::{ApiError, ApiResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use monitor_core::ConfigPayload;
use monitor_engine::ConfigPort;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Status response for `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Last observed price, 0 until the first successful fetch.
    pub current_price: f64,
    /// Whether an alert already fired for the current streak.
    pub armed: bool,
    pub checks: u64,
    pub feed_failures: u64,
    pub alerts_sent: u64,
    pub uptime_secs: u64,
}

/// Build the API router, optionally serving the config page from `static_dir`.
pub fn create_router(port: ConfigPort, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/config", get(get_config).post(update_config))
        .route("/api/status", get(get_status));

    if let Some(dir) = static_dir {
        router = router
            .nest_service("/static", ServeDir::new(dir))
            .fallback_service(ServeDir::new(dir));
    }

    router.layer(cors).with_state(port)
}

/// Bind and serve the API in the background.
pub async fn start_api_server(
    port: ConfigPort,
    listen_port: u16,
    static_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(dir) = static_dir {
        if !dir.is_dir() {
            warn!("Static directory {} not found, config page disabled", dir.display());
        }
    }
    let app = create_router(port, static_dir);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], listen_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://localhost:{}", listen_port);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_config(State(port): State<ConfigPort>) -> Json<ConfigPayload> {
    Json(ConfigPayload::from(&port.query()))
}

async fn update_config(
    State(port): State<ConfigPort>,
    payload: Result<Json<ConfigPayload>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if let Err(e) = port.apply(payload) {
        warn!(error = %e, "Rejected config update");
        return Err(e.into());
    }

    Ok(Json(json!({ "message": "Config updated successfully" })))
}

async fn get_status(State(port): State<ConfigPort>) -> Json<StatusResponse> {
    let stats = port.stats();
    Json(StatusResponse {
        current_price: port.current_price(),
        armed: port.is_armed(),
        checks: stats.checks,
        feed_failures: stats.feed_failures,
        alerts_sent: stats.alerts_sent,
        uptime_secs: stats.uptime_secs,
    })
}
