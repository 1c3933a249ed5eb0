//! HTTP gateway (Axum) for the screening API.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{records_handler, screen_handler};
pub use state::HandlerState;

use crate::scorer::RemoteScorer;
use crate::store::RecordStore;

/// Response header carrying a machine-readable request status.
pub const SCREENGATE_STATUS_HEADER: &str = "x-screengate-status";

/// Header value for a healthy liveness probe.
pub const SCREENGATE_STATUS_HEALTHY: &str = "healthy";

pub fn create_router_with_state<S, C>(state: HandlerState<S, C>) -> Router
where
    S: RecordStore + 'static,
    C: RemoteScorer + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route(
            "/api/v1/screenings",
            post(screen_handler).get(records_handler),
        )
        // Browser frontends call this API cross-origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SCREENGATE_STATUS_HEADER,
        HeaderValue::from_static(SCREENGATE_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}
