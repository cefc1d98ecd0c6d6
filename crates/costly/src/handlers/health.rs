//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (store configured and answering)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use costly_core::waitlist::ReadinessResponse;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Runs the same max-id read the counter uses. Returns 200 when it succeeds,
/// 503 when the store is missing or failing.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    let probe = match state.waitlist_repo() {
        Ok(repo) => repo.max_id().await.map(|_| ()),
        Err(err) => Err(err),
    };

    match probe {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                error: None,
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    ready: false,
                    error: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    }
}
