use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use costly_core::waitlist::{ServiceUnavailableResponse, RETRY_AFTER_SECONDS};

/// Static maintenance response (GET /503).
#[axum::debug_handler]
pub async fn service_unavailable() -> impl IntoResponse {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(header::RETRY_AFTER, RETRY_AFTER_SECONDS.to_string())],
        Json(ServiceUnavailableResponse::default()),
    )
}
