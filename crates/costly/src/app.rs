use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        cleanup::{analyze_waitlist, cleanup_waitlist},
        count::waitlist_count,
        health::{livez, readyz},
        join::join_waitlist,
        sequence::fix_sequence,
        unavailable::service_unavailable,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// `request_timeout` bounds the health probes only.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // The landing page posts signups from the browser.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let waitlist_routes = Router::new()
        .route("/waitlist-join", post(join_waitlist))
        .route(
            "/waitlist-cleanup",
            get(analyze_waitlist).post(cleanup_waitlist),
        )
        .route("/waitlist-count", get(waitlist_count))
        .route("/waitlist-fix-sequence", post(fix_sequence))
        .route("/503", get(service_unavailable))
        .layer(cors);

    // Waitlist handlers are never cut short: a cleanup batch must run to
    // completion and report every outcome. Store calls carry their own timeout.
    let health_routes = Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    Router::new()
        .merge(waitlist_routes)
        .merge(health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
