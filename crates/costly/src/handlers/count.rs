use axum::{extract::State, Json};

use costly_core::waitlist::CountResponse;

use crate::handlers::AppError;
use crate::state::AppState;

/// Public signup counter (GET /waitlist-count).
///
/// Reports the highest id ever assigned rather than the number of live
/// rows, so deletes made by the cleanup never make the counter go down.
#[axum::debug_handler]
pub async fn waitlist_count(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let repo = state.waitlist_repo()?;
    let count = repo.max_id().await?.unwrap_or(0);

    tracing::debug!(count, "Waitlist count");
    Ok(Json(CountResponse { count }))
}
