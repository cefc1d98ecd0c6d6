use axum::{extract::State, Json};

use costly_core::waitlist::SequenceResponse;

use crate::handlers::AppError;
use crate::state::AppState;

/// Report how to realign the id sequence (POST /waitlist-fix-sequence).
///
/// Nothing is executed against the store; operators run the returned
/// statement by hand.
#[axum::debug_handler]
pub async fn fix_sequence(
    State(state): State<AppState>,
) -> Result<Json<SequenceResponse>, AppError> {
    let repo = state.waitlist_repo()?;
    let max_id = repo
        .max_id()
        .await
        .map_err(|err| {
            AppError::internal(format!("Failed to get max ID: {}", err.message()))
        })?
        .unwrap_or(0);

    let response = SequenceResponse::for_max_id(&state.waitlist_table, max_id);
    tracing::info!(max_id, next_id = response.next_id, "Sequence check");

    Ok(Json(response))
}
