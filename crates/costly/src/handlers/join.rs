//! `POST /waitlist-join` - add an email to the waitlist.

use axum::{body::Bytes, extract::State, Json};

use costly_core::storage::WaitlistRepository;
use costly_core::waitlist::{parse_email, JoinRequest, JoinResponse};

use crate::handlers::AppError;
use crate::state::AppState;

/// User-facing message for an email that is already stored.
pub const ALREADY_ON_WAITLIST: &str = "This email is already on the waitlist!";

/// Add an email to the waitlist (POST /waitlist-join).
///
/// The body is read as JSON whatever its `Content-Type`. The email is
/// normalized and validated before the insert. Uniqueness is left to the
/// store: there is no pre-check, and a conflict on insert becomes a 409.
#[axum::debug_handler]
pub async fn join_waitlist(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JoinResponse>, AppError> {
    let repo = state.waitlist_repo()?;

    // A body that is not JSON carries no usable email.
    let request = serde_json::from_slice::<JoinRequest>(&body).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Unreadable waitlist submission");
        JoinRequest::default()
    });

    let email = parse_email(request.email.as_deref()).map_err(|err| {
        tracing::warn!(raw = ?request.email, error = %err, "Rejected waitlist submission");
        AppError::from(err)
    })?;

    match repo.insert_entry(&email).await {
        Ok(entry) => {
            tracing::info!(id = entry.id, email = %entry.email, "Email added to waitlist");
            Ok(Json(JoinResponse::added(entry)))
        }
        Err(err) if err.is_conflict() => {
            log_existing_entry(repo.as_ref(), &email).await;
            Err(AppError::conflict(ALREADY_ON_WAITLIST))
        }
        Err(err) => {
            tracing::error!(email = %email, error = %err, kind = err.kind(), "Failed to add email to waitlist");
            Err(AppError::store_failure(&err))
        }
    }
}

/// Logs which stored row a conflicting submission collided with.
///
/// Purely diagnostic: a failed lookup is logged and otherwise ignored.
async fn log_existing_entry(repo: &dyn WaitlistRepository, email: &str) {
    match repo.find_by_email_ilike(email).await {
        Ok(Some(existing)) => tracing::info!(
            email = %email,
            existing_id = existing.id,
            existing_email = %existing.email,
            "Duplicate waitlist submission"
        ),
        Ok(None) => tracing::info!(email = %email, "Duplicate waitlist submission, no case-insensitive match"),
        Err(err) => tracing::warn!(email = %email, error = %err, "Failed to look up existing waitlist entry"),
    }
}
