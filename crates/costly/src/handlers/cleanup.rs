//! `/waitlist-cleanup` - report on and reconcile stored emails.
//!
//! `GET` only reads. `POST` applies the cleanup plan as a best-effort batch:
//! every update and delete is issued at once, nothing is rolled back, and
//! each operation's outcome is reported.

use axum::{extract::State, Json};
use futures_util::{future::join_all, FutureExt};

use costly_core::storage::WaitlistRepository;
use costly_core::waitlist::{
    analyze_entries, plan_cleanup, CleanupOperation, CleanupPlan, CleanupResponse, WaitlistReport,
};

use crate::handlers::AppError;
use crate::state::AppState;

/// Report duplicates and malformed emails (GET /waitlist-cleanup).
#[axum::debug_handler]
pub async fn analyze_waitlist(
    State(state): State<AppState>,
) -> Result<Json<WaitlistReport>, AppError> {
    let repo = state.waitlist_repo()?;
    let entries = repo.list_entries().await?;

    let report = analyze_entries(&entries);
    tracing::info!(
        total = report.total,
        unique = report.unique,
        duplicate_groups = report.duplicates.len(),
        needs_normalization = report.needs_normalization.len(),
        invalid = report.invalid.len(),
        "Analyzed waitlist"
    );

    Ok(Json(report))
}

/// Deduplicate and normalize stored emails (POST /waitlist-cleanup).
#[axum::debug_handler]
pub async fn cleanup_waitlist(
    State(state): State<AppState>,
) -> Result<Json<CleanupResponse>, AppError> {
    let repo = state.waitlist_repo()?;
    let entries = repo.list_entries().await?;

    let plan = plan_cleanup(&entries);
    tracing::info!(
        total = entries.len(),
        updates = plan.updates.len(),
        deletes = plan.deletes.len(),
        "Applying waitlist cleanup"
    );

    let response = apply_plan(repo.as_ref(), &plan).await;
    for failure in &response.failures {
        tracing::error!(
            id = failure.id,
            operation = ?failure.operation,
            error = %failure.error,
            "Cleanup operation failed"
        );
    }
    tracing::info!(
        updated = response.updated,
        deleted = response.deleted,
        failed_updates = response.errors.update,
        failed_deletes = response.errors.delete,
        "Waitlist cleanup finished"
    );

    Ok(Json(response))
}

/// Issues every operation of `plan` concurrently and waits for all of them.
pub async fn apply_plan(repo: &dyn WaitlistRepository, plan: &CleanupPlan) -> CleanupResponse {
    let updates = plan.updates.iter().map(|update| {
        async move {
            let result = repo.update_email(update.id, &update.email).await;
            (CleanupOperation::Update, update.id, result)
        }
        .boxed()
    });
    let deletes = plan.deletes.iter().map(|&id| {
        async move {
            let result = repo.delete_entry(id).await;
            (CleanupOperation::Delete, id, result)
        }
        .boxed()
    });

    let results = join_all(updates.chain(deletes)).await;
    CleanupResponse::from_results(results)
}
