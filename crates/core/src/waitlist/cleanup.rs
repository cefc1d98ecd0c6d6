//! Planning and summarizing the mutating waitlist cleanup.
//!
//! Planning is pure: it looks at a snapshot and decides which rows to
//! rewrite and which to delete. Executing the plan is left to the caller,
//! which feeds per-operation results back into [`CleanupResponse::from_results`].

use serde::{Deserialize, Serialize};

use crate::storage::RepositoryError;

use super::buckets::bucket_entries;
use super::types::WaitlistEntry;

/// Rewrite a row's email to its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailUpdate {
    pub id: i64,
    pub email: String,
}

/// What a cleanup run intends to change. Updates and deletes never touch
/// the same id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPlan {
    pub updates: Vec<EmailUpdate>,
    pub deletes: Vec<i64>,
}

impl CleanupPlan {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deletes.is_empty()
    }
}

/// Decides which rows to keep, rewrite and delete.
///
/// Every canonical email keeps its oldest (smallest id) row. The other rows
/// in its group are deleted. The kept row is rewritten only when its stored
/// email is not already canonical. Invalid rows are left alone.
pub fn plan_cleanup(entries: &[WaitlistEntry]) -> CleanupPlan {
    let mut plan = CleanupPlan::default();

    for bucket in bucket_entries(entries).buckets {
        let mut rows = bucket.rows;
        rows.sort_by_key(|row| row.id);

        let Some((kept, extras)) = rows.split_first() else {
            continue;
        };

        plan.deletes.extend(extras.iter().map(|row| row.id));

        if kept.email != bucket.normalized {
            plan.updates.push(EmailUpdate {
                id: kept.id,
                email: bucket.normalized,
            });
        }
    }

    plan
}

/// The two kinds of mutation a cleanup issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupOperation {
    Update,
    Delete,
}

/// One mutation that the store rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupFailure {
    pub id: i64,
    pub operation: CleanupOperation,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupErrorCounts {
    pub update: usize,
    pub delete: usize,
}

/// Response body of `POST /waitlist-cleanup`.
///
/// `updated` and `deleted` count successful operations only; failures are
/// counted in `errors` and itemized in `failures`. Nothing is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub updated: usize,
    pub deleted: usize,
    pub errors: CleanupErrorCounts,
    #[serde(default)]
    pub failures: Vec<CleanupFailure>,
}

impl CleanupResponse {
    /// Folds per-operation results into the response body.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (CleanupOperation, i64, Result<(), RepositoryError>)>,
    {
        let mut response = Self {
            success: true,
            ..Self::default()
        };

        for (operation, id, result) in results {
            match (operation, result) {
                (CleanupOperation::Update, Ok(())) => response.updated += 1,
                (CleanupOperation::Delete, Ok(())) => response.deleted += 1,
                (operation, Err(err)) => {
                    match operation {
                        CleanupOperation::Update => response.errors.update += 1,
                        CleanupOperation::Delete => response.errors.delete += 1,
                    }
                    response.failures.push(CleanupFailure {
                        id,
                        operation,
                        error: err.message(),
                    });
                }
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_keeps_oldest_and_deletes_rest() {
        let entries = vec![
            WaitlistEntry::new(1, "a@b.com"),
            WaitlistEntry::new(2, "A@B.COM "),
            WaitlistEntry::new(3, "c@d.com"),
        ];

        let plan = plan_cleanup(&entries);

        assert_eq!(plan.deletes, vec![2]);
        assert!(plan.updates.is_empty());
    }

    #[test]
    fn test_plan_rewrites_kept_row_when_not_canonical() {
        let entries = vec![
            WaitlistEntry::new(5, "x@y.com"),
            WaitlistEntry::new(2, " X@Y.com"),
            WaitlistEntry::new(9, "X@y.COM"),
        ];

        let plan = plan_cleanup(&entries);

        assert_eq!(
            plan.updates,
            vec![EmailUpdate {
                id: 2,
                email: "x@y.com".to_string(),
            }]
        );
        assert_eq!(plan.deletes, vec![5, 9]);
    }

    #[test]
    fn test_plan_normalizes_singletons() {
        let entries = vec![
            WaitlistEntry::new(1, "Solo@Example.com"),
            WaitlistEntry::new(2, "fine@example.com"),
        ];

        let plan = plan_cleanup(&entries);

        assert_eq!(
            plan.updates,
            vec![EmailUpdate {
                id: 1,
                email: "solo@example.com".to_string(),
            }]
        );
        assert!(plan.deletes.is_empty());
    }

    #[test]
    fn test_plan_ignores_invalid_rows() {
        let entries = vec![
            WaitlistEntry::new(1, "  NOT-AN-EMAIL "),
            WaitlistEntry::new(2, ""),
        ];

        let plan = plan_cleanup(&entries);

        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_updates_and_deletes_are_disjoint() {
        let entries = vec![
            WaitlistEntry::new(1, "A@a.com"),
            WaitlistEntry::new(2, "a@a.com"),
            WaitlistEntry::new(3, "B@b.com"),
        ];

        let plan = plan_cleanup(&entries);

        for update in &plan.updates {
            assert!(!plan.deletes.contains(&update.id));
        }
        assert_eq!(plan.deletes, vec![2]);
        assert_eq!(plan.updates.len(), 2);
    }

    #[test]
    fn test_response_counts_successes_and_failures() {
        let results = vec![
            (CleanupOperation::Update, 1, Ok(())),
            (
                CleanupOperation::Update,
                4,
                Err(RepositoryError::QueryFailed("boom".to_string())),
            ),
            (CleanupOperation::Delete, 2, Ok(())),
            (CleanupOperation::Delete, 3, Ok(())),
            (
                CleanupOperation::Delete,
                7,
                Err(RepositoryError::ConnectionFailed("reset".to_string())),
            ),
        ];

        let response = CleanupResponse::from_results(results);

        assert!(response.success);
        assert_eq!(response.updated, 1);
        assert_eq!(response.deleted, 2);
        assert_eq!(response.errors, CleanupErrorCounts { update: 1, delete: 1 });
        assert_eq!(
            response.failures,
            vec![
                CleanupFailure {
                    id: 4,
                    operation: CleanupOperation::Update,
                    error: "boom".to_string(),
                },
                CleanupFailure {
                    id: 7,
                    operation: CleanupOperation::Delete,
                    error: "reset".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_response_serialization_shape() {
        let response = CleanupResponse::from_results(Vec::new());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "updated": 0,
                "deleted": 0,
                "errors": { "update": 0, "delete": 0 },
                "failures": []
            })
        );
    }
}
