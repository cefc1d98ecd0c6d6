//! Read-only analysis of a waitlist snapshot.

use serde::{Deserialize, Serialize};

use super::buckets::bucket_entries;
use super::email::classify_stored_email;
use super::error::InvalidReason;
use super::types::WaitlistEntry;

/// A row that cannot be deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidEmail {
    pub id: i64,
    pub email: String,
    pub reason: InvalidReason,
}

/// A row whose stored email differs from its canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedsNormalization {
    pub id: i64,
    pub email: String,
    pub normalized: String,
}

/// Several rows that map onto the same canonical email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub normalized: String,
    pub ids: Vec<i64>,
    /// Stored emails, parallel to `ids`.
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_emails: usize,
    pub unique_emails: usize,
    pub duplicate_groups: usize,
    pub needs_normalization: usize,
    pub invalid_emails: usize,
}

/// Response body of `GET /waitlist-cleanup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total: usize,
    pub unique: usize,
    pub duplicates: Vec<DuplicateGroup>,
    pub needs_normalization: Vec<NeedsNormalization>,
    pub invalid: Vec<InvalidEmail>,
    pub summary: ReportSummary,
}

/// Classifies every row of a snapshot without mutating anything.
///
/// `entries` should be ordered by id ascending, as the repository returns
/// them; ids inside a duplicate group follow that order.
pub fn analyze_entries(entries: &[WaitlistEntry]) -> WaitlistReport {
    if entries.is_empty() {
        return WaitlistReport {
            message: Some("No emails found".to_string()),
            ..WaitlistReport::default()
        };
    }

    let bucketed = bucket_entries(entries);

    let invalid: Vec<InvalidEmail> = bucketed
        .invalid
        .iter()
        .map(|(row, reason)| InvalidEmail {
            id: row.id,
            email: row.email.clone(),
            reason: *reason,
        })
        .collect();

    let mut needs_normalization = Vec::new();
    let mut duplicates = Vec::new();

    for bucket in &bucketed.buckets {
        if bucket.rows.len() > 1 {
            duplicates.push(DuplicateGroup {
                normalized: bucket.normalized.clone(),
                ids: bucket.ids(),
                emails: bucket.rows.iter().map(|row| row.email.clone()).collect(),
            });
        }
    }

    // Reported in row order, not bucket order.
    for row in entries {
        let Ok(normalized) = classify_stored_email(&row.email) else {
            continue;
        };
        if row.email != normalized {
            needs_normalization.push(NeedsNormalization {
                id: row.id,
                email: row.email.clone(),
                normalized,
            });
        }
    }

    let summary = ReportSummary {
        total_emails: entries.len(),
        unique_emails: bucketed.buckets.len(),
        duplicate_groups: duplicates.len(),
        needs_normalization: needs_normalization.len(),
        invalid_emails: invalid.len(),
    };

    WaitlistReport {
        message: None,
        total: entries.len(),
        unique: bucketed.buckets.len(),
        duplicates,
        needs_normalization,
        invalid,
        summary,
    }
}
