//! Grouping of waitlist rows by canonical email.
//!
//! Shared by the read-only report and the cleanup planner so both agree on
//! which rows are invalid and which rows collide.

use std::collections::HashMap;

use super::email::classify_stored_email;
use super::error::InvalidReason;
use super::types::WaitlistEntry;

/// Rows that share one canonical email, in the order they were seen.
#[derive(Debug)]
pub(crate) struct Bucket<'a> {
    pub normalized: String,
    pub rows: Vec<&'a WaitlistEntry>,
}

impl Bucket<'_> {
    pub fn ids(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.id).collect()
    }
}

/// Result of bucketing a table snapshot.
#[derive(Debug, Default)]
pub(crate) struct Bucketed<'a> {
    /// Buckets in first-seen order of their canonical email.
    pub buckets: Vec<Bucket<'a>>,
    /// Rows excluded from bucketing.
    pub invalid: Vec<(&'a WaitlistEntry, InvalidReason)>,
}

pub(crate) fn bucket_entries(entries: &[WaitlistEntry]) -> Bucketed<'_> {
    let mut bucketed = Bucketed::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in entries {
        let normalized = match classify_stored_email(&row.email) {
            Ok(normalized) => normalized,
            Err(reason) => {
                bucketed.invalid.push((row, reason));
                continue;
            }
        };

        match index.get(&normalized) {
            Some(&position) => bucketed.buckets[position].rows.push(row),
            None => {
                index.insert(normalized.clone(), bucketed.buckets.len());
                bucketed.buckets.push(Bucket {
                    normalized,
                    rows: vec![row],
                });
            }
        }
    }

    bucketed
}
