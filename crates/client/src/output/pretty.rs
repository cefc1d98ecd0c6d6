//! Pretty output formatting.

use costly_core::waitlist::{
    CleanupResponse, CountResponse, JoinResponse, ReadinessResponse, SequenceResponse,
    WaitlistReport,
};

/// Format a successful join for display.
pub fn format_join(response: &JoinResponse) -> String {
    match response.data.first() {
        Some(entry) => format!("{}\n  ID: {}\n  Email: {}", response.message, entry.id, entry.email),
        None => response.message.clone(),
    }
}

/// Format the signup counter for display.
pub fn format_count(response: &CountResponse) -> String {
    match response.count {
        1 => "1 person on the waitlist".to_string(),
        n => format!("{n} people on the waitlist"),
    }
}

/// Format the cleanup report for display.
pub fn format_report(report: &WaitlistReport) -> String {
    if let Some(message) = &report.message {
        return format!("{message}.");
    }

    let summary = &report.summary;
    let mut output = format!(
        "WAITLIST REPORT\n{}\n  Total: {}\n  Unique: {}\n  Duplicate groups: {}\n  Needs normalization: {}\n  Invalid: {}",
        "-".repeat(40),
        summary.total_emails,
        summary.unique_emails,
        summary.duplicate_groups,
        summary.needs_normalization,
        summary.invalid_emails,
    );

    if !report.duplicates.is_empty() {
        output.push_str("\n\nDUPLICATES");
        for group in &report.duplicates {
            let ids: Vec<String> = group.ids.iter().map(i64::to_string).collect();
            output.push_str(&format!("\n  {} <- ids {}", group.normalized, ids.join(", ")));
        }
    }

    if !report.needs_normalization.is_empty() {
        output.push_str("\n\nNEEDS NORMALIZATION");
        for row in &report.needs_normalization {
            output.push_str(&format!("\n  #{} {:?} -> {}", row.id, row.email, row.normalized));
        }
    }

    if !report.invalid.is_empty() {
        output.push_str("\n\nINVALID");
        for row in &report.invalid {
            output.push_str(&format!("\n  #{} {:?} ({})", row.id, row.email, row.reason));
        }
    }

    output
}

/// Format the cleanup result for display.
pub fn format_cleanup(response: &CleanupResponse) -> String {
    let mut output = format!(
        "Cleanup finished\n  Updated: {}\n  Deleted: {}",
        response.updated, response.deleted
    );

    if !response.failures.is_empty() {
        output.push_str(&format!(
            "\n  Failed updates: {}\n  Failed deletes: {}",
            response.errors.update, response.errors.delete
        ));
        for failure in &response.failures {
            output.push_str(&format!(
                "\n    {:?} #{}: {}",
                failure.operation, failure.id, failure.error
            ));
        }
    }

    output
}

/// Format the sequence report for display.
pub fn format_sequence(response: &SequenceResponse) -> String {
    let mut output = format!(
        "{}\n  Max ID: {}\n  Next ID: {}",
        response.message, response.max_id, response.next_id
    );
    for (step, instruction) in response.instructions.iter().enumerate() {
        output.push_str(&format!("\n  {}. {}", step + 1, instruction));
    }
    output
}

/// Format a readiness probe result for display.
pub fn format_readiness(response: &ReadinessResponse) -> String {
    match (&response.ready, &response.error) {
        (true, _) => "Ready".to_string(),
        (false, Some(error)) => format!("Not ready: {error}"),
        (false, None) => "Not ready".to_string(),
    }
}
