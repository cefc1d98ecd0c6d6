mod analysis;
mod buckets;
mod cleanup;
mod email;
mod error;
mod requests;
mod sequence;
mod types;

pub use analysis::{
    analyze_entries, DuplicateGroup, InvalidEmail, NeedsNormalization, ReportSummary,
    WaitlistReport,
};
pub use cleanup::{
    plan_cleanup, CleanupErrorCounts, CleanupFailure, CleanupOperation, CleanupPlan,
    CleanupResponse, EmailUpdate,
};
pub use email::{classify_stored_email, is_valid_email, normalize_email, parse_email};
pub use error::{EmailError, InvalidReason};
pub use requests::{
    CountResponse, ErrorResponse, JoinRequest, JoinResponse, ReadinessResponse,
    ServiceUnavailableResponse, RETRY_AFTER_SECONDS,
};
pub use sequence::{setval_statement, SequenceResponse};
pub use types::WaitlistEntry;
