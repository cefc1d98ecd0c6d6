mod error;
mod http_mapping;
mod traits;

pub use error::{is_unique_violation, RepositoryError, Result, UNIQUE_VIOLATION_CODE};
pub use http_mapping::repository_error_to_status_code;
pub use traits::WaitlistRepository;
