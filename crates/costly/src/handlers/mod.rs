pub mod cleanup;
pub mod count;
pub mod error;
pub mod health;
pub mod join;
pub mod sequence;
pub mod unavailable;

pub use error::AppError;
