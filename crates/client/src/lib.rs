//! costly_client - CLI client for the Costly waitlist API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::CostlyClient;
pub use error::{ClientError, Result};
