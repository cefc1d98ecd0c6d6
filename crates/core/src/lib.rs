//! costly_core - Types and pure functions for the Costly waitlist.
//!
//! Everything in this crate is free of I/O. The server and client crates
//! build on it: the server executes what the core decides, and the client
//! speaks the request/response types defined here.

pub mod serde;
pub mod storage;
pub mod waitlist;
