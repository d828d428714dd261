//! Error handling
//!
//! Defines error types and their conversion into HTTP responses.

pub mod handlers;
pub mod types;

pub use types::*;
