//! Server middleware
//!
//! Provides logging for the upload endpoint.

pub mod logging;
