//! Server core functionality
//!
//! Binds the HTTP listener and serves the relay router.

pub mod core;

pub use self::core::Server;
