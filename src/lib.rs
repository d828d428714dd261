//! RAX FTP Relay
//!
//! Relays multipart image uploads received over HTTP to an FTP server and
//! answers with the public URL of the stored file.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod server;
pub mod upload;

pub use crate::config::RelayConfig;
pub use crate::server::Server;
