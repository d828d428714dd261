//! HTTP surface
//!
//! The upload endpoint, its JSON bodies, and router assembly.

pub mod handler;
pub mod responses;
pub mod router;

pub use handler::AppState;
pub use router::{UPLOAD_ROUTE, build_router};
