//! Router assembly
//!
//! Mounts the upload endpoint, caps the form size and stamps the CORS
//! headers on every response.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::routing::post;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::http::handler::{AppState, method_not_allowed, preflight, upload_image};

pub const UPLOAD_ROUTE: &str = "/api/upload-ftp";

/// 10 MiB cap on the whole multipart body
pub const MAX_FORM_BYTES: usize = 10 << 20;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            UPLOAD_ROUTE,
            post(upload_image)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}
