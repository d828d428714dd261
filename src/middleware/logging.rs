//! Logging middleware
//!
//! Server-side log lines of the upload endpoint.

use log::{error, info};

use crate::error::TransferError;

/// Log a completed upload
pub fn log_upload_success(image_url: &str) {
    info!("Upload succeeded: {}", image_url);
}

/// Log a failed FTP upload with its full cause
pub fn log_upload_failure(filename: &str, err: &TransferError) {
    error!("FTP upload of {} failed: {}", filename, err);
}
