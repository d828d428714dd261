//! Upload naming
//!
//! Derives the remote file name of an upload and the paths/URLs built from it.

use chrono::Utc;

/// Name used when the client sends no usable file name
const FALLBACK_BASENAME: &str = "upload";

/// Source of the current wall-clock time, in whole seconds
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> i64;
}

/// Clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Strips directory components and control characters from a client file name.
///
/// Both `/` and `\` count as separators, so `../../etc/passwd` and
/// `C:\photos\cat.png` reduce to `passwd` and `cat.png`.
pub fn sanitize_basename(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .find(|part| !part.is_empty())
        .unwrap_or("");

    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();

    match cleaned.as_str() {
        "" | "." | ".." => FALLBACK_BASENAME.to_string(),
        _ => cleaned,
    }
}

/// Builds `<unix-seconds>-<basename>`
pub fn generate_filename(timestamp: i64, original: &str) -> String {
    format!("{}-{}", timestamp, sanitize_basename(original))
}

/// Joins the remote upload directory and a file name with a single `/`
pub fn remote_path(upload_dir: &str, filename: &str) -> String {
    let dir = upload_dir.trim_end_matches('/');
    if dir.is_empty() {
        if upload_dir.starts_with('/') {
            format!("/{}", filename)
        } else {
            filename.to_string()
        }
    } else {
        format!("{}/{}", dir, filename)
    }
}

/// Joins the public URL base and a file name with a single `/`
pub fn public_url(base: &str, filename: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), filename)
}
