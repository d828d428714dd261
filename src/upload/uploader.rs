//! FTP Uploader
//!
//! Runs one short-lived FTP session per upload: connect, login, store, quit.
//! The session is always terminated, whichever step fails.

use bytes::Bytes;
use log::{debug, warn};
use std::io::{Cursor, Read};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::config::FtpSettings;
use crate::error::TransferError;
use crate::upload::ftp::{FtpConnector, FtpSession};
use crate::upload::naming::remote_path;

/// Quits the wrapped session when dropped
struct SessionGuard {
    session: Box<dyn FtpSession>,
}

impl Deref for SessionGuard {
    type Target = dyn FtpSession;

    fn deref(&self) -> &Self::Target {
        self.session.as_ref()
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.session.as_mut()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Err(e) = self.session.quit() {
            warn!("Failed to close FTP session cleanly: {}", e);
        }
    }
}

/// Delivers `reader` to `<upload_dir>/<filename>` and returns the remote path.
///
/// Returns the first failure among connect, login and store. Nothing is retried.
pub fn upload_to_ftp(
    connector: &dyn FtpConnector,
    settings: &FtpSettings,
    filename: &str,
    reader: &mut dyn Read,
) -> Result<String, TransferError> {
    let mut session = SessionGuard {
        session: connector.connect(settings)?,
    };

    session.login(&settings.username, &settings.password)?;

    let path = remote_path(&settings.upload_dir, filename);
    let bytes = session.store(&path, reader)?;
    debug!("Stored {} bytes at {}", bytes, path);

    Ok(path)
}

/// Async front of [`upload_to_ftp`], running the blocking session on
/// tokio's blocking pool
#[derive(Clone)]
pub struct FtpUploader {
    connector: Arc<dyn FtpConnector>,
    settings: Arc<FtpSettings>,
}

impl FtpUploader {
    pub fn new(connector: Arc<dyn FtpConnector>, settings: FtpSettings) -> Self {
        Self {
            connector,
            settings: Arc::new(settings),
        }
    }

    pub async fn upload(&self, filename: String, data: Bytes) -> Result<String, TransferError> {
        let connector = Arc::clone(&self.connector);
        let settings = Arc::clone(&self.settings);

        tokio::task::spawn_blocking(move || {
            let mut reader = Cursor::new(data);
            upload_to_ftp(connector.as_ref(), &settings, &filename, &mut reader)
        })
        .await
        .map_err(|e| TransferError::Worker(e.to_string()))?
    }
}
