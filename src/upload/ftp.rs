//! FTP client capability
//!
//! The uploader only needs four operations from an FTP client: connect with
//! a timeout, log in, store a stream, and quit. They are expressed as traits
//! so the relay can run against a fake backend.

use log::debug;
use std::io::Read;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use suppaftp::{FtpError, FtpStream};
use suppaftp::types::FileType;

use crate::config::FtpSettings;
use crate::error::TransferError;

/// Opens FTP sessions
pub trait FtpConnector: Send + Sync {
    fn connect(&self, settings: &FtpSettings) -> Result<Box<dyn FtpSession>, TransferError>;
}

/// One open FTP control connection
pub trait FtpSession {
    fn login(&mut self, username: &str, password: &str) -> Result<(), TransferError>;

    /// Streams `reader` to `path`, returning the number of bytes sent
    fn store(&mut self, path: &str, reader: &mut dyn Read) -> Result<u64, TransferError>;

    fn quit(&mut self) -> Result<(), String>;
}

/// Production connector backed by `suppaftp`
#[derive(Debug, Default, Clone, Copy)]
pub struct SuppaFtpConnector;

impl FtpConnector for SuppaFtpConnector {
    fn connect(&self, settings: &FtpSettings) -> Result<Box<dyn FtpSession>, TransferError> {
        let socket = resolve(&settings.address)?;

        let connect_timeout = settings.connect_timeout;
        let io_timeout = settings.io_timeout;

        let stream = FtpStream::connect_timeout(socket, connect_timeout)
            .map_err(|e| TransferError::Connect {
                address: settings.address.clone(),
                reason: e.to_string(),
            })?
            // Passive data connections get the same bounds as the control one,
            // so a peer that stops reading cannot stall STOR forever
            .passive_stream_builder(move |addr| {
                let data = TcpStream::connect_timeout(&addr, connect_timeout)
                    .map_err(FtpError::ConnectionError)?;
                data.set_read_timeout(Some(io_timeout))
                    .and_then(|_| data.set_write_timeout(Some(io_timeout)))
                    .map_err(FtpError::ConnectionError)?;
                Ok(data)
            });

        // Bounds login, store completion and quit on the control connection
        let control = stream.get_ref();
        let timeouts = control
            .set_read_timeout(Some(io_timeout))
            .and_then(|_| control.set_write_timeout(Some(io_timeout)));
        if let Err(e) = timeouts {
            return Err(TransferError::Connect {
                address: settings.address.clone(),
                reason: format!("failed to set socket timeouts: {}", e),
            });
        }

        debug!("Connected to FTP server {}", socket);
        Ok(Box::new(SuppaFtpSession { stream }))
    }
}

fn resolve(address: &str) -> Result<SocketAddr, TransferError> {
    let invalid = |reason: String| TransferError::InvalidAddress {
        address: address.to_string(),
        reason,
    };

    address
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses found".into()))
}

struct SuppaFtpSession {
    stream: FtpStream,
}

impl FtpSession for SuppaFtpSession {
    fn login(&mut self, username: &str, password: &str) -> Result<(), TransferError> {
        let login_error = |reason: String| TransferError::Login {
            username: username.to_string(),
            reason,
        };

        self.stream
            .login(username, password)
            .map_err(|e| login_error(e.to_string()))?;

        // Uploads are arbitrary bytes; ASCII mode would rewrite line endings
        self.stream
            .transfer_type(FileType::Binary)
            .map_err(|e| login_error(format!("TYPE I rejected: {}", e)))?;

        debug!("Logged in to FTP server as {}", username);
        Ok(())
    }

    fn store(&mut self, path: &str, reader: &mut dyn Read) -> Result<u64, TransferError> {
        let mut reader = reader;
        self.stream
            .put_file(path, &mut reader)
            .map_err(|e| TransferError::Store {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn quit(&mut self) -> Result<(), String> {
        self.stream.quit().map_err(|e| e.to_string())
    }
}
