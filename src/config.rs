//! Configuration management for RAX FTP Relay
//!
//! All settings come from the environment, each with a fallback default.
//! The configuration is loaded once at startup and shared read-only.

use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Complete relay configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    // ═══ FTP BACKEND ═══
    /// FTP endpoint as `host:port`
    /// Environment: FTP_HOST
    pub ftp_host: String,

    /// Environment: FTP_USER
    pub ftp_user: String,

    /// Environment: FTP_PASSWORD
    pub ftp_password: String,

    /// Remote directory uploads are stored in
    /// Environment: FTP_UPLOAD_PATH
    pub ftp_upload_path: String,

    /// Timeout for establishing the control connection
    /// Environment: FTP_CONNECT_TIMEOUT_SECS
    pub ftp_connect_timeout_secs: u64,

    /// Read/write timeout of the control and data connections
    /// Environment: FTP_IO_TIMEOUT_SECS
    pub ftp_io_timeout_secs: u64,

    // ═══ HTTP SURFACE ═══
    /// Base URL the FTP upload directory is published under
    /// Environment: PUBLIC_URL_BASE
    pub public_url_base: String,

    /// IP literal to listen on, v4 or v6
    /// Environment: BIND_ADDRESS
    pub bind_address: String,

    /// Listen port, `8080` or `:8080`
    /// Environment: SERVER_PORT
    pub server_port: String,
}

/// The subset of the configuration a single FTP session needs
#[derive(Debug, Clone)]
pub struct FtpSettings {
    pub address: String,
    pub username: String,
    pub password: String,
    pub upload_dir: String,
    pub connect_timeout: Duration,
    pub io_timeout: Duration,
}

impl RelayConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::default())
    }

    /// Load configuration from the defaults overlaid by `source`
    pub fn load_from<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("ftp_host", "ftp.seu-servidor.com:21")?
            .set_default("ftp_user", "")?
            .set_default("ftp_password", "")?
            .set_default("ftp_upload_path", "public_html/imagens")?
            .set_default("ftp_connect_timeout_secs", 5)?
            .set_default("ftp_io_timeout_secs", 30)?
            .set_default("public_url_base", "http://seu-dominio.com/imagens")?
            .set_default("bind_address", "0.0.0.0")?
            .set_default("server_port", ":8080")?
            .add_source(source)
            .build()?;

        let config: RelayConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        match self.ftp_host.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "FTP_HOST must be host:port, got '{}'",
                    self.ftp_host
                )));
            }
        }

        if self.listen_ip().is_none() {
            return Err(ConfigError::Message(format!(
                "BIND_ADDRESS must be an IP address, got '{}'",
                self.bind_address
            )));
        }

        if self.listen_port().is_none() {
            return Err(ConfigError::Message(format!(
                "SERVER_PORT must be a port between 1 and 65535, got '{}'",
                self.server_port
            )));
        }

        if self.ftp_connect_timeout_secs == 0 || self.ftp_io_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "FTP timeouts must be greater than 0".into(),
            ));
        }

        if self.public_url_base.trim().is_empty() {
            return Err(ConfigError::Message(
                "PUBLIC_URL_BASE cannot be empty".into(),
            ));
        }

        Ok(())
    }

    fn listen_port(&self) -> Option<u16> {
        self.server_port
            .trim()
            .trim_start_matches(':')
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
    }

    fn listen_ip(&self) -> Option<IpAddr> {
        self.bind_address.trim().parse().ok()
    }

    /// Get bind address and listen port as socket address
    pub fn listen_socket(&self) -> SocketAddr {
        // validate() guarantees both parse
        let ip = self.listen_ip().unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = self.listen_port().unwrap_or(8080);
        SocketAddr::new(ip, port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.ftp_connect_timeout_secs)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_secs(self.ftp_io_timeout_secs)
    }

    pub fn ftp_settings(&self) -> FtpSettings {
        FtpSettings {
            address: self.ftp_host.clone(),
            username: self.ftp_user.clone(),
            password: self.ftp_password.clone(),
            upload_dir: self.ftp_upload_path.clone(),
            connect_timeout: self.connect_timeout(),
            io_timeout: self.io_timeout(),
        }
    }
}
