//! RAX FTP Relay - Entry Point
//!
//! Accepts multipart image uploads over HTTP and stores them on an FTP server.

use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

use rax_ftp_relay::upload::SuppaFtpConnector;
use rax_ftp_relay::{RelayConfig, Server};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Launching FTP relay...");

    let config = match RelayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::bind(config, Arc::new(SuppaFtpConnector)).await {
        Ok(server) => server,
        Err(_) => return ExitCode::FAILURE,
    };

    if let Err(e) = server.run().await {
        error!("Server failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
