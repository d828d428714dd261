use log::{error, info};
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::{AppState, UPLOAD_ROUTE, build_router};
use crate::upload::FtpConnector;

pub struct Server {
    listener: TcpListener,
    config: Arc<RelayConfig>,
    connector: Arc<dyn FtpConnector>,
}

impl Server {
    /// Binds the HTTP listener described by `config`
    pub async fn bind(config: RelayConfig, connector: Arc<dyn FtpConnector>) -> io::Result<Self> {
        let socket = config.listen_socket();

        let listener = match TcpListener::bind(socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e);
            }
        };

        Ok(Self {
            listener,
            config: Arc::new(config),
            connector,
        })
    }

    pub fn local_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves uploads until Ctrl-C
    pub async fn run(self) -> io::Result<()> {
        info!(
            "Relaying uploads on http://{}{} to ftp://{}/{}",
            self.config.listen_socket(),
            UPLOAD_ROUTE,
            self.config.ftp_host,
            self.config.ftp_upload_path
        );

        let state = AppState::new(self.config, self.connector);
        let app = build_router(state);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested, draining in-flight uploads"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
