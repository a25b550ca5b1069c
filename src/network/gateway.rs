//! Gateway - TCP listener that accepts incoming connections.
//!
//! Binds the one listening port the server owns and spawns a Connection
//! task for each incoming client.

use crate::config::Config;
use crate::network::Connection;
use crate::state::Directory;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    config: Arc<Config>,
    directory: Arc<Directory>,
    next_id: AtomicU64,
}

impl Gateway {
    /// Bind the gateway to the configured address.
    pub async fn bind(config: Arc<Config>, directory: Arc<Directory>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.listen.address).await?;
        info!(address = %config.listen.address, "Listener bound");
        Ok(Self {
            listener,
            config,
            directory,
            next_id: AtomicU64::new(1),
        })
    }

    /// Address actually bound. Differs from the configured one when the
    /// configuration asked for port 0.
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the gateway, accepting connections forever.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Connection accepted");

                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let config = Arc::clone(&self.config);
                    let directory = Arc::clone(&self.directory);

                    tokio::spawn(async move {
                        let connection = Connection::new(id, stream, addr, config, directory);
                        if let Err(e) = connection.run().await {
                            error!(%addr, error = %e, "Connection error");
                        }
                        info!(%addr, "Connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
