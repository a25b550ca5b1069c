//! In-process test server.

use std::net::SocketAddr;
use std::sync::Arc;
use wormnetd::config::Config;
use wormnetd::network::Gateway;
use wormnetd::state::Directory;

/// A server running inside the test process on an ephemeral port.
pub struct TestServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server with the given configuration. The configured listen
    /// address is replaced with an ephemeral loopback port so tests never
    /// collide.
    pub async fn spawn_with_config(mut config: Config) -> anyhow::Result<Self> {
        config.listen.address = "127.0.0.1:0".parse()?;
        let config = Arc::new(config);
        let directory = Arc::new(Directory::new(&config));

        let gateway = Gateway::bind(Arc::clone(&config), directory).await?;
        let addr = gateway.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = gateway.run().await;
        });

        Ok(Self { addr, handle })
    }

    /// Spawn with the built-in default configuration.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with_config(Config::default()).await
    }

    #[allow(dead_code)]
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// Open a new raw client connection to this server.
    pub async fn connect(&self) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(self.addr).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
