//! wormnetd - a minimal WormNET server for the legacy Worms Armageddon
//! client.

use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wormnetd::config::Config;
use wormnetd::network::Gateway;
use wormnetd::state::Directory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration; a missing file is not an error, the defaults
    // bring the server up with the historical channel set.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wormnet.toml".to_string());

    let config = if Path::new(&config_path).exists() {
        let config = Config::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "Failed to load config");
            e
        })?;
        info!(path = %config_path, "Loaded config");
        config
    } else {
        info!(path = %config_path, "Config file not found, using defaults");
        Config::default()
    };

    info!(
        host = %config.server.name,
        address = %config.listen.address,
        channels = %config.channels.keys().cloned().collect::<Vec<_>>().join(", "),
        "Starting wormnetd"
    );

    let config = Arc::new(config);
    let directory = Arc::new(Directory::new(&config));

    let gateway = Gateway::bind(Arc::clone(&config), directory).await?;
    gateway.run().await
}
