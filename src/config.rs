//! Configuration loading and defaults.
//!
//! Loaded once at startup from a TOML file; a missing file falls back to
//! the built-in defaults so the server comes up with zero setup. The
//! channel set is treated as immutable after the directory is built.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Message of the Day configuration.
    #[serde(default)]
    pub motd: MotdConfig,
    /// Channel set, keyed by bare name (no leading `#`).
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelConfig>,
}

impl Config {
    /// Load configuration from a TOML file. An empty channel table falls
    /// back to the built-in channels, matching the defaults path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        if config.channels.is_empty() {
            config.channels = default_channels();
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            listen: ListenConfig::default(),
            motd: MotdConfig::default(),
            channels: default_channels(),
        }
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host identity echoed as the server prefix in every reply.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Password the client must present during registration.
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            password: default_password(),
        }
    }
}

fn default_server_name() -> String {
    "wormnet.local".to_string()
}

fn default_password() -> String {
    "ELSILRACLIHP".to_string()
}

/// Network listen configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address the IRC listener binds to.
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 6667))
}

/// Message of the Day (MOTD) configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MotdConfig {
    /// Path to a MOTD file (one reply line per file line). Re-read on
    /// every send, so operators can edit it without a restart.
    pub file: Option<String>,
    /// Inline MOTD lines (used when `file` is not set).
    #[serde(default)]
    pub lines: Vec<String>,
}

impl MotdConfig {
    /// Resolve the MOTD lines for one send.
    pub fn load_lines(&self) -> Vec<String> {
        if let Some(path) = &self.file {
            if Path::new(path).exists() {
                return match std::fs::read_to_string(path) {
                    Ok(content) => content.lines().map(str::to_string).collect(),
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "Failed to read MOTD file");
                        vec!["Welcome to WormNET".to_string()]
                    }
                };
            }
        }

        if !self.lines.is_empty() {
            return self.lines.clone();
        }

        vec![
            "Welcome to WormNET".to_string(),
            "Have fun playing Worms Armageddon!".to_string(),
        ]
    }
}

/// One configured channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Topic text shown after the icon number.
    pub topic: String,
    /// Channel icon index the client renders in the lobby list.
    #[serde(default)]
    pub icon: u8,
}

impl ChannelConfig {
    /// Topic as it appears on the wire: zero-padded icon, space, text.
    pub fn display_topic(&self) -> String {
        format!("{:02} {}", self.icon, self.topic)
    }
}

fn default_channels() -> BTreeMap<String, ChannelConfig> {
    BTreeMap::from([
        (
            "AnythingGoes".to_string(),
            ChannelConfig {
                topic: "Anything goes!".to_string(),
                icon: 0,
            },
        ),
        (
            "PartyTime".to_string(),
            ChannelConfig {
                topic: "Party time!".to_string(),
                icon: 1,
            },
        ),
    ])
}
