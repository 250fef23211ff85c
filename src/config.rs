//! Configuration Module
//!
//! This module defines all configuration structures for the directory service.
//! Configuration is loaded from TOML files and parsed using serde.

use serde::Deserialize;
use std::fs;

/// Main configuration structure
///
/// Contains all configuration sections for the directory service.
/// Loaded from a TOML file (e.g., config/default.toml). Missing sections
/// and fields fall back to their defaults.
///
/// # Example TOML
/// ```toml
/// [api]
/// host = "0.0.0.0"
/// port = 10000
///
/// [store]
/// max_capacity = 10000
/// max_batch_size = 20
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on (e.g., 10000)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Record store limits
///
/// # Fields
/// - `max_capacity`: Records kept before the oldest is evicted
/// - `max_batch_size`: Maximum number of records sharing one creation batch
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_max_capacity")]
    pub max_capacity: usize,
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_max_capacity() -> usize {
    10000
}

fn default_max_batch_size() -> usize {
    20
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read, the TOML is invalid, or a limit is zero
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;

        if config.store.max_capacity == 0 {
            anyhow::bail!("store.max_capacity must be at least 1");
        }
        if config.store.max_batch_size == 0 {
            anyhow::bail!("store.max_batch_size must be at least 1");
        }

        Ok(config)
    }

    /// Override the listening port from the `PORT` environment variable, if set
    pub fn with_env_port(mut self) -> anyhow::Result<Self> {
        if let Ok(port) = std::env::var("PORT") {
            self.api.port = port.parse()?;
        }
        Ok(self)
    }
}
