//! Configuration management for the Farm Dashboard backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FARM_ prefix (`FARM_SERVER__PORT`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Which record store backs the entity services
    pub storage: StorageConfig,

    /// Hosted data platform credentials, used by the remote backend
    #[serde(default)]
    pub platform: PlatformConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Record store variant
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory tables seeded from JSON fixtures
    Mock,
    /// Hosted data platform over HTTP
    Platform,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Mock => write!(f, "mock"),
            StorageBackend::Platform => write!(f, "platform"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding farms.json, crops.json, tasks.json,
    /// transactions.json and weather.json
    pub fixtures_dir: String,

    /// Simulated latency bounds for the mock store, in milliseconds
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlatformConfig {
    /// Base URL of the data platform API
    #[serde(default)]
    pub base_url: String,

    /// Project the tables belong to
    #[serde(default)]
    pub project_id: String,

    /// Public key sent with every request
    #[serde(default)]
    pub public_key: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment, env_overrides())?.build()?;

        let config: Config = config.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    fn builder(
        environment: &str,
        env: Environment,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "mock")?
            .set_default("storage.fixtures_dir", "backend/fixtures")?
            .set_default("storage.latency_min_ms", 200)?
            .set_default("storage.latency_max_ms", 450)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARM_ prefix)
            .add_source(env))
    }

    /// Reject combinations that cannot serve requests
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.storage.latency_min_ms > self.storage.latency_max_ms {
            return Err(ConfigError::Message(format!(
                "storage.latency_min_ms ({}) exceeds storage.latency_max_ms ({})",
                self.storage.latency_min_ms, self.storage.latency_max_ms
            )));
        }

        if self.storage.backend == StorageBackend::Platform {
            if self.platform.base_url.trim().is_empty() {
                return Err(ConfigError::Message(
                    "platform.base_url is required for the platform backend".into(),
                ));
            }
            if self.platform.project_id.trim().is_empty() {
                return Err(ConfigError::Message(
                    "platform.project_id is required for the platform backend".into(),
                ));
            }
            if self.platform.public_key.trim().is_empty() {
                return Err(ConfigError::Message(
                    "platform.public_key is required for the platform backend".into(),
                ));
            }
        }

        Ok(())
    }
}

/// `FARM_SERVER__PORT` sets `server.port`: one underscore after the
/// prefix, two between nested keys
fn env_overrides() -> Environment {
    Environment::with_prefix("FARM")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl StorageConfig {
    /// Mock store seeded from `fixtures_dir` with no simulated latency
    pub fn mock_without_latency(fixtures_dir: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::Mock,
            fixtures_dir: fixtures_dir.into(),
            latency_min_ms: 0,
            latency_max_ms: 0,
        }
    }
}
