//! Configuration management for the NutriScan server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with NUTRISCAN_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// OpenFoodFacts product lookup configuration
    pub open_food_facts: OpenFoodFactsConfig,

    /// AI summary workflow configuration
    pub ai: AiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenFoodFactsConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,

    /// User-Agent sent with every request, as OpenFoodFacts asks of API clients
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Workflow API base URL
    pub base_url: String,

    /// API key; AI summaries are disabled when unset
    pub api_key: Option<String>,

    /// End-user identifier sent with workflow runs
    pub user: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AiConfig {
    /// The API key, if one is configured and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("NUTRISCAN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("open_food_facts.base_url", "https://world.openfoodfacts.org")?
            .set_default(
                "open_food_facts.user_agent",
                "NutriScan/1.0 (contact@nutriscan.example.com)",
            )?
            .set_default("open_food_facts.timeout_secs", 10)?
            .set_default("ai.base_url", "https://api.dify.ai/v1")?
            .set_default("ai.user", "nutriscan-user")?
            .set_default("ai.timeout_secs", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (NUTRISCAN_ prefix)
            .add_source(
                Environment::with_prefix("NUTRISCAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ServerConfig {
    /// Address to bind; `localhost` resolves to the IPv4 loopback
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::from(([127, 0, 0, 1], self.port)));
        }
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
