use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Runtime configuration. Every value the tool needs comes from here: a
/// TOML file, environment variables, or command-line overrides. Nothing is
/// compiled in except the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub gas: GasConfig,
    pub confirm: ConfirmConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub api_url: String,
    pub chain_id: u16,
    /// Route the transaction to the DS shard.
    pub priority: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GasConfig {
    /// Gas price in Li (1 Li = 10^6 Qa).
    pub price_li: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmConfig {
    pub attempts: u32,
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Hex-encoded secp256k1 secret key. Prefer the ZIL_PRIVATE_KEY
    /// environment variable over writing this to disk.
    pub private_key: Option<String>,
    /// Target contract, bech32 (zil1...) or checksummed hex (0x...).
    pub contract_address: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5555".to_string(),
            chain_id: 1,
            priority: true,
        }
    }
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            price_li: 1000,
            limit: 10000,
        }
    }
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            attempts: 33,
            interval_ms: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path, e))?;

        Ok(config)
    }

    /// Load configuration with fallback to default
    pub async fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Self {
        let mut config = match path {
            Some(path) => match Self::load_from_file(path).await {
                Ok(config) => {
                    tracing::info!("Loaded configuration from file");
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load config file, using defaults: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        };

        config.apply_env_vars();
        config
    }

    /// Apply environment variable substitutions to configuration
    fn apply_env_vars(&mut self) {
        if let Ok(api_url) = std::env::var("ZIL_API_URL") {
            tracing::debug!("Using ZIL_API_URL environment variable");
            self.network.api_url = api_url;
        }

        if let Ok(private_key) = std::env::var("ZIL_PRIVATE_KEY") {
            tracing::debug!("Using ZIL_PRIVATE_KEY environment variable");
            self.admin.private_key = Some(private_key);
        }

        if let Ok(contract_address) = std::env::var("ZIL_CONTRACT_ADDRESS") {
            tracing::debug!("Using ZIL_CONTRACT_ADDRESS environment variable");
            self.admin.contract_address = Some(contract_address);
        }
    }

    /// Get default config file path
    pub fn default_config_path() -> Result<std::path::PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("zilliqa-admin").join("config.toml"))
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let sample_config = r#"# zilliqa-admin configuration file

[network]
api_url = "http://localhost:5555"
chain_id = 1
# Route the transaction to the DS shard
priority = true

[gas]
# Gas price in Li (1 Li = 10^6 Qa)
price_li = 1000
limit = 10000

# Receipt polling: attempts x interval bounds the confirmation wait
[confirm]
attempts = 33
interval_ms = 1000

[admin]
# Prefer the ZIL_PRIVATE_KEY environment variable over this file
# private_key = "d96e9eb5b782a80ea153c937fa83e5948485fbfc8b7e7c069d7b914dbc350aba"
# contract_address = "zil1..."  # or checksummed 0x... hex

# Environment variables (override file values):
# ZIL_API_URL          - JSON-RPC endpoint
# ZIL_PRIVATE_KEY      - admin signing key (hex)
# ZIL_CONTRACT_ADDRESS - target contract
"#;
        sample_config.to_string()
    }
}
