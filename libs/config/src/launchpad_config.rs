//! Launchpad Configuration Module
//!
//! Provides configuration loading for the control plane and the CLI.
//! Supports loading from TOML files with `LAUNCHPAD_` environment overrides
//! (nested keys separated by `__`, e.g. `LAUNCHPAD_CHAIN__CHAIN_ID=1`).

use crate::constants::defaults;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use launch_types::{units, Address, U256};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main launchpad configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct LaunchpadConfig {
    /// Ledger runtime settings
    pub chain: ChainConfig,

    /// Control plane ownership
    pub governance: GovernanceConfig,

    /// Creation rules
    pub registry: RegistryConfig,

    /// Log filter
    pub logging: LoggingConfig,
}

/// Ledger runtime settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub genesis_timestamp: u64,
    pub block_time_secs: u64,
}

/// Control plane ownership
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Hex address of the initial owner
    pub owner: String,
}

/// Creation rules
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Minimum opening reserve of a reserved asset, in whole units; any non-zero reserve passes at 0
    pub min_opening_reserve: u64,
}

/// Log filter
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: defaults::CHAIN_ID,
            genesis_timestamp: defaults::GENESIS_TIMESTAMP,
            block_time_secs: defaults::BLOCK_TIME_SECS,
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            owner: defaults::OWNER.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GovernanceConfig {
    /// Parse the configured owner address
    pub fn owner_address(&self) -> Result<Address> {
        self.owner
            .trim()
            .parse::<Address>()
            .with_context(|| format!("Invalid owner address '{}'", self.owner))
    }
}

impl RegistryConfig {
    /// Minimum opening reserve in native units
    pub fn min_opening_reserve_native(&self) -> U256 {
        units::whole(self.min_opening_reserve)
    }
}

impl LaunchpadConfig {
    /// Load configuration from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading launchpad config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        } else {
            debug!("No config file given, using defaults");
        }

        // Override with environment variables (LAUNCHPAD_ prefix)
        builder = builder.add_source(
            Environment::with_prefix("LAUNCHPAD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let loaded: Self = toml::from_str(text).context("Failed to parse TOML configuration")?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.governance.owner_address()?;
        if self.chain.chain_id == 0 {
            anyhow::bail!("chain_id must be non-zero");
        }
        Ok(())
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<LaunchpadConfig> {
    LaunchpadConfig::load(path)
}
