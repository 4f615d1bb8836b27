//! # Launchpad Centralized Configuration
//!
//! Centralized configuration management and constants for the launchpad
//! control plane, the ledger simulation and the CLI.
//!
//! ## Features
//!
//! - **Commission Constants**: ticker-length fee tiers in whole reserve units
//! - **Storage Constants**: namespaces from which fixed storage slots derive
//! - **Service Configuration**: chain, governance, registry and logging
//!   settings loaded from TOML with `LAUNCHPAD_` environment overrides
//!
//! ## Usage
//!
//! ```rust
//! use launch_config::{commission, LaunchpadConfig};
//!
//! assert_eq!(commission::fee_units_for_length(3), 2_500_000);
//! let config = LaunchpadConfig::default();
//! assert!(config.chain.chain_id > 0);
//! ```

pub mod constants;
pub mod launchpad_config;

// Re-export commonly used types
pub use constants::*;
pub use launchpad_config::{
    load_config, ChainConfig, GovernanceConfig, LaunchpadConfig, LoggingConfig, RegistryConfig,
};
