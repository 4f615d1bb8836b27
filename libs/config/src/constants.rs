//! Launchpad constants
//!
//! Fee tiers and storage namespaces. These are part of the deployed
//! contract's observable behavior, so they are constants rather than config.

/// Creation commission tiers, keyed by ticker length in characters
pub mod commission {
    /// `(minimum length, fee in whole reserve units)`, longest tickers first
    pub const TIERS: [(usize, u64); 4] = [(7, 250), (6, 2_500), (5, 25_000), (4, 250_000)];

    /// Fee for tickers of three characters or fewer
    pub const SHORT_TICKER_FEE: u64 = 2_500_000;

    /// Fee in whole units for a ticker of `length` characters
    pub fn fee_units_for_length(length: usize) -> u64 {
        TIERS
            .iter()
            .find(|(min_length, _)| length >= *min_length)
            .map(|(_, fee)| *fee)
            .unwrap_or(SHORT_TICKER_FEE)
    }
}

/// Storage namespaces hashed into fixed slots
pub mod storage {
    /// Registry aggregate of the control plane
    pub const REGISTRY_NAMESPACE: &str = "launchpad.storage.registry";

    /// Per-instance asset state
    pub const ASSET_NAMESPACE: &str = "launchpad.storage.asset";

    /// ERC-1967 implementation slot preimage
    pub const IMPLEMENTATION_NAMESPACE: &str = "eip1967.proxy.implementation";

    /// ERC-1967 beacon slot preimage
    pub const BEACON_NAMESPACE: &str = "eip1967.proxy.beacon";

    /// Beacon owner slot preimage
    pub const BEACON_OWNER_NAMESPACE: &str = "launchpad.storage.beacon.owner";
}

/// Defaults for a local in-memory deployment
pub mod defaults {
    /// Chain id used for permit domain separation
    pub const CHAIN_ID: u64 = 31_337;

    /// Genesis timestamp (2024-01-01T00:00:00Z)
    pub const GENESIS_TIMESTAMP: u64 = 1_704_067_200;

    /// Seconds added per sealed block
    pub const BLOCK_TIME_SECS: u64 = 2;

    /// Owner of the control plane when none is configured
    pub const OWNER: &str = "0x00000000000000000000000000000000000000a1";
}
