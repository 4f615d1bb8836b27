//! Asset metadata supplied at creation time
//!
//! `TokenMetadata` describes a reserved (bonding-curve backed) asset and
//! `ReservelessParams` a plain supply-capped asset. Both are immutable once the
//! asset is deployed; after that the deployed instance owns them.

use crate::common::errors::ValidationError;
use crate::units;
use ethereum_types::{Address, U256};
use serde::{Deserialize, Serialize};

/// Upper bound of the reserve ratio (a percentage)
pub const MAX_RATIO: u8 = 100;

/// Implementation family of a deployed asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Bonding-curve assets backed by a native reserve
    Reserved,
    /// Plain assets with optional mint/burn and a supply cap
    Reserveless,
}

impl Family {
    pub fn label(&self) -> &'static str {
        match self {
            Family::Reserved => "reserved",
            Family::Reserveless => "reserveless",
        }
    }
}

/// Metadata of a reserved-family asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Display name
    pub name: String,
    /// Logical ticker, globally unique across the reserved family
    pub symbol: String,
    /// Opaque descriptor (URI, content hash, ...)
    pub identity: String,
    /// Principal receiving the initial mint
    pub creator: Address,
    /// Collateral/reserve ratio in percent, 0..=100
    pub ratio: u8,
    /// Amount minted to the creator at deployment
    pub initial_mint: U256,
    /// Supply floor enforced on sells
    pub min_total_supply: U256,
    /// Supply ceiling enforced on buys
    pub max_total_supply: U256,
}

impl TokenMetadata {
    /// Ticker length in logical characters, not bytes
    pub fn symbol_length(&self) -> usize {
        self.symbol.chars().count()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.ratio > MAX_RATIO {
            return Err(ValidationError::RatioOutOfRange {
                ratio: self.ratio,
                max: MAX_RATIO,
            });
        }
        if self.initial_mint.is_zero() {
            return Err(ValidationError::ZeroInitialMint);
        }
        if self.max_total_supply > units::max_priceable() {
            return Err(ValidationError::SupplyUnpriceable {
                max: self.max_total_supply.to_string(),
                limit: units::max_priceable().to_string(),
            });
        }
        if self.min_total_supply > self.initial_mint || self.initial_mint > self.max_total_supply
        {
            return Err(ValidationError::SupplyBounds {
                min: self.min_total_supply.to_string(),
                initial: self.initial_mint.to_string(),
                max: self.max_total_supply.to_string(),
            });
        }
        Ok(())
    }
}

/// Creation parameters of a reserveless-family asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservelessParams {
    pub name: String,
    pub symbol: String,
    pub mintable: bool,
    pub burnable: bool,
    pub initial_mint: U256,
    /// Supply cap, zero means uncapped
    pub cap: U256,
    pub identity: String,
}

impl ReservelessParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.cap.is_zero() && self.initial_mint > self.cap {
            return Err(ValidationError::CapExceeded {
                initial: self.initial_mint.to_string(),
                cap: self.cap.to_string(),
            });
        }
        Ok(())
    }
}
