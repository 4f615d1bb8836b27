//! Error types for native-unit conversion and metadata validation
//!
//! Conversion errors cover the boundary between on-ledger integer amounts and
//! `Decimal` pricing math; validation errors cover value objects that are
//! checked before they reach a deployment.

use thiserror::Error;

/// Errors that can occur while validating asset parameters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ticker symbol is empty
    #[error("symbol cannot be empty")]
    EmptySymbol,

    /// Display name is empty
    #[error("name cannot be empty")]
    EmptyName,

    /// Reserve ratio outside of the 0..=100 range
    #[error("ratio {ratio} is outside the allowed range [0, {max}]")]
    RatioOutOfRange { ratio: u8, max: u8 },

    /// Supply bounds are inconsistent with the initial mint
    #[error("supply bounds violated: min {min}, initial {initial}, max {max}")]
    SupplyBounds {
        min: String,
        initial: String,
        max: String,
    },

    /// A reserved asset must start with a non-empty supply
    #[error("initial mint must be non-zero")]
    ZeroInitialMint,

    /// Supply ceiling beyond what pricing math can represent
    #[error("max total supply {max} exceeds the priceable limit {limit}")]
    SupplyUnpriceable { max: String, limit: String },

    /// Initial mint exceeds a non-zero cap
    #[error("initial mint {initial} exceeds cap {cap}")]
    CapExceeded { initial: String, cap: String },
}

/// Errors that can occur converting between native integers and decimals
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitsError {
    /// Value does not fit into the decimal mantissa
    #[error("Overflow: {value} cannot be represented as a decimal")]
    Overflow { value: String },

    /// Negative decimals have no native representation
    #[error("Negative amount {value} has no native representation")]
    Negative { value: String },

    /// Invalid decimal string format
    #[error("Invalid amount string: '{input}' - expected numeric format")]
    InvalidAmount { input: String },
}
