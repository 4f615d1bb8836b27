//! Ledger runtime errors
//!
//! Any error returned from inside [`Ledger::atomically`](crate::Ledger::atomically)
//! discards every effect of the enclosing step.

use launch_curve::CurveError;
use launch_types::{Address, ValidationError, U256};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {account:?} holds {balance} native units, needs {needed}")]
    InsufficientNativeBalance {
        account: Address,
        balance: U256,
        needed: U256,
    },

    #[error("Account {account:?} holds {balance} tokens, needs {needed}")]
    InsufficientBalance {
        account: Address,
        balance: U256,
        needed: U256,
    },

    #[error("Spender {spender:?} may move {allowance} of {owner:?}'s tokens, needs {needed}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: U256,
        needed: U256,
    },

    #[error("Invalid receiver {0:?}")]
    InvalidReceiver(Address),

    #[error("Address {0:?} already holds code")]
    AddressOccupied(Address),

    #[error("Address {0:?} holds no contract code")]
    NotAContract(Address),

    #[error("Address {0:?} is not an asset instance")]
    NotAnAsset(Address),

    #[error("Address {0:?} is not a beacon")]
    NotABeacon(Address),

    #[error("No active implementation behind {0:?}")]
    ImplementationNotSet(Address),

    #[error("Account {0:?} is not authorized")]
    Unauthorized(Address),

    #[error("Asset {0:?} is already initialized")]
    AlreadyInitialized(Address),

    #[error("Asset {0:?} is not initialized")]
    NotInitialized(Address),

    #[error("Operation '{0}' is not supported by this asset family")]
    Unsupported(&'static str),

    #[error("Output {actual} is below the minimum {minimum}")]
    Slippage { minimum: U256, actual: U256 },

    #[error("Supply would fall to {remaining}, below the floor {minimum}")]
    SupplyBelowMinimum { remaining: U256, minimum: U256 },

    #[error("Supply would reach {resulting}, above the ceiling {maximum}")]
    SupplyAboveMaximum { resulting: U256, maximum: U256 },

    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("Supply would reach {resulting}, above the cap {cap}")]
    CapExceeded { resulting: U256, cap: U256 },

    #[error("Permit expired at {deadline}, now {now}")]
    PermitExpired { deadline: U256, now: u64 },

    #[error("Permit signed by {recovered:?}, expected {expected:?}")]
    InvalidSigner { recovered: Address, expected: Address },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid calldata: {0}")]
    InvalidCalldata(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Pricing failed: {0}")]
    Curve(#[from] CurveError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
