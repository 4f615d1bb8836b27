//! Control plane errors
//!
//! Every variant aborts the enclosing operation; the ledger world and the
//! registry are restored to their state before the call.

use ledger::LedgerError;
use launch_types::{Address, U256};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchpadError {
    #[error("Opening reserve below the minimum of {0}")]
    InvalidMinReserve(U256),

    #[error("Attached value below the required commission of {0}")]
    InvalidComission(U256),

    #[error("Token symbol already registered")]
    TokenSymbolExist,

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Deployed at {deployed:?}, predicted {predicted:?}")]
    DeployTokenError { predicted: Address, deployed: Address },

    #[error("Operation is paused")]
    EnforcedPause,

    #[error("Operation requires the paused state")]
    ExpectedPause,

    #[error("Account {0:?} is not the owner")]
    OwnableUnauthorizedAccount(Address),

    #[error("Control plane already initialized or not initialized")]
    InvalidInitialization,

    #[error("Ledger: {0}")]
    Ledger(#[from] LedgerError),
}

pub type LaunchpadResult<T> = Result<T, LaunchpadError>;
