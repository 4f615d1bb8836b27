//! # Launchpad Shared Types
//!
//! Primitive vocabulary shared by every crate in the workspace.
//!
//! ## Design Philosophy
//!
//! - **Ledger-native primitives**: addresses, hashes and amounts are the
//!   `ethereum-types` `H160`/`H256`/`U256` used by the ABI and hashing layers
//! - **No Precision Loss**: on-ledger amounts are integers in the native
//!   denomination (18 decimals); conversion to `Decimal` only happens at the
//!   pricing boundary and is checked in both directions
//! - **Validated value objects**: asset metadata is validated once, before it is
//!   encoded into deployment arguments
//!
//! ## Quick Start
//!
//! ```rust
//! use launch_types::{keccak256, units, TokenMetadata, Address};
//!
//! let meta = TokenMetadata {
//!     name: "Alpha".into(),
//!     symbol: "ALPHA".into(),
//!     identity: "ipfs://alpha".into(),
//!     creator: Address::repeat_byte(0x11),
//!     ratio: 50,
//!     initial_mint: units::whole(1_000),
//!     min_total_supply: units::whole(1),
//!     max_total_supply: units::whole(1_000_000),
//! };
//! assert!(meta.validate().is_ok());
//! assert_eq!(meta.symbol_length(), 5);
//! let _salt = keccak256(meta.symbol.as_bytes());
//! ```

pub mod common;
pub mod metadata;
pub mod units;

pub use common::errors::{UnitsError, ValidationError};
pub use common::hashing::{keccak256, low160};
pub use ethereum_types::{Address, H256, U256};
pub use metadata::{Family, ReservelessParams, TokenMetadata, MAX_RATIO};

/// Convenience result alias for validation of value objects
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
