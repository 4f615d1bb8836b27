//! # Ledger
//!
//! Deterministic in-process ledger runtime for the launchpad.
//!
//! ## Features
//!
//! - **Accounts**: native balances, nonces, code and namespaced typed storage
//! - **Content-addressed deployment**: EIP-1014 style addresses for beacon
//!   proxies, computed from the same init code the runtime deploys
//! - **Beacon indirection**: instances resolve their logic through a beacon on
//!   every call, so re-pointing a beacon upgrades a whole family
//! - **Assets**: bonding-curve and reserveless token logic with an ERC-20
//!   surface and EIP-2612 permits
//! - **Atomicity**: checkpoint/restore of the entire world around any step
//!
//! ## Usage
//!
//! ```rust
//! use ledger::{asset::PlainToken, asset::abi, Ledger};
//! use launch_types::{Address, H256, ReservelessParams, U256};
//! use std::sync::Arc;
//!
//! let mut ledger = Ledger::new(1, 0);
//! let owner = Address::repeat_byte(1);
//! let implementation = ledger.deploy_asset_logic(owner, Arc::new(PlainToken::new())).unwrap();
//! let beacon = ledger.deploy_beacon(owner, implementation).unwrap();
//!
//! let params = ReservelessParams {
//!     name: "Plain".into(),
//!     symbol: "PLN".into(),
//!     mintable: true,
//!     burnable: true,
//!     initial_mint: U256::from(1_000),
//!     cap: U256::zero(),
//!     identity: String::new(),
//! };
//! let init = abi::encode_reserveless_init(&params, owner).unwrap();
//! let token = ledger.create2(owner, H256::zero(), beacon, &init, U256::zero()).unwrap();
//! assert_eq!(ledger.asset(token).symbol().unwrap(), "PLN");
//! ```

pub mod asset;
pub mod beacon;
pub mod create2;
pub mod error;
pub mod ledger;
pub mod log;
pub mod slots;
pub mod world;

pub use asset::{AssetClient, AssetLogic, AssetView, BondingToken, Frame, Permit, PlainToken};
pub use beacon::{BeaconLogic, UpgradeableBeacon};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use log::LogEntry;
pub use slots::{namespaced_slot, SlotMap};
pub use world::{Account, Code, WorldState};
