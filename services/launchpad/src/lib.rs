//! # Launchpad
//!
//! Issuance-and-exchange control plane for bonding-curve assets running on the
//! in-process [`ledger`] runtime.
//!
//! ## Components
//!
//! - **CommissionSchedule**: ticker-length fee tiers, burned on creation
//! - **DeterministicFactory**: predicts, deploys and verifies instance addresses
//! - **Registry**: symbol-unique, append-only map of reserved-family instances
//! - **ConversionEngine**: atomic sell-then-buy between two assets
//! - **Governance**: owner gate, pause gate and self-upgrade slot
//!
//! ## Usage
//!
//! ```rust
//! use launchpad::Launchpad;
//! use launch_types::{units, Address, TokenMetadata};
//! use ledger::Ledger;
//!
//! let owner = Address::repeat_byte(0xa1);
//! let creator = Address::repeat_byte(0x01);
//! let mut lp = Launchpad::deploy(Ledger::new(1, 0), owner, Default::default()).unwrap();
//! lp.ledger_mut().mint_native(creator, units::whole(1_000));
//!
//! let meta = TokenMetadata {
//!     name: "Alpha".into(),
//!     symbol: "ALPHABET".into(),
//!     identity: "ipfs://alpha".into(),
//!     creator,
//!     ratio: 50,
//!     initial_mint: units::whole(1_000),
//!     min_total_supply: units::whole(1),
//!     max_total_supply: units::whole(1_000_000),
//! };
//! // 250 commission for an 8-character ticker, 50 opening reserve
//! let token = lp.create_token(creator, meta, units::whole(300)).unwrap();
//! assert_eq!(lp.tokens("ALPHABET").unwrap(), token);
//! assert!(lp.is_token_exists(token).unwrap());
//! ```

#[macro_use]
pub mod logging;

pub mod abi;
pub mod commission;
pub mod conversion;
pub mod error;
pub mod factory;
pub mod governance;
pub mod launchpad;
pub mod registry;
pub mod shared;
pub mod state;

pub use abi::GovernanceCall;
pub use commission::CommissionSchedule;
pub use conversion::{ConversionRequest, PermitSignature};
pub use error::{LaunchpadError, LaunchpadResult};
pub use factory::DeterministicFactory;
pub use governance::{OwnershipGate, PauseGate, UpgradeSlot};
pub use launchpad::{ControlPlaneBeacon, Launchpad};
pub use shared::SharedLaunchpad;
pub use state::{RegistryState, REGISTRY_SLOT};
