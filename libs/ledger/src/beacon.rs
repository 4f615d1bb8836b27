//! Beacon indirection
//!
//! Every asset instance is a beacon proxy: it stores only its beacon's
//! address and asks the beacon for the current implementation on each call.
//! Re-pointing one beacon therefore upgrades every instance behind it without
//! touching per-instance storage.

use crate::error::{LedgerError, LedgerResult};
use crate::slots::{namespaced_slot, SlotMap};
use ethereum_types::{Address, H256};
use launch_config::storage::{BEACON_OWNER_NAMESPACE, IMPLEMENTATION_NAMESPACE};
use std::fmt;
use tracing::info;

/// Logic of an account that serves an implementation address
pub trait BeaconLogic: fmt::Debug + Send + Sync {
    /// Current implementation, `Address::zero()` when none is active
    fn implementation(&self, storage: &SlotMap) -> Address;

    /// Re-point the beacon; most beacons are governed elsewhere
    fn upgrade_to(
        &self,
        _storage: &mut SlotMap,
        _sender: Address,
        _new_implementation: Address,
    ) -> LedgerResult<()> {
        Err(LedgerError::Unsupported("upgrade_to"))
    }
}

pub fn implementation_slot() -> H256 {
    namespaced_slot(IMPLEMENTATION_NAMESPACE)
}

pub fn owner_slot() -> H256 {
    namespaced_slot(BEACON_OWNER_NAMESPACE)
}

/// Owner-controlled beacon holding its implementation in storage
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeableBeacon;

impl UpgradeableBeacon {
    /// Storage of a freshly deployed beacon
    pub fn genesis_storage(owner: Address, implementation: Address) -> SlotMap {
        let mut storage = SlotMap::default();
        storage.insert(owner_slot(), owner);
        storage.insert(implementation_slot(), implementation);
        storage
    }

    pub fn owner(storage: &SlotMap) -> Address {
        storage.get::<Address>(&owner_slot()).copied().unwrap_or_default()
    }
}

impl BeaconLogic for UpgradeableBeacon {
    fn implementation(&self, storage: &SlotMap) -> Address {
        storage
            .get::<Address>(&implementation_slot())
            .copied()
            .unwrap_or_default()
    }

    fn upgrade_to(
        &self,
        storage: &mut SlotMap,
        sender: Address,
        new_implementation: Address,
    ) -> LedgerResult<()> {
        if Self::owner(storage) != sender {
            return Err(LedgerError::Unauthorized(sender));
        }
        storage.insert(implementation_slot(), new_implementation);
        info!("🔁 Beacon re-pointed to {:?}", new_implementation);
        Ok(())
    }
}
