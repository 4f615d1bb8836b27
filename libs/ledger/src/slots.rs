//! Namespaced typed storage
//!
//! Every account owns a `SlotMap`: values keyed by a 256-bit slot id derived
//! from a namespace string, `keccak256(namespace) - 1`. Values are shared
//! behind `Arc` so cloning the whole world for a checkpoint is cheap; a slot
//! is copied only when it is written after a checkpoint.

use ethereum_types::{H256, U256};
use launch_types::keccak256;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type SlotValue = Arc<dyn Any + Send + Sync>;

/// Slot id for a namespace: `keccak256(namespace) - 1`
pub fn namespaced_slot(namespace: &str) -> H256 {
    let hashed = U256::from_big_endian(keccak256(namespace.as_bytes()).as_bytes());
    let (slot, _) = hashed.overflowing_sub(U256::one());
    let mut bytes = [0u8; 32];
    slot.to_big_endian(&mut bytes);
    H256(bytes)
}

#[derive(Clone, Default)]
pub struct SlotMap {
    slots: BTreeMap<H256, SlotValue>,
}

impl SlotMap {
    pub fn get<T: Any + Send + Sync>(&self, slot: &H256) -> Option<&T> {
        self.slots.get(slot)?.downcast_ref::<T>()
    }

    /// Mutable access, detaching the value from any checkpoint sharing it
    pub fn get_mut<T: Any + Clone + Send + Sync>(&mut self, slot: &H256) -> Option<&mut T> {
        let entry = self.slots.get_mut(slot)?;
        if Arc::get_mut(entry).is_none() {
            let detached: T = entry.downcast_ref::<T>()?.clone();
            let fresh: SlotValue = Arc::new(detached);
            *entry = fresh;
        }
        Arc::get_mut(entry)?.downcast_mut::<T>()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, slot: H256, value: T) {
        let value: SlotValue = Arc::new(value);
        self.slots.insert(slot, value);
    }

    pub fn contains(&self, slot: &H256) -> bool {
        self.slots.contains_key(slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for SlotMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.slots.keys()).finish()
    }
}
