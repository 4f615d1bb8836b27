//! Registry aggregate
//!
//! The whole registry lives in one storage slot of the control plane account,
//! so ledger checkpoints cover it and a later layout can append fields without
//! moving existing ones.

use crate::error::{LaunchpadError, LaunchpadResult};
use crate::governance::{OwnershipGate, PauseGate};
use launch_config::storage::REGISTRY_NAMESPACE;
use launch_types::{Address, H256};
use ledger::namespaced_slot;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// `keccak256("launchpad.storage.registry") - 1`
pub static REGISTRY_SLOT: Lazy<H256> = Lazy::new(|| namespaced_slot(REGISTRY_NAMESPACE));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryState {
    /// Symbol to instance; entries are inserted once and never replaced
    pub tokens: BTreeMap<String, Address>,
    pub reserved_implementation: Address,
    pub reserveless_implementation: Address,
    pub reserveless_beacon: Address,
    /// External directory service, informational only
    pub contract_center: Address,
    pub pause: PauseGate,
    pub ownership: OwnershipGate,
}

impl RegistryState {
    pub fn new(
        owner: Address,
        reserved_implementation: Address,
        reserveless_implementation: Address,
        reserveless_beacon: Address,
    ) -> Self {
        Self {
            tokens: BTreeMap::new(),
            reserved_implementation,
            reserveless_implementation,
            reserveless_beacon,
            contract_center: Address::zero(),
            pause: PauseGate::default(),
            ownership: OwnershipGate::new(owner),
        }
    }

    pub fn token(&self, symbol: &str) -> Option<Address> {
        self.tokens.get(symbol).copied()
    }

    /// Record a verified deployment under a fresh symbol
    pub fn register(&mut self, symbol: &str, token: Address) -> LaunchpadResult<()> {
        if self.tokens.contains_key(symbol) {
            return Err(LaunchpadError::TokenSymbolExist);
        }
        self.tokens.insert(symbol.to_string(), token);
        Ok(())
    }

    /// Reserved implementation as seen through the pause gate
    pub fn active_reserved_implementation(&self) -> Address {
        if self.pause.paused() {
            Address::zero()
        } else {
            self.reserved_implementation
        }
    }

    pub fn active_reserveless_implementation(&self) -> Address {
        if self.pause.paused() {
            Address::zero()
        } else {
            self.reserveless_implementation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RegistryState {
        RegistryState::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            Address::repeat_byte(4),
        )
    }

    #[test]
    fn test_register_is_insert_once() {
        let mut state = state();
        state.register("ABC", Address::repeat_byte(9)).unwrap();
        assert_eq!(
            state.register("ABC", Address::repeat_byte(8)),
            Err(LaunchpadError::TokenSymbolExist)
        );
        assert_eq!(state.token("ABC"), Some(Address::repeat_byte(9)));
    }

    #[test]
    fn test_pause_hides_pointers_without_clearing_them() {
        let mut state = state();
        state.pause.pause().unwrap();
        assert_eq!(state.active_reserved_implementation(), Address::zero());
        assert_eq!(state.active_reserveless_implementation(), Address::zero());
        assert_eq!(state.reserved_implementation, Address::repeat_byte(2));

        state.pause.unpause().unwrap();
        assert_eq!(state.active_reserved_implementation(), Address::repeat_byte(2));
    }

    #[test]
    fn test_registry_slot() {
        assert_eq!(*REGISTRY_SLOT, namespaced_slot("launchpad.storage.registry"));
    }
}
