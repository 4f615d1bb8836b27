//! ERC-1967 implementation slot of the control plane itself

use crate::error::{LaunchpadError, LaunchpadResult};
use launch_types::Address;
use ledger::beacon::implementation_slot;
use ledger::{Ledger, LedgerError};

/// Reads and writes the control plane's own implementation pointer
#[derive(Debug, Clone, Copy)]
pub struct UpgradeSlot {
    proxy: Address,
}

impl UpgradeSlot {
    pub fn new(proxy: Address) -> Self {
        Self { proxy }
    }

    pub fn implementation(&self, ledger: &Ledger) -> Address {
        ledger
            .storage(self.proxy)
            .and_then(|storage| storage.get::<Address>(&implementation_slot()))
            .copied()
            .unwrap_or_default()
    }

    /// Point the slot at `new_implementation`, which must be new and hold code
    pub fn upgrade_to(&self, ledger: &mut Ledger, new_implementation: Address) -> LaunchpadResult<()> {
        if new_implementation.is_zero() || new_implementation == self.implementation(ledger) {
            return Err(LaunchpadError::InvalidAddress);
        }
        if !ledger.has_code(new_implementation) {
            return Err(LedgerError::NotAContract(new_implementation).into());
        }
        ledger
            .storage_mut(self.proxy)
            .insert(implementation_slot(), new_implementation);
        Ok(())
    }
}
