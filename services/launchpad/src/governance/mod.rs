//! Governance control plane
//!
//! Ownership, pause and self-upgrade are separate capabilities composed into
//! the registry aggregate rather than layered through inheritance. Every
//! operation here is owner-only.

pub mod ownership;
pub mod pause;
pub mod upgrade;

pub use ownership::OwnershipGate;
pub use pause::PauseGate;
pub use upgrade::UpgradeSlot;

use crate::abi::{self, GovernanceCall};
use crate::error::{LaunchpadError, LaunchpadResult};
use crate::launchpad::Launchpad;
use launch_types::Address;

impl Launchpad {
    fn only_owner(&self, caller: Address) -> LaunchpadResult<()> {
        self.registry()?.ownership.only_owner(caller)
    }

    pub fn pause(&mut self, caller: Address) -> LaunchpadResult<()> {
        self.atomically(|lp| lp.pause_inner(caller))
    }

    pub fn unpause(&mut self, caller: Address) -> LaunchpadResult<()> {
        self.atomically(|lp| lp.unpause_inner(caller))
    }

    /// Swap the reserved-family implementation behind every instance
    pub fn upgrade_token(&mut self, caller: Address, new_implementation: Address) -> LaunchpadResult<()> {
        self.atomically(|lp| lp.upgrade_token_inner(caller, new_implementation))
    }

    /// Swap the reserveless-family implementation and re-point its beacon
    pub fn upgrade_token_reserveless(
        &mut self,
        caller: Address,
        new_implementation: Address,
    ) -> LaunchpadResult<()> {
        self.atomically(|lp| lp.upgrade_token_reserveless_inner(caller, new_implementation))
    }

    pub fn set_contract_center(&mut self, caller: Address, contract_center: Address) -> LaunchpadResult<()> {
        self.atomically(|lp| lp.set_contract_center_inner(caller, contract_center))
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> LaunchpadResult<()> {
        self.atomically(|lp| lp.transfer_ownership_inner(caller, new_owner))
    }

    pub fn renounce_ownership(&mut self, caller: Address) -> LaunchpadResult<()> {
        self.atomically(|lp| lp.renounce_ownership_inner(caller))
    }

    /// Replace the control plane's own implementation
    ///
    /// Non-empty `init_calldata` must encode one governance call; it runs with
    /// the caller's authority inside the same atomic step.
    pub fn upgrade(
        &mut self,
        caller: Address,
        new_implementation: Address,
        init_calldata: &[u8],
    ) -> LaunchpadResult<()> {
        self.atomically(|lp| {
            lp.only_owner(caller)?;
            UpgradeSlot::new(lp.address).upgrade_to(&mut lp.ledger, new_implementation)?;
            lp.emit(abi::upgraded(new_implementation));
            log_governance!("Control plane upgraded to {:?}", new_implementation);

            if !init_calldata.is_empty() {
                let call = GovernanceCall::decode(init_calldata)?;
                lp.dispatch(caller, call)?;
            }
            Ok(())
        })
    }

    /// Execute a decoded governance call as `caller`
    pub fn dispatch(&mut self, caller: Address, call: GovernanceCall) -> LaunchpadResult<()> {
        match call {
            GovernanceCall::Pause => self.pause_inner(caller),
            GovernanceCall::Unpause => self.unpause_inner(caller),
            GovernanceCall::SetContractCenter(a) => self.set_contract_center_inner(caller, a),
            GovernanceCall::UpgradeToken(a) => self.upgrade_token_inner(caller, a),
            GovernanceCall::UpgradeTokenReserveless(a) => {
                self.upgrade_token_reserveless_inner(caller, a)
            }
            GovernanceCall::TransferOwnership(a) => self.transfer_ownership_inner(caller, a),
            GovernanceCall::RenounceOwnership => self.renounce_ownership_inner(caller),
        }
    }

    fn pause_inner(&mut self, caller: Address) -> LaunchpadResult<()> {
        self.only_owner(caller)?;
        self.registry_mut()?.pause.pause()?;
        tracing::info!("{} Launchpad paused", crate::logging::LogEmoji::PAUSE);
        Ok(())
    }

    fn unpause_inner(&mut self, caller: Address) -> LaunchpadResult<()> {
        self.only_owner(caller)?;
        self.registry_mut()?.pause.unpause()?;
        tracing::info!("{} Launchpad resumed", crate::logging::LogEmoji::RESUME);
        Ok(())
    }

    fn upgrade_token_inner(&mut self, caller: Address, new_implementation: Address) -> LaunchpadResult<()> {
        self.only_owner(caller)?;
        if new_implementation.is_zero() {
            return Err(LaunchpadError::InvalidAddress);
        }
        let registry = self.registry_mut()?;
        let old = std::mem::replace(&mut registry.reserved_implementation, new_implementation);
        self.emit(abi::token_upgraded(old, new_implementation));
        log_governance!("Reserved family {:?} -> {:?}", old, new_implementation);
        Ok(())
    }

    fn upgrade_token_reserveless_inner(
        &mut self,
        caller: Address,
        new_implementation: Address,
    ) -> LaunchpadResult<()> {
        self.only_owner(caller)?;
        if new_implementation.is_zero() {
            return Err(LaunchpadError::InvalidAddress);
        }
        let beacon = self.registry()?.reserveless_beacon;
        self.ledger
            .upgrade_beacon(self.address, beacon, new_implementation)?;

        let registry = self.registry_mut()?;
        let old = std::mem::replace(&mut registry.reserveless_implementation, new_implementation);
        self.emit(abi::token_reserveless_upgraded(old, new_implementation));
        log_governance!("Reserveless family {:?} -> {:?}", old, new_implementation);
        Ok(())
    }

    fn set_contract_center_inner(&mut self, caller: Address, contract_center: Address) -> LaunchpadResult<()> {
        self.only_owner(caller)?;
        self.registry_mut()?.contract_center = contract_center;
        Ok(())
    }

    fn transfer_ownership_inner(&mut self, caller: Address, new_owner: Address) -> LaunchpadResult<()> {
        let previous = self
            .registry_mut()?
            .ownership
            .transfer_ownership(caller, new_owner)?;
        self.emit(abi::ownership_transferred(previous, new_owner));
        log_governance!("Ownership {:?} -> {:?}", previous, new_owner);
        Ok(())
    }

    fn renounce_ownership_inner(&mut self, caller: Address) -> LaunchpadResult<()> {
        let previous = self.registry_mut()?.ownership.renounce_ownership(caller)?;
        self.emit(abi::ownership_transferred(previous, Address::zero()));
        log_governance!("Ownership renounced by {:?}", previous);
        Ok(())
    }
}
