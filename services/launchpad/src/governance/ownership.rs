//! Single-owner access control

use crate::error::{LaunchpadError, LaunchpadResult};
use launch_types::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipGate {
    owner: Address,
}

impl OwnershipGate {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn only_owner(&self, caller: Address) -> LaunchpadResult<()> {
        if caller != self.owner || self.owner.is_zero() {
            return Err(LaunchpadError::OwnableUnauthorizedAccount(caller));
        }
        Ok(())
    }

    /// Hand control to `new_owner`, returning the previous owner
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> LaunchpadResult<Address> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LaunchpadError::InvalidAddress);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Give up control permanently; every owner-gated call fails afterwards
    pub fn renounce_ownership(&mut self, caller: Address) -> LaunchpadResult<Address> {
        self.only_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, Address::zero()))
    }
}
