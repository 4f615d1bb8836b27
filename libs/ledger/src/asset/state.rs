//! Per-instance asset storage

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::slots::namespaced_slot;
use ethereum_types::{Address, H256, U256};
use launch_config::storage::ASSET_NAMESPACE;
use std::collections::BTreeMap;

pub fn asset_slot() -> H256 {
    namespaced_slot(ASSET_NAMESPACE)
}

/// Family-specific terms fixed at initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetProfile {
    Reserved {
        creator: Address,
        ratio: u8,
        min_total_supply: U256,
        max_total_supply: U256,
    },
    Reserveless {
        owner: Address,
        mintable: bool,
        burnable: bool,
        /// Zero means uncapped
        cap: U256,
    },
}

/// Token ledger of one instance, stored in the proxy's own storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetState {
    pub name: String,
    pub symbol: String,
    pub identity: String,
    pub total_supply: U256,
    pub balances: BTreeMap<Address, U256>,
    pub allowances: BTreeMap<(Address, Address), U256>,
    pub nonces: BTreeMap<Address, U256>,
    pub profile: AssetProfile,
}

impl AssetState {
    pub fn new(name: String, symbol: String, identity: String, profile: AssetProfile) -> Self {
        Self {
            name,
            symbol,
            identity,
            total_supply: U256::zero(),
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            nonces: BTreeMap::new(),
            profile,
        }
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn nonce(&self, owner: Address) -> U256 {
        self.nonces.get(&owner).copied().unwrap_or_default()
    }

    pub(crate) fn consume_nonce(&mut self, owner: Address) -> U256 {
        let current = self.nonce(owner);
        self.nonces.insert(owner, current + 1);
        current
    }

    pub(crate) fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        self.allowances.insert((owner, spender), value);
    }

    /// Decrease an allowance; `U256::MAX` is an infinite approval
    pub(crate) fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        let allowance = self.allowance(owner, spender);
        if allowance == U256::MAX {
            return Ok(());
        }
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner,
                spender,
                allowance,
                needed: amount,
            });
        }
        self.set_allowance(owner, spender, allowance - amount);
        Ok(())
    }

    fn debit(&mut self, from: Address, amount: U256) -> LedgerResult<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                balance,
                needed: amount,
            });
        }
        self.balances.insert(from, balance - amount);
        Ok(())
    }

    // Balances never exceed total supply, so crediting cannot overflow once
    // the supply itself has been checked.
    fn credit(&mut self, to: Address, amount: U256) {
        let balance = self.balance_of(to);
        self.balances.insert(to, balance + amount);
    }

    pub(crate) fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    pub(crate) fn mint(&mut self, to: Address, amount: U256) -> LedgerResult<()> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("total supply"))?;
        self.credit(to, amount);
        Ok(())
    }

    pub(crate) fn burn(&mut self, from: Address, amount: U256) -> LedgerResult<()> {
        self.debit(from, amount)?;
        self.total_supply -= amount;
        Ok(())
    }
}

impl Ledger {
    pub fn asset_state(&self, token: Address) -> LedgerResult<&AssetState> {
        self.storage(token)
            .and_then(|storage| storage.get::<AssetState>(&asset_slot()))
            .ok_or(LedgerError::NotInitialized(token))
    }

    pub fn asset_state_mut(&mut self, token: Address) -> LedgerResult<&mut AssetState> {
        self.storage_mut(token)
            .get_mut::<AssetState>(&asset_slot())
            .ok_or(LedgerError::NotInitialized(token))
    }

    /// Store the initial state of an instance, once
    pub(crate) fn init_asset_state(&mut self, token: Address, state: AssetState) -> LedgerResult<()> {
        let storage = self.storage_mut(token);
        if storage.contains(&asset_slot()) {
            return Err(LedgerError::AlreadyInitialized(token));
        }
        storage.insert(asset_slot(), state);
        Ok(())
    }
}
