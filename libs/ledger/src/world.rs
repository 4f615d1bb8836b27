//! Accounts and world state

use crate::asset::AssetLogic;
use crate::beacon::BeaconLogic;
use crate::log::LogEntry;
use crate::slots::SlotMap;
use ethereum_types::{Address, H256, U256};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Code attached to an account
#[derive(Debug, Clone)]
pub enum Code {
    /// Asset implementation shared by every proxy that resolves to it
    Asset(Arc<dyn AssetLogic>),
    /// Beacon proxy; per-instance state lives in the proxy's own storage
    BeaconProxy { beacon: Address },
    /// Account serving an implementation address
    Beacon(Arc<dyn BeaconLogic>),
    /// Code the runtime does not interpret, identified by its hash
    Opaque(H256),
}

impl Code {
    pub fn kind(&self) -> &'static str {
        match self {
            Code::Asset(_) => "asset",
            Code::BeaconProxy { .. } => "beacon-proxy",
            Code::Beacon(_) => "beacon",
            Code::Opaque(_) => "opaque",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Account {
    pub nonce: u64,
    pub balance: U256,
    pub code: Option<Code>,
    pub storage: SlotMap,
}

/// Everything a checkpoint captures
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    pub accounts: BTreeMap<Address, Account>,
    pub logs: Vec<LogEntry>,
    pub timestamp: u64,
    pub block_number: u64,
}

impl WorldState {
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn account_mut(&mut self, address: Address) -> &mut Account {
        self.accounts.entry(address).or_default()
    }
}
