//! # Ledger Runtime
//!
//! ## Purpose
//!
//! Deterministic, single-threaded execution environment that stands in for a
//! chain: accounts with native balances, code and namespaced storage, a clock,
//! an append-only event log and content-addressed deployment of beacon
//! proxies. Every state-changing call can be wrapped in [`Ledger::atomically`]
//! so that any error restores the complete world as it was before the call.
//!
//! ## Integration Points
//!
//! - **Input**: the launchpad control plane (deployment, value moves, governance)
//! - **Output**: resolved asset logic, event log consumed by ABI decoders
//! - **Collaborators**: [`AssetLogic`] implementations and [`BeaconLogic`] beacons
//!
//! ## Architecture Role
//!
//! ```text
//! caller ──► Ledger::atomically ──► create2 / transfer_value / asset calls
//!                   │                          │
//!                   ▼                          ▼
//!           WorldState checkpoint     proxy ─► beacon ─► implementation
//! ```
//!
//! Checkpoints are plain clones of [`WorldState`]; storage values are shared
//! behind `Arc` and only copied when written, so a checkpoint costs one map
//! clone per account rather than a deep copy.

use crate::asset::{AssetClient, AssetLogic, AssetView, Frame};
use crate::beacon::{BeaconLogic, UpgradeableBeacon};
use crate::create2;
use crate::error::{LedgerError, LedgerResult};
use crate::log::LogEntry;
use crate::slots::SlotMap;
use crate::world::{Code, WorldState};
use ethereum_types::{Address, H256, U256};
use launch_config::ChainConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Ledger {
    world: WorldState,
    chain_id: u64,
    block_time: u64,
    proxy_code: Vec<u8>,
}

impl Ledger {
    pub fn new(chain_id: u64, genesis_timestamp: u64) -> Self {
        Self {
            world: WorldState {
                timestamp: genesis_timestamp,
                ..WorldState::default()
            },
            chain_id,
            block_time: 1,
            proxy_code: create2::BEACON_PROXY_CREATION_CODE.to_vec(),
        }
    }

    pub fn from_config(config: &ChainConfig) -> Self {
        let mut ledger = Self::new(config.chain_id, config.genesis_timestamp);
        ledger.block_time = config.block_time_secs;
        ledger
    }

    /// Replace the proxy creation bytecode the runtime deploys
    ///
    /// Predictions made against the canonical template no longer match, which
    /// is how a factory/runtime drift shows up.
    pub fn with_proxy_code(mut self, code: Vec<u8>) -> Self {
        self.proxy_code = code;
        self
    }

    pub fn proxy_code(&self) -> &[u8] {
        &self.proxy_code
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    // --- clock ---

    pub fn timestamp(&self) -> u64 {
        self.world.timestamp
    }

    pub fn block_number(&self) -> u64 {
        self.world.block_number
    }

    pub fn advance_time(&mut self, secs: u64) {
        self.world.timestamp = self.world.timestamp.saturating_add(secs);
    }

    pub fn seal_block(&mut self) {
        self.world.block_number += 1;
        self.advance_time(self.block_time);
    }

    // --- native value ---

    pub fn balance_of(&self, account: Address) -> U256 {
        self.world
            .account(&account)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    pub fn nonce_of(&self, account: Address) -> u64 {
        self.world.account(&account).map(|a| a.nonce).unwrap_or(0)
    }

    /// Credit native value out of thin air (genesis allocations, faucets)
    pub fn mint_native(&mut self, to: Address, amount: U256) {
        let account = self.world.account_mut(to);
        account.balance = account.balance.saturating_add(amount);
    }

    pub fn transfer_value(&mut self, from: Address, to: Address, amount: U256) -> LedgerResult<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientNativeBalance {
                account: from,
                balance,
                needed: amount,
            });
        }
        self.world.account_mut(from).balance = balance - amount;
        let receiver = self.world.account_mut(to);
        receiver.balance = receiver
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("native balance"))?;
        Ok(())
    }

    // --- code and storage ---

    pub fn has_code(&self, account: Address) -> bool {
        self.code_at(account).is_some()
    }

    pub fn code_at(&self, account: Address) -> Option<&Code> {
        self.world.account(&account)?.code.as_ref()
    }

    pub fn storage(&self, account: Address) -> Option<&SlotMap> {
        self.world.account(&account).map(|a| &a.storage)
    }

    pub fn storage_mut(&mut self, account: Address) -> &mut SlotMap {
        &mut self.world.account_mut(account).storage
    }

    /// Attach code to an address that has none
    pub fn install_code(&mut self, at: Address, code: Code) -> LedgerResult<()> {
        if self.has_code(at) {
            return Err(LedgerError::AddressOccupied(at));
        }
        debug!("Installing {} code at {:?}", code.kind(), at);
        self.world.account_mut(at).code = Some(code);
        Ok(())
    }

    /// Deploy `code` at the next nonce-derived address of `deployer`
    pub fn deploy(&mut self, deployer: Address, code: Code) -> LedgerResult<Address> {
        let nonce = self.nonce_of(deployer);
        let address = create2::create_address(deployer, nonce);
        self.install_code(address, code)?;
        self.world.account_mut(deployer).nonce = nonce + 1;
        Ok(address)
    }

    pub fn deploy_asset_logic(
        &mut self,
        deployer: Address,
        logic: Arc<dyn AssetLogic>,
    ) -> LedgerResult<Address> {
        let version = logic.version();
        let family = logic.family();
        let address = self.deploy(deployer, Code::Asset(logic))?;
        info!(
            "📦 Deployed {} implementation v{} at {:?}",
            family.label(),
            version,
            address
        );
        Ok(address)
    }

    /// Deploy an owner-controlled beacon pointing at `implementation`
    pub fn deploy_beacon(&mut self, owner: Address, implementation: Address) -> LedgerResult<Address> {
        if !self.has_code(implementation) {
            return Err(LedgerError::NotAContract(implementation));
        }
        let beacon = self.deploy(owner, Code::Beacon(Arc::new(UpgradeableBeacon)))?;
        *self.storage_mut(beacon) = UpgradeableBeacon::genesis_storage(owner, implementation);
        Ok(beacon)
    }

    pub fn upgrade_beacon(
        &mut self,
        sender: Address,
        beacon: Address,
        new_implementation: Address,
    ) -> LedgerResult<()> {
        if !self.has_code(new_implementation) {
            return Err(LedgerError::NotAContract(new_implementation));
        }
        let logic = self.beacon_logic(beacon)?;
        logic.upgrade_to(self.storage_mut(beacon), sender, new_implementation)
    }

    pub fn beacon_implementation(&self, beacon: Address) -> LedgerResult<Address> {
        let logic = self.beacon_logic(beacon)?;
        let storage = self.storage(beacon).ok_or(LedgerError::NotABeacon(beacon))?;
        Ok(logic.implementation(storage))
    }

    fn beacon_logic(&self, beacon: Address) -> LedgerResult<Arc<dyn BeaconLogic>> {
        match self.code_at(beacon) {
            Some(Code::Beacon(logic)) => Ok(Arc::clone(logic)),
            _ => Err(LedgerError::NotABeacon(beacon)),
        }
    }

    // --- deployment ---

    /// Deploy a beacon proxy at its content-derived address
    ///
    /// `value` moves from `deployer` to the new instance before `init_data`
    /// is delivered to the resolved implementation's initializer.
    pub fn create2(
        &mut self,
        deployer: Address,
        salt: H256,
        beacon: Address,
        init_data: &[u8],
        value: U256,
    ) -> LedgerResult<Address> {
        self.atomically(|ledger| {
            ledger.beacon_logic(beacon)?;
            let init_code = create2::init_code(&ledger.proxy_code, beacon, init_data);
            let address = create2::create2_address(deployer, salt, &init_code);

            ledger.install_code(address, Code::BeaconProxy { beacon })?;
            let account = ledger.world.account_mut(deployer);
            account.nonce += 1;
            ledger.transfer_value(deployer, address, value)?;

            if !init_data.is_empty() {
                let logic = ledger.resolve_logic(address)?;
                let frame = Frame {
                    this: address,
                    sender: deployer,
                    value,
                };
                logic.initialize(ledger, frame, init_data)?;
            }

            debug!("CREATE2 {:?} salt={:?} -> {:?}", deployer, salt, address);
            Ok(address)
        })
    }

    /// Follow proxy -> beacon -> implementation
    pub fn resolve_logic(&self, instance: Address) -> LedgerResult<Arc<dyn AssetLogic>> {
        let beacon = match self.code_at(instance) {
            Some(Code::BeaconProxy { beacon }) => *beacon,
            Some(Code::Asset(logic)) => return Ok(Arc::clone(logic)),
            Some(_) => return Err(LedgerError::NotAnAsset(instance)),
            None => return Err(LedgerError::NotAContract(instance)),
        };
        let implementation = self.beacon_implementation(beacon)?;
        if implementation.is_zero() {
            return Err(LedgerError::ImplementationNotSet(instance));
        }
        match self.code_at(implementation) {
            Some(Code::Asset(logic)) => Ok(Arc::clone(logic)),
            _ => Err(LedgerError::NotAnAsset(instance)),
        }
    }

    // --- events ---

    pub fn emit(&mut self, address: Address, topics: Vec<H256>, data: Vec<u8>) {
        let block_number = self.world.block_number;
        self.world.logs.push(LogEntry {
            address,
            topics,
            data,
            block_number,
        });
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.world.logs
    }

    // --- atomicity ---

    pub fn checkpoint(&self) -> WorldState {
        self.world.clone()
    }

    pub fn revert_to(&mut self, checkpoint: WorldState) {
        self.world = checkpoint;
    }

    /// Run `step`, restoring the whole world if it fails
    pub fn atomically<T, E, F>(&mut self, step: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: std::fmt::Display,
    {
        let checkpoint = self.checkpoint();
        match step(self) {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!("⏪ Rolled back: {}", error);
                self.revert_to(checkpoint);
                Err(error)
            }
        }
    }

    // --- assets ---

    /// Read-only handle to an asset instance
    pub fn asset(&self, token: Address) -> AssetView<'_> {
        AssetView::new(self, token)
    }

    /// Mutating handle to an asset instance; every call is atomic
    pub fn asset_mut(&mut self, token: Address) -> AssetClient<'_> {
        AssetClient::new(self, token)
    }
}
