//! # Launchpad Control Plane
//!
//! ## Purpose
//!
//! Single control point for issuing, registering, converting between and
//! governing bonding-curve assets. Owns the ledger it runs against and keeps
//! its registry aggregate in its own account storage, so one ledger checkpoint
//! captures everything an operation could touch.
//!
//! ## Integration Points
//!
//! - **Input**: creation requests, conversion requests, governance calls
//! - **Output**: deployed asset instances, ledger log notifications
//! - **Collaborators**: [`ledger::Ledger`] for execution, [`launch_curve`] for
//!   pricing queries
//!
//! ## Architecture Role
//!
//! ```text
//! caller ──► Launchpad::atomically ──► gate (owner / not paused)
//!                                     │
//!        ┌────────────────────────────┼─────────────────────────┐
//!        ▼                            ▼                         ▼
//!   Registry + Factory          ConversionEngine          Governance
//!  (create, predict, verify)   (transferFrom, sell, buy)  (pause, upgrade)
//! ```
//!
//! The control plane account is itself the beacon of the reserved family: its
//! [`ControlPlaneBeacon`] logic serves the reserved implementation pointer,
//! or nothing while paused, to every reserved instance on every call.

use crate::abi::{self, EncodedLog};
use crate::commission::CommissionSchedule;
use crate::error::{LaunchpadError, LaunchpadResult};
use crate::factory::DeterministicFactory;
use crate::governance::UpgradeSlot;
use crate::state::{RegistryState, REGISTRY_SLOT};
use anyhow::Context;
use launch_config::LaunchpadConfig;
use launch_curve::{BancorCurve, PricingOracle};
use launch_types::{keccak256, Address, Family, H256, U256};
use ledger::{BeaconLogic, BondingToken, Code, Ledger, LedgerError, PlainToken, SlotMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Identity of the first control plane implementation
const CONTROL_PLANE_CODE: &str = "launchpad.control-plane.v1";

/// Beacon logic of the control plane account
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlPlaneBeacon;

impl BeaconLogic for ControlPlaneBeacon {
    fn implementation(&self, storage: &SlotMap) -> Address {
        storage
            .get::<RegistryState>(&REGISTRY_SLOT)
            .map(RegistryState::active_reserved_implementation)
            .unwrap_or_default()
    }
}

pub struct Launchpad {
    pub(crate) ledger: Ledger,
    pub(crate) address: Address,
    pub(crate) factory: DeterministicFactory,
    pub(crate) curve: BancorCurve,
    pub(crate) min_opening_reserve: U256,
}

impl std::fmt::Debug for Launchpad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launchpad")
            .field("address", &self.address)
            .field("min_opening_reserve", &self.min_opening_reserve)
            .finish_non_exhaustive()
    }
}

impl Launchpad {
    /// Deploy implementations and the control plane onto `ledger`, then initialize it
    pub fn deploy(mut ledger: Ledger, owner: Address, min_opening_reserve: U256) -> LaunchpadResult<Self> {
        let reserved = ledger.deploy_asset_logic(owner, Arc::new(BondingToken::new()))?;
        let reserveless = ledger.deploy_asset_logic(owner, Arc::new(PlainToken::new()))?;
        let logic = ledger.deploy(owner, Code::Opaque(keccak256(CONTROL_PLANE_CODE.as_bytes())))?;
        let address = ledger.deploy(owner, Code::Beacon(Arc::new(ControlPlaneBeacon)))?;

        let mut launchpad = Self {
            ledger,
            address,
            factory: DeterministicFactory::new(address),
            curve: BancorCurve,
            min_opening_reserve,
        };
        UpgradeSlot::new(address).upgrade_to(&mut launchpad.ledger, logic)?;
        launchpad.initialize(owner, reserved, reserveless)?;
        Ok(launchpad)
    }

    /// Boot a fresh in-memory ledger and control plane from configuration
    pub fn from_config(config: &LaunchpadConfig) -> anyhow::Result<Self> {
        let owner = config.governance.owner_address()?;
        let ledger = Ledger::from_config(&config.chain);
        Self::deploy(ledger, owner, config.registry.min_opening_reserve_native())
            .context("Failed to deploy launchpad")
    }

    /// One-time setup of the registry aggregate
    pub fn initialize(
        &mut self,
        owner: Address,
        reserved_implementation: Address,
        reserveless_implementation: Address,
    ) -> LaunchpadResult<()> {
        self.atomically(|lp| {
            if lp.ledger.storage(lp.address).is_some_and(|s| s.contains(&REGISTRY_SLOT)) {
                return Err(LaunchpadError::InvalidInitialization);
            }
            if owner.is_zero() {
                return Err(LaunchpadError::OwnableUnauthorizedAccount(owner));
            }
            let beacon = lp.ledger.deploy_beacon(lp.address, reserveless_implementation)?;
            let state = RegistryState::new(
                owner,
                reserved_implementation,
                reserveless_implementation,
                beacon,
            );
            lp.ledger.storage_mut(lp.address).insert(*REGISTRY_SLOT, state);
            lp.emit(abi::ownership_transferred(Address::zero(), owner));
            log_success!("Launchpad initialized at {:?}, owner {:?}", lp.address, owner);
            Ok(())
        })
    }

    /// Run `step` against the control plane, restoring the world on error
    pub fn atomically<T, F>(&mut self, step: F) -> LaunchpadResult<T>
    where
        F: FnOnce(&mut Self) -> LaunchpadResult<T>,
    {
        let checkpoint = self.ledger.checkpoint();
        match step(self) {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!("⏪ Launchpad operation rolled back: {}", error);
                self.ledger.revert_to(checkpoint);
                Err(error)
            }
        }
    }

    pub(crate) fn registry_mut(&mut self) -> LaunchpadResult<&mut RegistryState> {
        self.ledger
            .storage_mut(self.address)
            .get_mut::<RegistryState>(&REGISTRY_SLOT)
            .ok_or(LaunchpadError::InvalidInitialization)
    }

    pub(crate) fn emit(&mut self, log: EncodedLog) {
        self.ledger.emit(self.address, log.topics, log.data);
    }

    /// Move attached value from the caller into the control plane
    pub(crate) fn receive_value(&mut self, caller: Address, value: U256) -> LaunchpadResult<()> {
        self.ledger.transfer_value(caller, self.address, value)?;
        Ok(())
    }

    // --- accessors ---

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Direct ledger access for callers acting outside the control plane
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn factory(&self) -> &DeterministicFactory {
        &self.factory
    }

    /// Replace the factory; used to model bytecode drift between predictor and runtime
    pub fn set_factory(&mut self, factory: DeterministicFactory) {
        self.factory = factory;
    }

    pub fn registry(&self) -> LaunchpadResult<&RegistryState> {
        self.ledger
            .storage(self.address)
            .and_then(|storage| storage.get::<RegistryState>(&REGISTRY_SLOT))
            .ok_or(LaunchpadError::InvalidInitialization)
    }

    // --- reads ---

    pub fn owner(&self) -> LaunchpadResult<Address> {
        Ok(self.registry()?.ownership.owner())
    }

    pub fn paused(&self) -> LaunchpadResult<bool> {
        Ok(self.registry()?.pause.paused())
    }

    /// Reserved-family implementation, null while paused
    pub fn implementation(&self) -> LaunchpadResult<Address> {
        Ok(self.registry()?.active_reserved_implementation())
    }

    /// Reserveless-family implementation, null while paused
    pub fn implementation_reserveless(&self) -> LaunchpadResult<Address> {
        Ok(self.registry()?.active_reserveless_implementation())
    }

    pub fn reserveless_beacon(&self) -> LaunchpadResult<Address> {
        Ok(self.registry()?.reserveless_beacon)
    }

    pub fn contract_center(&self) -> LaunchpadResult<Address> {
        Ok(self.registry()?.contract_center)
    }

    /// Current implementation of the control plane itself
    pub fn self_implementation(&self) -> Address {
        UpgradeSlot::new(self.address).implementation(&self.ledger)
    }

    pub fn required_commission(&self, symbol: &str) -> U256 {
        CommissionSchedule::required_commission(symbol)
    }

    /// Beacon a family's instances resolve through
    pub fn family_pointer(&self, family: Family) -> LaunchpadResult<Address> {
        Ok(match family {
            Family::Reserved => self.address,
            Family::Reserveless => self.registry()?.reserveless_beacon,
        })
    }

    /// Address a deployment of `family` with `salt` and `init_data` would receive
    pub fn predict(&self, family: Family, salt: H256, init_data: &[u8]) -> LaunchpadResult<Address> {
        let predicted = self
            .factory
            .predict(self.family_pointer(family)?, salt, init_data);
        debug!("Predicted {} address {:?}", family.label(), predicted);
        Ok(predicted)
    }

    // --- pricing queries ---

    pub fn sell_output(&self, supply: U256, reserve: U256, ratio: u8, amount: U256) -> LaunchpadResult<U256> {
        Ok(self
            .curve
            .sell_output(supply, reserve, ratio, amount)
            .map_err(LedgerError::from)?)
    }

    pub fn sell_input(&self, supply: U256, reserve: U256, ratio: u8, amount: U256) -> LaunchpadResult<U256> {
        Ok(self
            .curve
            .sell_input(supply, reserve, ratio, amount)
            .map_err(LedgerError::from)?)
    }

    pub fn buy_output(&self, supply: U256, reserve: U256, ratio: u8, amount: U256) -> LaunchpadResult<U256> {
        Ok(self
            .curve
            .buy_output(supply, reserve, ratio, amount)
            .map_err(LedgerError::from)?)
    }

    pub fn buy_input(&self, supply: U256, reserve: U256, ratio: u8, amount: U256) -> LaunchpadResult<U256> {
        Ok(self
            .curve
            .buy_input(supply, reserve, ratio, amount)
            .map_err(LedgerError::from)?)
    }
}
