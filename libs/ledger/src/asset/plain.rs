//! Reserveless-family logic: owner mint, holder burn, optional cap

use super::{abi, emit_transfer, AssetLogic, AssetProfile, AssetState, Frame};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use ethereum_types::{Address, U256};
use launch_types::Family;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct PlainToken {
    version: u32,
}

impl Default for PlainToken {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainToken {
    pub fn new() -> Self {
        Self::with_version(1)
    }

    pub fn with_version(version: u32) -> Self {
        Self { version }
    }
}

impl AssetLogic for PlainToken {
    fn family(&self) -> Family {
        Family::Reserveless
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn initialize(&self, ledger: &mut Ledger, frame: Frame, data: &[u8]) -> LedgerResult<()> {
        let (params, owner) = abi::decode_reserveless_init(data)?;
        params.validate()?;

        let mut state = AssetState::new(
            params.name.clone(),
            params.symbol.clone(),
            params.identity.clone(),
            AssetProfile::Reserveless {
                owner,
                mintable: params.mintable,
                burnable: params.burnable,
                cap: params.cap,
            },
        );
        state.mint(owner, params.initial_mint)?;
        ledger.init_asset_state(frame.this, state)?;
        emit_transfer(ledger, frame.this, Address::zero(), owner, params.initial_mint);

        info!(
            "🪙 Initialized reserveless {} ({}) owned by {:?}",
            params.symbol, params.name, owner
        );
        Ok(())
    }

    fn mint(&self, ledger: &mut Ledger, frame: Frame, to: Address, amount: U256) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::InvalidReceiver(to));
        }
        let state = ledger.asset_state_mut(frame.this)?;
        match state.profile {
            AssetProfile::Reserveless {
                owner,
                mintable,
                cap,
                ..
            } => {
                if !mintable {
                    return Err(LedgerError::Unsupported("mint"));
                }
                if frame.sender != owner {
                    return Err(LedgerError::Unauthorized(frame.sender));
                }
                let resulting = state.total_supply.saturating_add(amount);
                if !cap.is_zero() && resulting > cap {
                    return Err(LedgerError::CapExceeded { resulting, cap });
                }
            }
            AssetProfile::Reserved { .. } => return Err(LedgerError::Unsupported("mint")),
        }
        state.mint(to, amount)?;
        emit_transfer(ledger, frame.this, Address::zero(), to, amount);
        Ok(())
    }

    fn burn(&self, ledger: &mut Ledger, frame: Frame, amount: U256) -> LedgerResult<()> {
        let state = ledger.asset_state_mut(frame.this)?;
        match state.profile {
            AssetProfile::Reserveless { burnable: true, .. } => {}
            _ => return Err(LedgerError::Unsupported("burn")),
        }
        state.burn(frame.sender, amount)?;
        emit_transfer(ledger, frame.this, frame.sender, Address::zero(), amount);
        Ok(())
    }
}
