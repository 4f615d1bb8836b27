//! Reserved-family logic: bonding-curve priced supply
//!
//! The reserve is the instance's own native balance. Buys price the attached
//! value against the reserve as it stood before the deposit; sells pay out of
//! the reserve and burn the sold tokens.

use super::{abi, emit_transfer, AssetLogic, AssetProfile, AssetState, Frame};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use ethereum_types::{Address, U256};
use launch_curve::{BancorCurve, PricingOracle};
use launch_types::Family;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct BondingToken {
    version: u32,
    curve: BancorCurve,
}

impl Default for BondingToken {
    fn default() -> Self {
        Self::new()
    }
}

impl BondingToken {
    pub fn new() -> Self {
        Self::with_version(1)
    }

    pub fn with_version(version: u32) -> Self {
        Self {
            version,
            curve: BancorCurve,
        }
    }

    fn terms(state: &AssetState) -> LedgerResult<(u8, U256, U256)> {
        match state.profile {
            AssetProfile::Reserved {
                ratio,
                min_total_supply,
                max_total_supply,
                ..
            } => Ok((ratio, min_total_supply, max_total_supply)),
            AssetProfile::Reserveless { .. } => Err(LedgerError::Unsupported("bonding curve")),
        }
    }
}

impl AssetLogic for BondingToken {
    fn family(&self) -> Family {
        Family::Reserved
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn initialize(&self, ledger: &mut Ledger, frame: Frame, data: &[u8]) -> LedgerResult<()> {
        let meta = abi::decode_reserved_init(data)?;
        meta.validate()?;

        let mut state = AssetState::new(
            meta.name.clone(),
            meta.symbol.clone(),
            meta.identity.clone(),
            AssetProfile::Reserved {
                creator: meta.creator,
                ratio: meta.ratio,
                min_total_supply: meta.min_total_supply,
                max_total_supply: meta.max_total_supply,
            },
        );
        state.mint(meta.creator, meta.initial_mint)?;
        ledger.init_asset_state(frame.this, state)?;
        emit_transfer(ledger, frame.this, Address::zero(), meta.creator, meta.initial_mint);

        info!(
            "🪙 Initialized {} ({}) with reserve {} and supply {}",
            meta.symbol,
            meta.name,
            ledger.balance_of(frame.this),
            meta.initial_mint
        );
        Ok(())
    }

    fn quote_sell(&self, ledger: &Ledger, this: Address, amount_in: U256) -> LedgerResult<U256> {
        let state = ledger.asset_state(this)?;
        let (ratio, _, _) = Self::terms(state)?;
        Ok(self
            .curve
            .sell_output(state.total_supply, ledger.balance_of(this), ratio, amount_in)?)
    }

    fn quote_buy(&self, ledger: &Ledger, this: Address, value: U256) -> LedgerResult<U256> {
        let state = ledger.asset_state(this)?;
        let (ratio, _, _) = Self::terms(state)?;
        Ok(self
            .curve
            .buy_output(state.total_supply, ledger.balance_of(this), ratio, value)?)
    }

    fn buy(&self, ledger: &mut Ledger, frame: Frame, min_out: U256, to: Address) -> LedgerResult<U256> {
        if to.is_zero() {
            return Err(LedgerError::InvalidReceiver(to));
        }
        let state = ledger.asset_state(frame.this)?;
        let (ratio, _, max_total_supply) = Self::terms(state)?;
        let reserve_before = ledger.balance_of(frame.this).saturating_sub(frame.value);
        let out = self
            .curve
            .buy_output(state.total_supply, reserve_before, ratio, frame.value)?;

        if out < min_out {
            return Err(LedgerError::Slippage {
                minimum: min_out,
                actual: out,
            });
        }
        let resulting = state.total_supply.saturating_add(out);
        if resulting > max_total_supply {
            return Err(LedgerError::SupplyAboveMaximum {
                resulting,
                maximum: max_total_supply,
            });
        }

        ledger.asset_state_mut(frame.this)?.mint(to, out)?;
        emit_transfer(ledger, frame.this, Address::zero(), to, out);
        debug!("Buy {} native -> {} tokens to {:?}", frame.value, out, to);
        Ok(out)
    }

    fn sell(
        &self,
        ledger: &mut Ledger,
        frame: Frame,
        amount_in: U256,
        min_out: U256,
        to: Address,
    ) -> LedgerResult<U256> {
        let state = ledger.asset_state(frame.this)?;
        let (ratio, min_total_supply, _) = Self::terms(state)?;
        let remaining = state.total_supply.saturating_sub(amount_in);
        if remaining < min_total_supply {
            return Err(LedgerError::SupplyBelowMinimum {
                remaining,
                minimum: min_total_supply,
            });
        }
        let out = self.curve.sell_output(
            state.total_supply,
            ledger.balance_of(frame.this),
            ratio,
            amount_in,
        )?;
        if out < min_out {
            return Err(LedgerError::Slippage {
                minimum: min_out,
                actual: out,
            });
        }

        ledger
            .asset_state_mut(frame.this)?
            .burn(frame.sender, amount_in)?;
        emit_transfer(ledger, frame.this, frame.sender, Address::zero(), amount_in);
        ledger.transfer_value(frame.this, to, out)?;
        debug!("Sell {} tokens -> {} native to {:?}", amount_in, out, to);
        Ok(out)
    }
}
