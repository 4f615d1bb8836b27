//! Pricing oracle trait for a unified curve interface
//!
//! Operates on native `U256` amounts so ledger code never touches decimals.

use crate::{BancorMath, CurveError};
use launch_types::units::{self, Rounding};
use launch_types::U256;
use rust_decimal::Decimal;
use tracing::trace;

/// Pure pricing functions over `(supply, reserve, ratio, amount)`
///
/// Implementations must be monotonic in `amount` and near-inverse: a buy
/// followed by a sell of the proceeds never returns more than was paid.
pub trait PricingOracle: Send + Sync {
    /// Reserve paid out for selling `amount` tokens
    fn sell_output(&self, supply: U256, reserve: U256, ratio: u8, amount: U256)
        -> Result<U256, CurveError>;

    /// Tokens that must be sold to receive `amount` reserve
    fn sell_input(&self, supply: U256, reserve: U256, ratio: u8, amount: U256)
        -> Result<U256, CurveError>;

    /// Tokens received for depositing `amount` reserve
    fn buy_output(&self, supply: U256, reserve: U256, ratio: u8, amount: U256)
        -> Result<U256, CurveError>;

    /// Reserve required to receive `amount` tokens
    fn buy_input(&self, supply: U256, reserve: U256, ratio: u8, amount: U256)
        -> Result<U256, CurveError>;
}

/// Bancor formula oracle
#[derive(Debug, Clone, Copy, Default)]
pub struct BancorCurve;

type Formula = fn(Decimal, Decimal, u8, Decimal) -> Result<Decimal, CurveError>;

impl BancorCurve {
    fn evaluate(
        formula: Formula,
        supply: U256,
        reserve: U256,
        ratio: u8,
        amount: U256,
        rounding: Rounding,
    ) -> Result<U256, CurveError> {
        let result = formula(
            units::to_decimal(supply)?,
            units::to_decimal(reserve)?,
            ratio,
            units::to_decimal(amount)?,
        )?;
        trace!(%supply, %reserve, ratio, %amount, %result, "curve evaluated");
        Ok(units::from_decimal(result, rounding)?)
    }
}

impl PricingOracle for BancorCurve {
    fn sell_output(
        &self,
        supply: U256,
        reserve: U256,
        ratio: u8,
        amount: U256,
    ) -> Result<U256, CurveError> {
        let out = Self::evaluate(
            BancorMath::sale_return,
            supply,
            reserve,
            ratio,
            amount,
            Rounding::Down,
        )?;
        // Rounding must never pay out more than the reserve holds
        Ok(out.min(reserve))
    }

    fn sell_input(
        &self,
        supply: U256,
        reserve: U256,
        ratio: u8,
        amount: U256,
    ) -> Result<U256, CurveError> {
        let tokens = Self::evaluate(
            BancorMath::sale_cost,
            supply,
            reserve,
            ratio,
            amount,
            Rounding::Up,
        )?;
        Ok(tokens.min(supply))
    }

    fn buy_output(
        &self,
        supply: U256,
        reserve: U256,
        ratio: u8,
        amount: U256,
    ) -> Result<U256, CurveError> {
        Self::evaluate(
            BancorMath::purchase_return,
            supply,
            reserve,
            ratio,
            amount,
            Rounding::Down,
        )
    }

    fn buy_input(
        &self,
        supply: U256,
        reserve: U256,
        ratio: u8,
        amount: U256,
    ) -> Result<U256, CurveError> {
        Self::evaluate(
            BancorMath::purchase_cost,
            supply,
            reserve,
            ratio,
            amount,
            Rounding::Up,
        )
    }
}
