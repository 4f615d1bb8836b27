//! Bancor continuous-token math with exact calculations
//!
//! Preserves full precision using the Decimal type. All amounts are in whole
//! units; the ratio is a percentage in `1..=100` where 100 degenerates to a
//! constant price of `reserve / supply`.

use rust_decimal::prelude::MathematicalOps;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Pricing failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("Invalid reserve ratio {0}: expected 1..=100")]
    InvalidRatio(u8),

    #[error("Curve is empty: supply and reserve must be positive")]
    EmptyCurve,

    #[error("Amount {amount} exceeds supply {supply}")]
    ExceedsSupply { amount: Decimal, supply: Decimal },

    #[error("Amount {amount} exceeds reserve {reserve}")]
    ExceedsReserve { amount: Decimal, reserve: Decimal },

    #[error("Negative amount {0}")]
    NegativeAmount(Decimal),

    #[error("Arithmetic overflow in curve calculation")]
    Overflow,

    #[error("Unit conversion failed: {0}")]
    Units(#[from] launch_types::UnitsError),
}

/// Supply, reserve and ratio of one curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveState {
    pub supply: Decimal,
    pub reserve: Decimal,
    pub ratio: u8,
}

impl CurveState {
    /// Spot price in reserve per token: `reserve / (supply * ratio)`
    pub fn spot_price(&self) -> Result<Decimal, CurveError> {
        let ratio = BancorMath::ratio_fraction(self.ratio)?;
        BancorMath::check_curve(self.supply, self.reserve)?;
        self.supply
            .checked_mul(ratio)
            .and_then(|weighted| self.reserve.checked_div(weighted))
            .ok_or(CurveError::Overflow)
    }
}

/// Bancor formula functions with zero precision loss
pub struct BancorMath;

impl BancorMath {
    /// Tokens minted for a reserve deposit
    ///
    /// `supply * ((1 + deposit / reserve) ^ ratio - 1)`
    pub fn purchase_return(
        supply: Decimal,
        reserve: Decimal,
        ratio: u8,
        deposit: Decimal,
    ) -> Result<Decimal, CurveError> {
        let weight = Self::ratio_fraction(ratio)?;
        Self::check_curve(supply, reserve)?;
        Self::check_amount(deposit)?;
        if deposit.is_zero() {
            return Ok(Decimal::ZERO);
        }
        if ratio == 100 {
            return Self::mul_div(supply, deposit, reserve);
        }

        let base = Self::one_plus(deposit, reserve)?;
        let grown = base.checked_powd(weight).ok_or(CurveError::Overflow)?;
        Self::scale_delta(supply, grown - Decimal::ONE)
    }

    /// Reserve required to mint exactly `amount` tokens
    ///
    /// `reserve * ((1 + amount / supply) ^ (1 / ratio) - 1)`
    pub fn purchase_cost(
        supply: Decimal,
        reserve: Decimal,
        ratio: u8,
        amount: Decimal,
    ) -> Result<Decimal, CurveError> {
        let weight = Self::ratio_fraction(ratio)?;
        Self::check_curve(supply, reserve)?;
        Self::check_amount(amount)?;
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        if ratio == 100 {
            return Self::mul_div(reserve, amount, supply);
        }

        let exponent = Self::inverse(weight)?;
        let base = Self::one_plus(amount, supply)?;
        let grown = base.checked_powd(exponent).ok_or(CurveError::Overflow)?;
        Self::scale_delta(reserve, grown - Decimal::ONE)
    }

    /// Reserve paid out for burning `amount` tokens
    ///
    /// `reserve * (1 - (1 - amount / supply) ^ (1 / ratio))`
    pub fn sale_return(
        supply: Decimal,
        reserve: Decimal,
        ratio: u8,
        amount: Decimal,
    ) -> Result<Decimal, CurveError> {
        let weight = Self::ratio_fraction(ratio)?;
        Self::check_curve(supply, reserve)?;
        Self::check_amount(amount)?;
        if amount > supply {
            return Err(CurveError::ExceedsSupply { amount, supply });
        }
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        // Selling the entire supply drains the reserve
        if amount == supply {
            return Ok(reserve);
        }
        if ratio == 100 {
            return Self::mul_div(reserve, amount, supply);
        }

        let exponent = Self::inverse(weight)?;
        let remaining = Self::one_minus(amount, supply)?;
        let shrunk = remaining.checked_powd(exponent).ok_or(CurveError::Overflow)?;
        Self::scale_delta(reserve, Decimal::ONE - shrunk)
    }

    /// Tokens that must be burned to receive exactly `amount` reserve
    ///
    /// `supply * (1 - (1 - amount / reserve) ^ ratio)`
    pub fn sale_cost(
        supply: Decimal,
        reserve: Decimal,
        ratio: u8,
        amount: Decimal,
    ) -> Result<Decimal, CurveError> {
        let weight = Self::ratio_fraction(ratio)?;
        Self::check_curve(supply, reserve)?;
        Self::check_amount(amount)?;
        if amount > reserve {
            return Err(CurveError::ExceedsReserve { amount, reserve });
        }
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        if amount == reserve {
            return Ok(supply);
        }
        if ratio == 100 {
            return Self::mul_div(supply, amount, reserve);
        }

        let remaining = Self::one_minus(amount, reserve)?;
        let shrunk = remaining.checked_powd(weight).ok_or(CurveError::Overflow)?;
        Self::scale_delta(supply, Decimal::ONE - shrunk)
    }

    /// Ratio percentage as a fraction in (0, 1]
    pub(crate) fn ratio_fraction(ratio: u8) -> Result<Decimal, CurveError> {
        if ratio == 0 || ratio > 100 {
            return Err(CurveError::InvalidRatio(ratio));
        }
        Ok(Decimal::from(ratio) / dec!(100))
    }

    pub(crate) fn check_curve(supply: Decimal, reserve: Decimal) -> Result<(), CurveError> {
        if supply <= Decimal::ZERO || reserve <= Decimal::ZERO {
            return Err(CurveError::EmptyCurve);
        }
        Ok(())
    }

    fn check_amount(amount: Decimal) -> Result<(), CurveError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CurveError::NegativeAmount(amount));
        }
        Ok(())
    }

    fn inverse(weight: Decimal) -> Result<Decimal, CurveError> {
        Decimal::ONE.checked_div(weight).ok_or(CurveError::Overflow)
    }

    fn one_plus(amount: Decimal, base: Decimal) -> Result<Decimal, CurveError> {
        amount
            .checked_div(base)
            .and_then(|fraction| fraction.checked_add(Decimal::ONE))
            .ok_or(CurveError::Overflow)
    }

    fn one_minus(amount: Decimal, base: Decimal) -> Result<Decimal, CurveError> {
        amount
            .checked_div(base)
            .map(|fraction| Decimal::ONE - fraction)
            .ok_or(CurveError::Overflow)
    }

    fn scale_delta(base: Decimal, delta: Decimal) -> Result<Decimal, CurveError> {
        // powd can undershoot by a few ulps around 1.0
        let delta = delta.max(Decimal::ZERO);
        base.checked_mul(delta).ok_or(CurveError::Overflow)
    }

    fn mul_div(a: Decimal, b: Decimal, c: Decimal) -> Result<Decimal, CurveError> {
        a.checked_mul(b)
            .and_then(|product| product.checked_div(c))
            .ok_or(CurveError::Overflow)
    }
}
