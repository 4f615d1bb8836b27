//! Native-denomination fixed point
//!
//! On-ledger amounts are `U256` integers scaled by `10^18`, the runtime's
//! native fixed-point denomination. Pricing math runs on `Decimal` in whole
//! units, so every crossing of that boundary goes through this module.
//!
//! ## Design Principles
//!
//! - **No silent truncation**: values that do not fit the decimal mantissa are
//!   rejected with [`UnitsError::Overflow`]
//! - **Explicit rounding**: callers pick the rounding direction when converting
//!   back, outputs round down and required inputs round up

use crate::common::errors::UnitsError;
use ethereum_types::U256;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the native denomination
pub const NATIVE_DECIMALS: u32 = 18;

/// Rounding direction when converting a decimal back to native units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Toward zero, used for amounts paid out
    Down,
    /// Away from zero, used for amounts that must be supplied
    Up,
}

/// One whole unit expressed in native units (`10^18`)
pub fn one() -> U256 {
    U256::exp10(NATIVE_DECIMALS as usize)
}

/// `amount` whole units expressed in native units
pub fn whole(amount: u64) -> U256 {
    U256::from(amount) * one()
}

/// Largest native amount [`to_decimal`] accepts (the 96-bit decimal mantissa)
pub fn max_priceable() -> U256 {
    (U256::one() << 96) - U256::one()
}

/// Convert native units into a whole-unit decimal
///
/// # Examples
/// ```
/// use launch_types::units;
/// use rust_decimal::Decimal;
///
/// let d = units::to_decimal(units::whole(3)).unwrap();
/// assert_eq!(d, Decimal::from(3));
/// ```
pub fn to_decimal(amount: U256) -> Result<Decimal, UnitsError> {
    if amount > U256::from(i128::MAX as u128) {
        return Err(UnitsError::Overflow {
            value: amount.to_string(),
        });
    }
    let raw = amount.as_u128() as i128;
    Decimal::try_from_i128_with_scale(raw, NATIVE_DECIMALS).map_err(|_| UnitsError::Overflow {
        value: amount.to_string(),
    })
}

/// Convert a whole-unit decimal back into native units
pub fn from_decimal(value: Decimal, rounding: Rounding) -> Result<U256, UnitsError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(UnitsError::Negative {
            value: value.to_string(),
        });
    }
    let strategy = match rounding {
        Rounding::Down => RoundingStrategy::ToZero,
        Rounding::Up => RoundingStrategy::AwayFromZero,
    };
    let rounded = value.round_dp_with_strategy(NATIVE_DECIMALS, strategy);
    let mantissa = rounded.mantissa().unsigned_abs();
    let missing_scale = NATIVE_DECIMALS.saturating_sub(rounded.scale());
    U256::from(mantissa)
        .checked_mul(U256::exp10(missing_scale as usize))
        .ok_or_else(|| UnitsError::Overflow {
            value: value.to_string(),
        })
}

/// Parse a human amount such as `"12.5"` into native units
pub fn parse(input: &str) -> Result<U256, UnitsError> {
    let value: Decimal = input.trim().parse().map_err(|_| UnitsError::InvalidAmount {
        input: input.to_string(),
    })?;
    from_decimal(value, Rounding::Down)
}

/// Render native units as a whole-unit decimal string
pub fn format(amount: U256) -> String {
    match to_decimal(amount) {
        Ok(value) => value.normalize().to_string(),
        Err(_) => format!("{amount} wei"),
    }
}
