//! Creation commission
//!
//! Short tickers are scarce, so the fee falls as the ticker grows. Length is
//! counted in characters: a three-glyph ticker pays the short-ticker fee no
//! matter how many bytes its UTF-8 encoding takes.

use launch_config::commission;
use launch_types::{units, U256};

#[derive(Debug, Clone, Copy, Default)]
pub struct CommissionSchedule;

impl CommissionSchedule {
    /// Fee in native units for creating `symbol`
    pub fn required_commission(symbol: &str) -> U256 {
        Self::for_length(symbol.chars().count())
    }

    pub fn for_length(length: usize) -> U256 {
        units::whole(commission::fee_units_for_length(length))
    }
}
