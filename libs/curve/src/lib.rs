//! # Launchpad Curve Library - Continuous Bonding-Curve Pricing
//!
//! ## Purpose
//!
//! Pure pricing functions for reserve-backed assets. Given an asset's supply,
//! its native reserve and its reserve ratio, the Bancor formula maps an input
//! amount to the output the curve will pay (or the input it will require).
//! Used by the asset instances to settle buys and sells, by the control plane
//! to quote the sell leg of a conversion, and by clients for off-chain quotes.
//!
//! ## Integration Points
//!
//! - **Input Sources**: asset supply and reserve read from the ledger, trade
//!   amounts from callers
//! - **Output Destinations**: reserved-family asset logic, conversion engine,
//!   pricing queries exposed by the control plane
//! - **Precision**: exact `Decimal` arithmetic in whole units; native amounts are
//!   converted at the boundary with outputs rounded down and inputs rounded up
//! - **Validation**: ratio bounds, empty curves and over-sized sells are typed
//!   errors, never panics
//!
//! ## Architecture Role
//!
//! ```text
//! supply / reserve / ratio ──► [PricingOracle] ──► buy/sell output or input
//!                                     │
//!                      BancorMath (Decimal, whole units)
//! ```
//!
//! The four operations are mutually near-inverse: buying with `x` reserve and
//! immediately selling the tokens received returns at most `x`.

pub mod bancor_math;
pub mod oracle;

pub use bancor_math::{BancorMath, CurveError, CurveState};
pub use oracle::{BancorCurve, PricingOracle};

/// Common types for curve calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
