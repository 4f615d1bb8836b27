//! Bonding-Curve Pricing Property Tests
//!
//! Properties that must hold for every curve shape: monotonic outputs and
//! buy/sell near-inversion.

use launch_curve::{BancorCurve, PricingOracle};
use launch_types::units::whole;
use launch_types::U256;
use proptest::prelude::*;

fn curve_params() -> impl Strategy<Value = (u64, u64, u8)> {
    (1_000u64..1_000_000, 1_000u64..1_000_000, 1u8..=100)
}

proptest! {
    #[test]
    fn buy_output_is_monotonic((supply, reserve, ratio) in curve_params(), small in 1u64..500, extra in 1u64..500) {
        let curve = BancorCurve;
        let low = curve.buy_output(whole(supply), whole(reserve), ratio, whole(small)).unwrap();
        let high = curve.buy_output(whole(supply), whole(reserve), ratio, whole(small + extra)).unwrap();
        prop_assert!(high >= low);
    }

    #[test]
    fn sell_output_is_monotonic((supply, reserve, ratio) in curve_params(), small in 1u64..500, extra in 1u64..500) {
        let curve = BancorCurve;
        let low = curve.sell_output(whole(supply), whole(reserve), ratio, whole(small)).unwrap();
        let high = curve.sell_output(whole(supply), whole(reserve), ratio, whole(small + extra)).unwrap();
        prop_assert!(high >= low);
    }

    #[test]
    fn buy_then_sell_never_profits((supply, reserve, ratio) in curve_params(), deposit in 1u64..10_000) {
        let curve = BancorCurve;
        let deposit = whole(deposit);
        let minted = curve.buy_output(whole(supply), whole(reserve), ratio, deposit).unwrap();
        let returned = curve
            .sell_output(whole(supply) + minted, whole(reserve) + deposit, ratio, minted)
            .unwrap();
        // Allow for the decimal power series error, a millionth of the deposit
        let tolerance = deposit / U256::from(1_000_000u64) + U256::one();
        prop_assert!(returned <= deposit + tolerance);
    }

    #[test]
    fn buy_input_covers_buy_output(supply in 1_000u64..1_000_000, reserve in 1_000u64..1_000_000, ratio in 10u8..=100, wanted in 1u64..500) {
        let curve = BancorCurve;
        let cost = curve.buy_input(whole(supply), whole(reserve), ratio, whole(wanted)).unwrap();
        let minted = curve.buy_output(whole(supply), whole(reserve), ratio, cost).unwrap();
        let tolerance = whole(wanted) / U256::from(1_000_000u64) + U256::one();
        prop_assert!(minted + tolerance >= whole(wanted));
    }
}
