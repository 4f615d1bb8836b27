//! Creation, commission and registry behavior of the control plane

mod common;

use common::*;
use launch_types::{units, Address, Family, ValidationError, H256, U256};
use launchpad::{abi, registry, DeterministicFactory, LaunchpadError};
use ledger::asset::abi::encode_reserved_init;
use ledger::asset::AssetProfile;
use ledger::LedgerError;

#[test]
fn test_create_three_char_ticker_burns_short_fee() {
    let mut lp = launchpad();
    let fee = units::whole(2_500_000);
    let creator_before = lp.ledger().balance_of(CREATOR);
    let sink_before = lp.ledger().balance_of(Address::zero());

    let token = lp
        .create_token(CREATOR, meta("ABC", CREATOR), fee + units::whole(5))
        .unwrap();

    assert_eq!(lp.tokens("ABC").unwrap(), token);
    assert_eq!(lp.ledger().balance_of(token), units::whole(5));
    assert_eq!(lp.ledger().balance_of(Address::zero()) - sink_before, fee);
    assert_eq!(
        creator_before - lp.ledger().balance_of(CREATOR),
        fee + units::whole(5)
    );
    assert_eq!(lp.ledger().balance_of(lp.address()), U256::zero());
}

#[test]
fn test_tier_fees_are_charged_exactly() {
    let mut lp = launchpad();
    for (symbol, fee) in [("ABCDEFG", 250u64), ("ABCDE", 25_000)] {
        let sink_before = lp.ledger().balance_of(Address::zero());
        let token = lp
            .create_token(CREATOR, meta(symbol, CREATOR), units::whole(fee + 1))
            .unwrap();
        assert_eq!(
            lp.ledger().balance_of(Address::zero()) - sink_before,
            units::whole(fee)
        );
        assert_eq!(lp.ledger().balance_of(token), units::whole(1));
    }
}

#[test]
fn test_created_instance_is_initialized_from_metadata() {
    let mut lp = launchpad();
    let token = create(&mut lp, "ALPHAXX", 100);

    let view = lp.ledger().asset(token);
    assert_eq!(view.symbol().unwrap(), "ALPHAXX");
    assert_eq!(view.name().unwrap(), "ALPHAXX Token");
    assert_eq!(view.identity().unwrap(), "ipfs://alphaxx");
    assert_eq!(view.family().unwrap(), Family::Reserved);
    assert_eq!(view.total_supply().unwrap(), units::whole(1_000));
    assert_eq!(view.balance_of(CREATOR).unwrap(), units::whole(1_000));
    assert!(matches!(
        view.profile().unwrap(),
        AssetProfile::Reserved { ratio: 50, creator, .. } if creator == CREATOR
    ));
    assert!(lp.is_token_exists(token).unwrap());
}

#[test]
fn test_token_deployed_notification_carries_predicted_address() {
    let mut lp = launchpad();
    let symbol = "ALPHAXX";
    let init = encode_reserved_init(&meta(symbol, CREATOR)).unwrap();
    let predicted = lp
        .predict(Family::Reserved, registry::reserved_salt(symbol), &init)
        .unwrap();

    let token = create(&mut lp, symbol, 100);
    assert_eq!(token, predicted);

    let signature = abi::token_deployed_event().signature();
    let entry = lp
        .ledger()
        .logs()
        .iter()
        .find(|entry| entry.signature() == Some(signature))
        .unwrap();
    assert_eq!(entry.address, lp.address());
    assert_eq!(entry.topics[1], H256::from(predicted));

    let parsed = abi::token_deployed_event().parse_log(entry.to_raw()).unwrap();
    assert_eq!(parsed.params.len(), 2);
}

#[test]
fn test_duplicate_symbol_rejected_and_registry_unchanged() {
    let mut lp = launchpad();
    let first = create(&mut lp, "XYZ", 1);
    let creator_before = lp.ledger().balance_of(CREATOR);
    let logs_before = lp.ledger().logs().len();

    let mut other = meta("XYZ", STRANGER);
    other.name = "Another".into();
    let result = lp.create_token(CREATOR, other, units::whole(2_500_001));

    assert_eq!(result, Err(LaunchpadError::TokenSymbolExist));
    assert_eq!(lp.tokens("XYZ").unwrap(), first);
    assert_eq!(lp.ledger().balance_of(CREATOR), creator_before);
    assert_eq!(lp.ledger().logs().len(), logs_before);
}

#[test]
fn test_insufficient_commission_rejected_without_effects() {
    let mut lp = launchpad();
    let creator_before = lp.ledger().balance_of(CREATOR);
    let logs_before = lp.ledger().logs().len();

    let result = lp.create_token(CREATOR, meta("ABC", CREATOR), units::whole(2_499_999));

    assert_eq!(
        result,
        Err(LaunchpadError::InvalidComission(units::whole(2_500_000)))
    );
    assert_eq!(lp.ledger().balance_of(CREATOR), creator_before);
    assert_eq!(lp.ledger().balance_of(lp.address()), U256::zero());
    assert_eq!(lp.tokens("ABC").unwrap(), Address::zero());
    assert_eq!(lp.ledger().logs().len(), logs_before);
}

#[test]
fn test_minimum_opening_reserve_enforced() {
    let mut lp = launchpad_with_min_reserve(units::whole(50));
    let fee = lp.required_commission("ALPHAXX");

    assert_eq!(
        lp.create_token(CREATOR, meta("ALPHAXX", CREATOR), fee + units::whole(49)),
        Err(LaunchpadError::InvalidMinReserve(units::whole(50)))
    );
    let token = lp
        .create_token(CREATOR, meta("ALPHAXX", CREATOR), fee + units::whole(50))
        .unwrap();
    assert_eq!(lp.ledger().balance_of(token), units::whole(50));
}

#[test]
fn test_empty_opening_reserve_rejected() {
    let mut lp = launchpad();
    let creator_before = lp.ledger().balance_of(CREATOR);
    let fee = lp.required_commission("ZEROXXX");

    assert_eq!(
        lp.create_token(CREATOR, meta("ZEROXXX", CREATOR), fee),
        Err(LaunchpadError::InvalidMinReserve(U256::one()))
    );
    assert_eq!(lp.tokens("ZEROXXX").unwrap(), Address::zero());
    assert_eq!(lp.ledger().balance_of(CREATOR), creator_before);

    // a single native unit of reserve is enough to price the curve
    let token = lp
        .create_token(CREATOR, meta("ZEROXXX", CREATOR), fee + U256::one())
        .unwrap();
    assert!(lp.ledger().asset(token).quote_buy(units::whole(1)).is_ok());
}

#[test]
fn test_zero_initial_mint_rejected() {
    let mut lp = launchpad();
    let mut empty = meta("EMPTYXX", CREATOR);
    empty.initial_mint = U256::zero();
    empty.min_total_supply = U256::zero();

    let result = lp.create_token(CREATOR, empty, units::whole(300));
    assert_eq!(
        result,
        Err(LaunchpadError::Ledger(LedgerError::Validation(
            ValidationError::ZeroInitialMint
        )))
    );
    assert_eq!(lp.tokens("EMPTYXX").unwrap(), Address::zero());
}

#[test]
fn test_unpriceable_supply_rejected_up_front() {
    let mut lp = launchpad();
    let mut huge = meta("HUGEXXX", CREATOR);
    huge.initial_mint = units::whole(100_000_000_000);
    huge.max_total_supply = units::whole(100_000_000_000);

    let result = lp.create_token(CREATOR, huge, units::whole(300));
    assert!(matches!(
        result,
        Err(LaunchpadError::Ledger(LedgerError::Validation(
            ValidationError::SupplyUnpriceable { .. }
        )))
    ));
    assert_eq!(lp.tokens("HUGEXXX").unwrap(), Address::zero());

    // the largest accepted ceiling still trades
    let mut edge = meta("EDGEXXX", CREATOR);
    edge.initial_mint = units::whole(70_000_000_000);
    edge.max_total_supply = units::max_priceable();
    let token = lp.create_token(CREATOR, edge, units::whole(300)).unwrap();
    assert!(lp.ledger().asset(token).quote_sell(units::whole(1)).is_ok());
    assert!(lp.ledger().asset(token).quote_buy(units::whole(1)).is_ok());
}

#[test]
fn test_invalid_metadata_rolls_back_commission() {
    let mut lp = launchpad();
    let creator_before = lp.ledger().balance_of(CREATOR);
    let mut bad = meta("ALPHAXX", CREATOR);
    bad.initial_mint = units::whole(2_000_000);

    let result = lp.create_token(CREATOR, bad, units::whole(300));
    assert!(matches!(
        result,
        Err(LaunchpadError::Ledger(LedgerError::Validation(_)))
    ));
    assert_eq!(lp.ledger().balance_of(CREATOR), creator_before);
    assert_eq!(lp.tokens("ALPHAXX").unwrap(), Address::zero());
}

#[test]
fn test_prediction_mismatch_rejected() {
    let mut lp = launchpad();
    let this = lp.address();
    lp.set_factory(DeterministicFactory::with_creation_code(
        this,
        b"drifted creation code".to_vec(),
    ));

    let result = lp.create_token(CREATOR, meta("ALPHAXX", CREATOR), units::whole(300));
    assert!(matches!(result, Err(LaunchpadError::DeployTokenError { .. })));
    assert_eq!(lp.tokens("ALPHAXX").unwrap(), Address::zero());

    lp.set_factory(DeterministicFactory::new(this));
    assert!(lp
        .create_token(CREATOR, meta("ALPHAXX", CREATOR), units::whole(300))
        .is_ok());
}

#[test]
fn test_reserveless_creation_is_not_registered() {
    let mut lp = launchpad();
    let token = lp
        .create_token_reserveless(CREATOR, plain_params("Plain"))
        .unwrap();

    let view = lp.ledger().asset(token);
    assert_eq!(view.family().unwrap(), Family::Reserveless);
    assert_eq!(view.balance_of(CREATOR).unwrap(), units::whole(500));
    assert!(matches!(
        view.profile().unwrap(),
        AssetProfile::Reserveless { owner, .. } if owner == CREATOR
    ));
    assert_eq!(lp.tokens("PLN").unwrap(), Address::zero());
    assert!(!lp.is_token_exists(token).unwrap());

    let signature = abi::token_reserveless_deployed_event().signature();
    assert!(lp
        .ledger()
        .logs()
        .iter()
        .any(|entry| entry.signature() == Some(signature) && entry.topics[1] == H256::from(token)));
}

#[test]
fn test_reserveless_same_name_needs_new_timestamp() {
    let mut lp = launchpad();
    let first = lp
        .create_token_reserveless(CREATOR, plain_params("Plain"))
        .unwrap();
    assert!(matches!(
        lp.create_token_reserveless(CREATOR, plain_params("Plain")),
        Err(LaunchpadError::Ledger(LedgerError::AddressOccupied(_)))
    ));

    lp.ledger_mut().advance_time(1);
    let second = lp
        .create_token_reserveless(CREATOR, plain_params("Plain"))
        .unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_reserveless_owner_controls_mint() {
    let mut lp = launchpad();
    let token = lp
        .create_token_reserveless(CREATOR, plain_params("Plain"))
        .unwrap();

    lp.ledger_mut()
        .asset_mut(token)
        .mint(CREATOR, TRADER, units::whole(100))
        .unwrap();
    assert_eq!(
        lp.ledger().asset(token).balance_of(TRADER).unwrap(),
        units::whole(100)
    );
    assert_eq!(
        lp.ledger_mut()
            .asset_mut(token)
            .mint(STRANGER, TRADER, units::whole(1)),
        Err(LedgerError::Unauthorized(STRANGER))
    );
}

#[test]
fn test_is_token_exists_false_for_plain_accounts() {
    let lp = launchpad();
    assert!(!lp.is_token_exists(STRANGER).unwrap());
    assert!(!lp.is_token_exists(Address::zero()).unwrap());
    assert!(!lp.is_token_exists(lp.address()).unwrap());
}
