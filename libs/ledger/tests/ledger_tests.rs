//! Integration tests for the ledger runtime: deployment, bonding assets,
//! reserveless assets, permits and beacon upgrades.

use ethers_core::utils::get_create2_address;
use ethers_signers::{LocalWallet, Signer};
use ethereum_types::H160;
use launch_types::{keccak256, units, Address, Family, ReservelessParams, TokenMetadata, H256, U256};
use ledger::asset::{abi, permit};
use ledger::{create2, BondingToken, Ledger, LedgerError, Permit, PlainToken};
use proptest::prelude::*;
use std::sync::Arc;

const OWNER: Address = H160([0xa1; 20]);
const ALICE: Address = H160([0x01; 20]);
const BOB: Address = H160([0x02; 20]);

struct Fixture {
    ledger: Ledger,
    beacon: Address,
    plain_beacon: Address,
}

fn fixture() -> Fixture {
    let mut ledger = Ledger::new(31_337, 1_000);
    let bonding = ledger
        .deploy_asset_logic(OWNER, Arc::new(BondingToken::new()))
        .unwrap();
    let plain = ledger
        .deploy_asset_logic(OWNER, Arc::new(PlainToken::new()))
        .unwrap();
    let beacon = ledger.deploy_beacon(OWNER, bonding).unwrap();
    let plain_beacon = ledger.deploy_beacon(OWNER, plain).unwrap();
    ledger.mint_native(OWNER, units::whole(10_000));
    ledger.mint_native(ALICE, units::whole(10_000));
    Fixture {
        ledger,
        beacon,
        plain_beacon,
    }
}

fn meta(symbol: &str, creator: Address) -> TokenMetadata {
    TokenMetadata {
        name: format!("{symbol} token"),
        symbol: symbol.to_string(),
        identity: format!("ipfs://{symbol}"),
        creator,
        ratio: 50,
        initial_mint: units::whole(1_000),
        min_total_supply: units::whole(100),
        max_total_supply: units::whole(1_000_000),
    }
}

fn deploy_bonding(f: &mut Fixture, symbol: &str, creator: Address) -> Address {
    let init = abi::encode_reserved_init(&meta(symbol, creator)).unwrap();
    f.ledger
        .create2(
            OWNER,
            keccak256(symbol.as_bytes()),
            f.beacon,
            &init,
            units::whole(100),
        )
        .unwrap()
}

#[test]
fn test_create2_matches_reference_implementation() {
    let mut f = fixture();
    let init = abi::encode_reserved_init(&meta("ABC", ALICE)).unwrap();
    let salt = keccak256(b"ABC");
    let init_code = create2::init_code(create2::BEACON_PROXY_CREATION_CODE, f.beacon, &init);

    let ours = create2::create2_address(OWNER, salt, &init_code);
    let reference = get_create2_address(OWNER, salt.as_bytes().to_vec(), init_code);
    assert_eq!(ours, reference);

    let deployed = f
        .ledger
        .create2(OWNER, salt, f.beacon, &init, units::whole(100))
        .unwrap();
    assert_eq!(deployed, ours);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn create2_lands_on_predicted_address(
        salt in any::<[u8; 32]>(),
        symbol in "[A-Z]{1,8}",
        initial in 1u64..1_000_000,
        reserve in 1u64..1_000,
    ) {
        let mut f = fixture();
        let mut m = meta(&symbol, ALICE);
        m.initial_mint = units::whole(initial);
        m.min_total_supply = U256::zero();
        let init = abi::encode_reserved_init(&m).unwrap();
        let salt = H256(salt);
        let init_code = create2::init_code(create2::BEACON_PROXY_CREATION_CODE, f.beacon, &init);
        let predicted = create2::create2_address(OWNER, salt, &init_code);

        let deployed = f
            .ledger
            .create2(OWNER, salt, f.beacon, &init, units::whole(reserve))
            .unwrap();
        prop_assert_eq!(deployed, predicted);
        prop_assert_eq!(
            predicted,
            get_create2_address(OWNER, salt.as_bytes().to_vec(), init_code)
        );
        prop_assert_eq!(f.ledger.balance_of(deployed), units::whole(reserve));
    }
}

#[test]
fn test_create2_twice_is_occupied() {
    let mut f = fixture();
    let token = deploy_bonding(&mut f, "ABC", ALICE);
    let init = abi::encode_reserved_init(&meta("ABC", ALICE)).unwrap();
    let before = f.ledger.balance_of(OWNER);

    let err = f
        .ledger
        .create2(
            OWNER,
            keccak256(b"ABC"),
            f.beacon,
            &init,
            units::whole(100),
        )
        .unwrap_err();

    assert_eq!(err, LedgerError::AddressOccupied(token));
    assert_eq!(f.ledger.balance_of(OWNER), before);
}

#[test]
fn test_invalid_metadata_rolls_back_deployment() {
    let mut f = fixture();
    let mut bad = meta("BAD", ALICE);
    bad.initial_mint = units::whole(1);
    let init = abi::encode_reserved_init(&bad).unwrap();
    let before = f.ledger.balance_of(OWNER);

    let err = f
        .ledger
        .create2(OWNER, keccak256(b"BAD"), f.beacon, &init, units::whole(1))
        .unwrap_err();

    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(f.ledger.balance_of(OWNER), before);
    assert!(f.ledger.logs().is_empty());
}

#[test]
fn test_bonding_initialization() {
    let mut f = fixture();
    let token = deploy_bonding(&mut f, "ABC", ALICE);
    let view = f.ledger.asset(token);

    assert_eq!(view.symbol().unwrap(), "ABC");
    assert_eq!(view.family().unwrap(), Family::Reserved);
    assert_eq!(view.total_supply().unwrap(), units::whole(1_000));
    assert_eq!(view.balance_of(ALICE).unwrap(), units::whole(1_000));
    assert_eq!(view.reserve(), units::whole(100));

    let transfer = abi::transfer_event();
    let last = f.ledger.logs().last().unwrap();
    let parsed = transfer.parse_log(last.to_raw()).unwrap();
    assert_eq!(parsed.params[1].value.clone().into_address(), Some(ALICE));
}

#[test]
fn test_buy_and_sell() {
    let mut f = fixture();
    let token = deploy_bonding(&mut f, "ABC", ALICE);

    let quoted = f.ledger.asset(token).quote_buy(units::whole(10)).unwrap();
    let bought = f
        .ledger
        .asset_mut(token)
        .buy(ALICE, units::whole(10), U256::zero(), BOB)
        .unwrap();
    assert_eq!(bought, quoted);
    assert!(bought > U256::zero());
    assert_eq!(f.ledger.asset(token).balance_of(BOB).unwrap(), bought);
    assert_eq!(f.ledger.asset(token).reserve(), units::whole(110));

    let native_before = f.ledger.balance_of(BOB);
    let paid = f
        .ledger
        .asset_mut(token)
        .sell(BOB, bought, U256::zero(), BOB)
        .unwrap();
    // a round trip never profits beyond decimal rounding
    assert!(paid <= units::whole(10) + U256::exp10(9));
    assert!(paid > units::whole(9));
    assert_eq!(f.ledger.balance_of(BOB), native_before + paid);
    assert_eq!(f.ledger.asset(token).balance_of(BOB).unwrap(), U256::zero());
}

#[test]
fn test_buy_slippage_rolls_back_value() {
    let mut f = fixture();
    let token = deploy_bonding(&mut f, "ABC", ALICE);
    let before = f.ledger.balance_of(ALICE);

    let err = f
        .ledger
        .asset_mut(token)
        .buy(ALICE, units::whole(10), units::whole(1_000), ALICE)
        .unwrap_err();

    assert!(matches!(err, LedgerError::Slippage { .. }));
    assert_eq!(f.ledger.balance_of(ALICE), before);
    assert_eq!(f.ledger.asset(token).reserve(), units::whole(100));
}

#[test]
fn test_sell_respects_supply_floor() {
    let mut f = fixture();
    let token = deploy_bonding(&mut f, "ABC", ALICE);

    let err = f
        .ledger
        .asset_mut(token)
        .sell(ALICE, units::whole(901), U256::zero(), ALICE)
        .unwrap_err();
    assert!(matches!(err, LedgerError::SupplyBelowMinimum { .. }));
}

#[test]
fn test_transfer_from_requires_allowance() {
    let mut f = fixture();
    let token = deploy_bonding(&mut f, "ABC", ALICE);

    let err = f
        .ledger
        .asset_mut(token)
        .transfer_from(BOB, ALICE, BOB, units::whole(1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));

    f.ledger
        .asset_mut(token)
        .approve(ALICE, BOB, units::whole(5))
        .unwrap();
    f.ledger
        .asset_mut(token)
        .transfer_from(BOB, ALICE, BOB, units::whole(2))
        .unwrap();

    let view = f.ledger.asset(token);
    assert_eq!(view.balance_of(BOB).unwrap(), units::whole(2));
    assert_eq!(view.allowance(ALICE, BOB).unwrap(), units::whole(3));
}

fn signed_permit(
    ledger: &Ledger,
    token: Address,
    wallet: &LocalWallet,
    spender: Address,
    value: U256,
    deadline: U256,
) -> Permit {
    let view = ledger.asset(token);
    let digest = permit::permit_digest(
        view.domain_separator().unwrap(),
        wallet.address(),
        spender,
        value,
        view.nonces(wallet.address()).unwrap(),
        deadline,
    );
    let signature = wallet.sign_hash(digest).unwrap();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    signature.r.to_big_endian(&mut r);
    signature.s.to_big_endian(&mut s);
    Permit {
        owner: wallet.address(),
        spender,
        value,
        deadline,
        v: signature.v as u8,
        r: H256(r),
        s: H256(s),
    }
}

fn wallet() -> LocalWallet {
    "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
        .parse::<LocalWallet>()
        .unwrap()
}

#[test]
fn test_permit_sets_allowance_and_consumes_nonce() {
    let mut f = fixture();
    let wallet = wallet();
    let token = deploy_bonding(&mut f, "ABC", wallet.address());

    let deadline = U256::from(f.ledger.timestamp() + 60);
    let signed = signed_permit(&f.ledger, token, &wallet, BOB, units::whole(7), deadline);
    f.ledger.asset_mut(token).permit(BOB, &signed).unwrap();

    let view = f.ledger.asset(token);
    assert_eq!(view.allowance(wallet.address(), BOB).unwrap(), units::whole(7));
    assert_eq!(view.nonces(wallet.address()).unwrap(), U256::one());

    // replaying the same signature fails against the new nonce
    let err = f.ledger.asset_mut(token).permit(BOB, &signed).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidSigner { .. }));
}

#[test]
fn test_expired_permit_rejected() {
    let mut f = fixture();
    let wallet = wallet();
    let token = deploy_bonding(&mut f, "ABC", wallet.address());

    let deadline = U256::from(f.ledger.timestamp());
    let signed = signed_permit(&f.ledger, token, &wallet, BOB, units::whole(7), deadline);
    f.ledger.advance_time(1);

    let err = f.ledger.asset_mut(token).permit(BOB, &signed).unwrap_err();
    assert!(matches!(err, LedgerError::PermitExpired { .. }));
    assert_eq!(
        f.ledger.asset(token).nonces(wallet.address()).unwrap(),
        U256::zero()
    );
}

#[test]
fn test_beacon_upgrade_reaches_existing_instances() {
    let mut f = fixture();
    let token = deploy_bonding(&mut f, "ABC", ALICE);
    assert_eq!(f.ledger.asset(token).version().unwrap(), 1);

    let v2 = f
        .ledger
        .deploy_asset_logic(OWNER, Arc::new(BondingToken::with_version(2)))
        .unwrap();

    let err = f.ledger.upgrade_beacon(ALICE, f.beacon, v2).unwrap_err();
    assert_eq!(err, LedgerError::Unauthorized(ALICE));

    f.ledger.upgrade_beacon(OWNER, f.beacon, v2).unwrap();
    assert_eq!(f.ledger.asset(token).version().unwrap(), 2);
    // storage is untouched by the upgrade
    assert_eq!(
        f.ledger.asset(token).balance_of(ALICE).unwrap(),
        units::whole(1_000)
    );
}

fn plain_params(mintable: bool, burnable: bool, cap: U256) -> ReservelessParams {
    ReservelessParams {
        name: "Plain".into(),
        symbol: "PLN".into(),
        mintable,
        burnable,
        initial_mint: units::whole(10),
        cap,
        identity: String::new(),
    }
}

#[test]
fn test_reserveless_mint_cap_and_burn() {
    let mut f = fixture();
    let init = abi::encode_reserveless_init(&plain_params(true, true, units::whole(15)), ALICE)
        .unwrap();
    let token = f
        .ledger
        .create2(OWNER, H256::repeat_byte(5), f.plain_beacon, &init, U256::zero())
        .unwrap();

    let err = f
        .ledger
        .asset_mut(token)
        .mint(BOB, BOB, units::whole(1))
        .unwrap_err();
    assert_eq!(err, LedgerError::Unauthorized(BOB));

    f.ledger
        .asset_mut(token)
        .mint(ALICE, BOB, units::whole(5))
        .unwrap();
    let err = f
        .ledger
        .asset_mut(token)
        .mint(ALICE, BOB, U256::one())
        .unwrap_err();
    assert!(matches!(err, LedgerError::CapExceeded { .. }));

    f.ledger.asset_mut(token).burn(BOB, units::whole(2)).unwrap();
    assert_eq!(
        f.ledger.asset(token).total_supply().unwrap(),
        units::whole(13)
    );
    assert!(matches!(
        f.ledger.asset(token).quote_sell(U256::one()),
        Err(LedgerError::Unsupported(_))
    ));
}

#[test]
fn test_reserveless_without_capabilities() {
    let mut f = fixture();
    let init = abi::encode_reserveless_init(&plain_params(false, false, U256::zero()), ALICE)
        .unwrap();
    let token = f
        .ledger
        .create2(OWNER, H256::repeat_byte(6), f.plain_beacon, &init, U256::zero())
        .unwrap();

    assert_eq!(
        f.ledger.asset_mut(token).mint(ALICE, ALICE, U256::one()),
        Err(LedgerError::Unsupported("mint"))
    );
    assert_eq!(
        f.ledger.asset_mut(token).burn(ALICE, U256::one()),
        Err(LedgerError::Unsupported("burn"))
    );
}

#[test]
fn test_plain_account_has_no_symbol() {
    let f = fixture();
    assert_eq!(f.ledger.asset(BOB).try_symbol(), None);
    assert_eq!(f.ledger.asset(f.beacon).try_symbol(), None);
}
