//! Shared fixtures for launchpad integration tests
#![allow(dead_code)]

use ethereum_types::H160;
use launch_types::{units, Address, ReservelessParams, TokenMetadata, U256};
use launchpad::Launchpad;
use ledger::Ledger;

pub const OWNER: Address = H160([0xa1; 20]);
pub const CREATOR: Address = H160([0xc0; 20]);
pub const TRADER: Address = H160([0x7a; 20]);
pub const STRANGER: Address = H160([0x55; 20]);

pub const CHAIN_ID: u64 = 31_337;
pub const GENESIS: u64 = 1_704_067_200;

/// Fresh control plane with a well-funded creator
pub fn launchpad() -> Launchpad {
    launchpad_with_min_reserve(U256::zero())
}

pub fn launchpad_with_min_reserve(min_reserve: U256) -> Launchpad {
    let mut lp = Launchpad::deploy(Ledger::new(CHAIN_ID, GENESIS), OWNER, min_reserve).unwrap();
    lp.ledger_mut().mint_native(CREATOR, units::whole(10_000_000));
    lp.ledger_mut().mint_native(TRADER, units::whole(10_000));
    lp
}

pub fn meta(symbol: &str, creator: Address) -> TokenMetadata {
    TokenMetadata {
        name: format!("{symbol} Token"),
        symbol: symbol.to_string(),
        identity: format!("ipfs://{}", symbol.to_lowercase()),
        creator,
        ratio: 50,
        initial_mint: units::whole(1_000),
        min_total_supply: units::whole(10),
        max_total_supply: units::whole(1_000_000),
    }
}

pub fn plain_params(name: &str) -> ReservelessParams {
    ReservelessParams {
        name: name.to_string(),
        symbol: "PLN".to_string(),
        mintable: true,
        burnable: true,
        initial_mint: units::whole(500),
        cap: units::whole(1_000),
        identity: String::new(),
    }
}

/// Create a seven-character ticker (250 commission) with `reserve` on top
pub fn create(lp: &mut Launchpad, symbol: &str, reserve: u64) -> Address {
    let fee = lp.required_commission(symbol);
    lp.create_token(CREATOR, meta(symbol, CREATOR), fee + units::whole(reserve))
        .unwrap()
}
