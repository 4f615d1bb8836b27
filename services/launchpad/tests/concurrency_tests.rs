//! Concurrent callers through the shared handle

mod common;

use common::*;
use launch_types::{units, Address};
use launchpad::{LaunchpadError, SharedLaunchpad};
use std::thread;

#[test]
fn test_racing_creations_of_one_symbol_yield_one_instance() {
    let shared = SharedLaunchpad::new(launchpad());
    let fee = units::whole(250);

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut m = meta("RACEXXX", CREATOR);
                m.identity = format!("racer-{i}");
                shared.create_token(CREATOR, m, fee + units::whole(1))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<Address> = results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();

    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter(|r| r.is_err())
        .all(|r| matches!(r, Err(LaunchpadError::TokenSymbolExist))));
    assert_eq!(shared.tokens("RACEXXX").unwrap(), winners[0]);
    // losers paid nothing
    shared.with(|lp| {
        assert_eq!(
            lp.ledger().balance_of(Address::zero()),
            fee
        );
    });
}

#[test]
fn test_distinct_symbols_created_concurrently() {
    let shared = SharedLaunchpad::new(launchpad());
    let symbols = ["AAAAAAA", "BBBBBBB", "CCCCCCC", "DDDDDDD"];

    let handles: Vec<_> = symbols
        .iter()
        .map(|symbol| {
            let shared = shared.clone();
            let symbol = symbol.to_string();
            thread::spawn(move || shared.create_token(CREATOR, meta(&symbol, CREATOR), units::whole(260)))
        })
        .collect();

    let mut addresses: Vec<Address> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();

    for symbol in symbols {
        assert!(addresses.contains(&shared.tokens(symbol).unwrap()));
    }
    addresses.sort();
    addresses.dedup();
    assert_eq!(addresses.len(), symbols.len());
}
