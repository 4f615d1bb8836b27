//! Asset creation and symbol registry

use crate::abi;
use crate::commission::CommissionSchedule;
use crate::error::{LaunchpadError, LaunchpadResult};
use crate::launchpad::Launchpad;
use launch_types::{keccak256, Address, ReservelessParams, TokenMetadata, H256, U256};
use ledger::asset::abi::{encode_reserved_init, encode_reserveless_init};

/// Salt of a reserved-family instance: one address per symbol
pub fn reserved_salt(symbol: &str) -> H256 {
    keccak256(symbol.as_bytes())
}

/// Salt of a reserveless instance: `keccak256(timestamp ‖ name)`
pub fn reserveless_salt(timestamp: u64, name: &str) -> H256 {
    let mut preimage = vec![0u8; 32];
    U256::from(timestamp).to_big_endian(&mut preimage);
    preimage.extend_from_slice(name.as_bytes());
    keccak256(preimage)
}

impl Launchpad {
    /// Create a reserved-family asset, paying `value` in native units
    ///
    /// The commission for the symbol is burned and the remainder becomes the
    /// asset's opening reserve, which must be non-zero and at least the
    /// configured minimum. The symbol is registered only after the
    /// deployment landed at its predicted address.
    pub fn create_token(
        &mut self,
        caller: Address,
        meta: TokenMetadata,
        value: U256,
    ) -> LaunchpadResult<Address> {
        self.atomically(|lp| {
            lp.registry()?.pause.when_not_paused()?;
            lp.receive_value(caller, value)?;

            let required = CommissionSchedule::required_commission(&meta.symbol);
            if value < required {
                return Err(LaunchpadError::InvalidComission(required));
            }
            let reserve = value - required;
            // an empty reserve leaves the curve unpriceable
            let floor = lp.min_opening_reserve.max(U256::one());
            if reserve < floor {
                return Err(LaunchpadError::InvalidMinReserve(floor));
            }
            if lp.registry()?.token(&meta.symbol).is_some() {
                return Err(LaunchpadError::TokenSymbolExist);
            }

            let init = encode_reserved_init(&meta)?;
            let salt = reserved_salt(&meta.symbol);
            let predicted = lp.factory.predict(lp.address, salt, &init);
            lp.emit(abi::token_deployed(predicted, &meta));

            lp.ledger.transfer_value(lp.address, Address::zero(), required)?;
            log_commission!("Burned commission {} for {}", required, meta.symbol);

            let deployed =
                lp.factory
                    .deploy_and_verify(&mut lp.ledger, lp.address, salt, &init, reserve)?;
            lp.registry_mut()?.register(&meta.symbol, deployed)?;

            log_deploy!(
                "Token {} deployed at {:?} with opening reserve {}",
                meta.symbol,
                deployed,
                reserve
            );
            Ok(deployed)
        })
    }

    /// Create a reserveless asset owned by `caller`; it is not registered
    pub fn create_token_reserveless(
        &mut self,
        caller: Address,
        params: ReservelessParams,
    ) -> LaunchpadResult<Address> {
        self.atomically(|lp| {
            let registry = lp.registry()?;
            registry.pause.when_not_paused()?;
            let beacon = registry.reserveless_beacon;

            let init = encode_reserveless_init(&params, caller)?;
            let salt = reserveless_salt(lp.ledger.timestamp(), &params.name);
            let predicted = lp.factory.predict(beacon, salt, &init);
            lp.emit(abi::token_reserveless_deployed(predicted));

            let deployed =
                lp.factory
                    .deploy_and_verify(&mut lp.ledger, beacon, salt, &init, U256::zero())?;

            log_deploy!(
                "Reserveless token {} deployed at {:?} for {:?}",
                params.symbol,
                deployed,
                caller
            );
            Ok(deployed)
        })
    }

    /// Registered instance for `symbol`, null when absent
    pub fn tokens(&self, symbol: &str) -> LaunchpadResult<Address> {
        Ok(self.registry()?.token(symbol).unwrap_or_default())
    }

    /// Whether `token` answers `symbol()` and is the instance registered under it
    pub fn is_token_exists(&self, token: Address) -> LaunchpadResult<bool> {
        let registry = self.registry()?;
        Ok(self
            .ledger
            .asset(token)
            .try_symbol()
            .and_then(|symbol| registry.token(&symbol))
            .is_some_and(|registered| registered == token))
    }
}
