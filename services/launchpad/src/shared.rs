//! Thread-safe handle for concurrent callers
//!
//! Whole operations are serialized behind one mutex, so the check-then-insert
//! on the symbol registry can never interleave with another creation.

use crate::conversion::ConversionRequest;
use crate::error::LaunchpadResult;
use crate::launchpad::Launchpad;
use launch_types::{Address, ReservelessParams, TokenMetadata, U256};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedLaunchpad {
    inner: Arc<Mutex<Launchpad>>,
}

impl SharedLaunchpad {
    pub fn new(launchpad: Launchpad) -> Self {
        Self {
            inner: Arc::new(Mutex::new(launchpad)),
        }
    }

    /// Run `f` with exclusive access to the control plane
    pub fn with<T>(&self, f: impl FnOnce(&mut Launchpad) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn create_token(&self, caller: Address, meta: TokenMetadata, value: U256) -> LaunchpadResult<Address> {
        self.with(|lp| lp.create_token(caller, meta, value))
    }

    pub fn create_token_reserveless(
        &self,
        caller: Address,
        params: ReservelessParams,
    ) -> LaunchpadResult<Address> {
        self.with(|lp| lp.create_token_reserveless(caller, params))
    }

    pub fn convert(&self, caller: Address, request: ConversionRequest) -> LaunchpadResult<U256> {
        self.with(|lp| lp.convert(caller, request))
    }

    pub fn tokens(&self, symbol: &str) -> LaunchpadResult<Address> {
        self.with(|lp| lp.tokens(symbol))
    }
}
