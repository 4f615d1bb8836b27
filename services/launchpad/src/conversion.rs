//! Atomic two-leg conversion
//!
//! Converting asset A into asset B routes through the native reserve: the
//! control plane pulls A from the caller, sells all of it into A's reserve
//! with no minimum, then spends the whole proceeds buying B for the
//! recipient. Only the final leg carries the caller's minimum; if any leg
//! fails nothing settles.

use crate::error::LaunchpadResult;
use crate::launchpad::Launchpad;
use launch_types::{Address, H256, U256};
use ledger::Permit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    pub asset_in: Address,
    pub asset_out: Address,
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub recipient: Address,
}

/// EIP-2612 signature authorizing the control plane to pull `amount_in`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitSignature {
    pub deadline: U256,
    pub v: u8,
    pub r: H256,
    pub s: H256,
}

impl Launchpad {
    /// Convert `amount_in` of one asset into at least `amount_out_min` of another
    pub fn convert(&mut self, caller: Address, request: ConversionRequest) -> LaunchpadResult<U256> {
        self.atomically(|lp| {
            lp.registry()?.pause.when_not_paused()?;
            lp.convert_legs(caller, &request)
        })
    }

    /// Install the caller's permit on `asset_in`, then convert
    pub fn convert_with_permit(
        &mut self,
        caller: Address,
        request: ConversionRequest,
        signature: PermitSignature,
    ) -> LaunchpadResult<U256> {
        self.atomically(|lp| {
            lp.registry()?.pause.when_not_paused()?;
            let permit = Permit {
                owner: caller,
                spender: lp.address,
                value: request.amount_in,
                deadline: signature.deadline,
                v: signature.v,
                r: signature.r,
                s: signature.s,
            };
            lp.ledger.asset_mut(request.asset_in).permit(lp.address, &permit)?;
            lp.convert_legs(caller, &request)
        })
    }

    fn convert_legs(&mut self, caller: Address, request: &ConversionRequest) -> LaunchpadResult<U256> {
        let this = self.address;

        self.ledger
            .asset_mut(request.asset_in)
            .transfer_from(this, caller, this, request.amount_in)?;

        let reserve = self.ledger.asset(request.asset_in).quote_sell(request.amount_in)?;
        self.ledger
            .asset_mut(request.asset_in)
            .sell(this, request.amount_in, U256::zero(), this)?;

        let amount_out = self.ledger.asset_mut(request.asset_out).buy(
            this,
            reserve,
            request.amount_out_min,
            request.recipient,
        )?;

        log_convert!(
            "Converted {} of {:?} into {} of {:?} via {} reserve",
            request.amount_in,
            request.asset_in,
            amount_out,
            request.asset_out,
            reserve
        );
        Ok(amount_out)
    }
}
