//! Asset instances
//!
//! An asset instance is a beacon proxy whose token ledger lives in its own
//! storage ([`AssetState`]) and whose behavior comes from the implementation
//! its beacon currently serves ([`AssetLogic`]). Two families exist:
//!
//! - [`BondingToken`]: reserved assets priced on a bonding curve, holding
//!   their native reserve as the instance's own balance
//! - [`PlainToken`]: reserveless assets with optional owner mint, holder burn
//!   and a supply cap
//!
//! The ERC-20 surface (`transfer`, `approve`, `transferFrom`, `permit`) is
//! provided once as default trait methods.

pub mod abi;
pub mod bonding;
pub mod permit;
pub mod plain;
pub mod state;

pub use bonding::BondingToken;
pub use permit::Permit;
pub use plain::PlainToken;
pub use state::{asset_slot, AssetProfile, AssetState};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use ethereum_types::{Address, H256, U256};
use launch_types::Family;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Call context handed to asset logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The instance being executed
    pub this: Address,
    /// Immediate caller
    pub sender: Address,
    /// Native value attached, already credited to `this`
    pub value: U256,
}

pub(crate) fn emit_transfer(ledger: &mut Ledger, this: Address, from: Address, to: Address, value: U256) {
    let (topics, data) = abi::pair_log(&abi::transfer_event(), from, to, value);
    ledger.emit(this, topics, data);
}

pub(crate) fn emit_approval(
    ledger: &mut Ledger,
    this: Address,
    owner: Address,
    spender: Address,
    value: U256,
) {
    let (topics, data) = abi::pair_log(&abi::approval_event(), owner, spender, value);
    ledger.emit(this, topics, data);
}

/// Behavior shared by every instance behind one implementation
pub trait AssetLogic: fmt::Debug + Send + Sync {
    fn family(&self) -> Family;

    /// Implementation revision, observable after upgrades
    fn version(&self) -> u32;

    /// Decode `data` and create the instance's storage
    fn initialize(&self, ledger: &mut Ledger, frame: Frame, data: &[u8]) -> LedgerResult<()>;

    fn symbol(&self, ledger: &Ledger, this: Address) -> LedgerResult<String> {
        Ok(ledger.asset_state(this)?.symbol.clone())
    }

    fn transfer(&self, ledger: &mut Ledger, frame: Frame, to: Address, amount: U256) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::InvalidReceiver(to));
        }
        ledger
            .asset_state_mut(frame.this)?
            .move_balance(frame.sender, to, amount)?;
        emit_transfer(ledger, frame.this, frame.sender, to, amount);
        Ok(())
    }

    fn approve(
        &self,
        ledger: &mut Ledger,
        frame: Frame,
        spender: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        ledger
            .asset_state_mut(frame.this)?
            .set_allowance(frame.sender, spender, amount);
        emit_approval(ledger, frame.this, frame.sender, spender, amount);
        Ok(())
    }

    fn transfer_from(
        &self,
        ledger: &mut Ledger,
        frame: Frame,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::InvalidReceiver(to));
        }
        let state = ledger.asset_state_mut(frame.this)?;
        state.spend_allowance(from, frame.sender, amount)?;
        state.move_balance(from, to, amount)?;
        emit_transfer(ledger, frame.this, from, to, amount);
        Ok(())
    }

    fn permit(&self, ledger: &mut Ledger, frame: Frame, permit: &Permit) -> LedgerResult<()> {
        let now = ledger.timestamp();
        if permit.deadline < U256::from(now) {
            return Err(LedgerError::PermitExpired {
                deadline: permit.deadline,
                now,
            });
        }

        let state = ledger.asset_state(frame.this)?;
        let domain = permit::domain_separator(&state.name, ledger.chain_id(), frame.this);
        let digest = permit::permit_digest(
            domain,
            permit.owner,
            permit.spender,
            permit.value,
            state.nonce(permit.owner),
            permit.deadline,
        );
        let recovered = permit::recover(digest, permit.v, permit.r, permit.s)?;
        if recovered != permit.owner {
            return Err(LedgerError::InvalidSigner {
                recovered,
                expected: permit.owner,
            });
        }

        let state = ledger.asset_state_mut(frame.this)?;
        state.consume_nonce(permit.owner);
        state.set_allowance(permit.owner, permit.spender, permit.value);
        emit_approval(ledger, frame.this, permit.owner, permit.spender, permit.value);
        debug!("Permit accepted for {:?} -> {:?}", permit.owner, permit.spender);
        Ok(())
    }

    /// Reserve paid out for selling `amount_in` tokens
    fn quote_sell(&self, _ledger: &Ledger, _this: Address, _amount_in: U256) -> LedgerResult<U256> {
        Err(LedgerError::Unsupported("quote_sell"))
    }

    /// Tokens received for depositing `value` reserve
    fn quote_buy(&self, _ledger: &Ledger, _this: Address, _value: U256) -> LedgerResult<U256> {
        Err(LedgerError::Unsupported("quote_buy"))
    }

    fn buy(&self, _ledger: &mut Ledger, _frame: Frame, _min_out: U256, _to: Address) -> LedgerResult<U256> {
        Err(LedgerError::Unsupported("buy"))
    }

    fn sell(
        &self,
        _ledger: &mut Ledger,
        _frame: Frame,
        _amount_in: U256,
        _min_out: U256,
        _to: Address,
    ) -> LedgerResult<U256> {
        Err(LedgerError::Unsupported("sell"))
    }

    fn mint(&self, _ledger: &mut Ledger, _frame: Frame, _to: Address, _amount: U256) -> LedgerResult<()> {
        Err(LedgerError::Unsupported("mint"))
    }

    fn burn(&self, _ledger: &mut Ledger, _frame: Frame, _amount: U256) -> LedgerResult<()> {
        Err(LedgerError::Unsupported("burn"))
    }
}

/// Read-only handle to one instance
///
/// Reads resolve the implementation first, so an instance whose beacon
/// serves no implementation is unreadable, just as it is uncallable.
#[derive(Debug, Clone, Copy)]
pub struct AssetView<'a> {
    ledger: &'a Ledger,
    token: Address,
}

impl<'a> AssetView<'a> {
    pub(crate) fn new(ledger: &'a Ledger, token: Address) -> Self {
        Self { ledger, token }
    }

    pub fn address(&self) -> Address {
        self.token
    }

    pub fn logic(&self) -> LedgerResult<Arc<dyn AssetLogic>> {
        self.ledger.resolve_logic(self.token)
    }

    fn state(&self) -> LedgerResult<&'a AssetState> {
        self.logic()?;
        self.ledger.asset_state(self.token)
    }

    pub fn symbol(&self) -> LedgerResult<String> {
        self.logic()?.symbol(self.ledger, self.token)
    }

    /// `symbol()` as a capability check: `None` for anything that cannot answer
    pub fn try_symbol(&self) -> Option<String> {
        self.symbol().ok()
    }

    pub fn name(&self) -> LedgerResult<String> {
        Ok(self.state()?.name.clone())
    }

    pub fn identity(&self) -> LedgerResult<String> {
        Ok(self.state()?.identity.clone())
    }

    pub fn family(&self) -> LedgerResult<Family> {
        Ok(self.logic()?.family())
    }

    pub fn version(&self) -> LedgerResult<u32> {
        Ok(self.logic()?.version())
    }

    pub fn profile(&self) -> LedgerResult<AssetProfile> {
        Ok(self.state()?.profile.clone())
    }

    pub fn total_supply(&self) -> LedgerResult<U256> {
        Ok(self.state()?.total_supply)
    }

    pub fn balance_of(&self, owner: Address) -> LedgerResult<U256> {
        Ok(self.state()?.balance_of(owner))
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> LedgerResult<U256> {
        Ok(self.state()?.allowance(owner, spender))
    }

    pub fn nonces(&self, owner: Address) -> LedgerResult<U256> {
        Ok(self.state()?.nonce(owner))
    }

    /// Native balance held by the instance
    pub fn reserve(&self) -> U256 {
        self.ledger.balance_of(self.token)
    }

    pub fn domain_separator(&self) -> LedgerResult<H256> {
        let state = self.state()?;
        Ok(permit::domain_separator(
            &state.name,
            self.ledger.chain_id(),
            self.token,
        ))
    }

    pub fn quote_sell(&self, amount_in: U256) -> LedgerResult<U256> {
        self.logic()?.quote_sell(self.ledger, self.token, amount_in)
    }

    pub fn quote_buy(&self, value: U256) -> LedgerResult<U256> {
        self.logic()?.quote_buy(self.ledger, self.token, value)
    }
}

/// Mutating handle to one instance; each call is all-or-nothing
#[derive(Debug)]
pub struct AssetClient<'a> {
    ledger: &'a mut Ledger,
    token: Address,
}

impl<'a> AssetClient<'a> {
    pub(crate) fn new(ledger: &'a mut Ledger, token: Address) -> Self {
        Self { ledger, token }
    }

    pub fn view(&self) -> AssetView<'_> {
        AssetView::new(self.ledger, self.token)
    }

    fn call<T, F>(&mut self, sender: Address, value: U256, body: F) -> LedgerResult<T>
    where
        F: FnOnce(&dyn AssetLogic, &mut Ledger, Frame) -> LedgerResult<T>,
    {
        let token = self.token;
        self.ledger.atomically(|ledger| {
            let logic = ledger.resolve_logic(token)?;
            ledger.transfer_value(sender, token, value)?;
            let frame = Frame {
                this: token,
                sender,
                value,
            };
            body(logic.as_ref(), ledger, frame)
        })
    }

    pub fn transfer(&mut self, sender: Address, to: Address, amount: U256) -> LedgerResult<()> {
        self.call(sender, U256::zero(), |logic, ledger, frame| {
            logic.transfer(ledger, frame, to, amount)
        })
    }

    pub fn approve(&mut self, sender: Address, spender: Address, amount: U256) -> LedgerResult<()> {
        self.call(sender, U256::zero(), |logic, ledger, frame| {
            logic.approve(ledger, frame, spender, amount)
        })
    }

    pub fn transfer_from(
        &mut self,
        sender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        self.call(sender, U256::zero(), |logic, ledger, frame| {
            logic.transfer_from(ledger, frame, from, to, amount)
        })
    }

    pub fn permit(&mut self, sender: Address, permit: &Permit) -> LedgerResult<()> {
        self.call(sender, U256::zero(), |logic, ledger, frame| {
            logic.permit(ledger, frame, permit)
        })
    }

    /// Deposit `value` native units, minting at least `min_out` to `to`
    pub fn buy(&mut self, sender: Address, value: U256, min_out: U256, to: Address) -> LedgerResult<U256> {
        self.call(sender, value, |logic, ledger, frame| {
            logic.buy(ledger, frame, min_out, to)
        })
    }

    /// Burn `amount_in` of the sender's tokens, paying at least `min_out` to `to`
    pub fn sell(
        &mut self,
        sender: Address,
        amount_in: U256,
        min_out: U256,
        to: Address,
    ) -> LedgerResult<U256> {
        self.call(sender, U256::zero(), |logic, ledger, frame| {
            logic.sell(ledger, frame, amount_in, min_out, to)
        })
    }

    pub fn mint(&mut self, sender: Address, to: Address, amount: U256) -> LedgerResult<()> {
        self.call(sender, U256::zero(), |logic, ledger, frame| {
            logic.mint(ledger, frame, to, amount)
        })
    }

    pub fn burn(&mut self, sender: Address, amount: U256) -> LedgerResult<()> {
        self.call(sender, U256::zero(), |logic, ledger, frame| {
            logic.burn(ledger, frame, amount)
        })
    }
}
