//! Control plane ABI
//!
//! Notifications are defined as `ethabi` events and written to the ledger log
//! in node format: `topic0` is the event signature hash, indexed parameters
//! follow as topics and the rest is ABI-encoded data. Governance functions are
//! defined so that self-upgrade init calldata can be decoded and replayed.

use crate::error::{LaunchpadError, LaunchpadResult};
use ethabi::{Event, EventParam, Function, Param, ParamType, StateMutability, Token};
use launch_types::{Address, TokenMetadata, H256, U256};
use ledger::asset::abi::{decode_call, TokenReader};

fn event_param(name: &str, kind: ParamType, indexed: bool) -> EventParam {
    EventParam {
        name: name.to_string(),
        kind,
        indexed,
    }
}

fn metadata_tuple() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::String,
        ParamType::String,
        ParamType::String,
        ParamType::Address,
        ParamType::Uint(8),
        ParamType::Uint(256),
        ParamType::Uint(256),
        ParamType::Uint(256),
    ])
}

/// event TokenDeployed(address indexed tokenAddress, TokenMetadata metadata)
pub fn token_deployed_event() -> Event {
    Event {
        name: "TokenDeployed".to_string(),
        inputs: vec![
            event_param("tokenAddress", ParamType::Address, true),
            event_param("metadata", metadata_tuple(), false),
        ],
        anonymous: false,
    }
}

/// event TokenReservelessDeployed(address indexed tokenAddress)
pub fn token_reserveless_deployed_event() -> Event {
    Event {
        name: "TokenReservelessDeployed".to_string(),
        inputs: vec![event_param("tokenAddress", ParamType::Address, true)],
        anonymous: false,
    }
}

/// event TokenUpgraded(address oldImplementation, address newImplementation)
pub fn token_upgraded_event() -> Event {
    Event {
        name: "TokenUpgraded".to_string(),
        inputs: vec![
            event_param("oldImplementation", ParamType::Address, false),
            event_param("newImplementation", ParamType::Address, false),
        ],
        anonymous: false,
    }
}

/// event TokenReservelessUpgraded(address oldImplementation, address newImplementation)
pub fn token_reserveless_upgraded_event() -> Event {
    Event {
        name: "TokenReservelessUpgraded".to_string(),
        inputs: vec![
            event_param("oldImplementation", ParamType::Address, false),
            event_param("newImplementation", ParamType::Address, false),
        ],
        anonymous: false,
    }
}

/// event Upgraded(address indexed implementation)
pub fn upgraded_event() -> Event {
    Event {
        name: "Upgraded".to_string(),
        inputs: vec![event_param("implementation", ParamType::Address, true)],
        anonymous: false,
    }
}

/// event OwnershipTransferred(address indexed previousOwner, address indexed newOwner)
pub fn ownership_transferred_event() -> Event {
    Event {
        name: "OwnershipTransferred".to_string(),
        inputs: vec![
            event_param("previousOwner", ParamType::Address, true),
            event_param("newOwner", ParamType::Address, true),
        ],
        anonymous: false,
    }
}

/// A notification ready to append to the ledger log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLog {
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
}

fn metadata_token(meta: &TokenMetadata) -> Token {
    Token::Tuple(vec![
        Token::String(meta.name.clone()),
        Token::String(meta.symbol.clone()),
        Token::String(meta.identity.clone()),
        Token::Address(meta.creator),
        Token::Uint(U256::from(meta.ratio)),
        Token::Uint(meta.initial_mint),
        Token::Uint(meta.min_total_supply),
        Token::Uint(meta.max_total_supply),
    ])
}

pub fn token_deployed(predicted: Address, meta: &TokenMetadata) -> EncodedLog {
    EncodedLog {
        topics: vec![token_deployed_event().signature(), H256::from(predicted)],
        data: ethabi::encode(&[metadata_token(meta)]),
    }
}

pub fn token_reserveless_deployed(predicted: Address) -> EncodedLog {
    EncodedLog {
        topics: vec![
            token_reserveless_deployed_event().signature(),
            H256::from(predicted),
        ],
        data: Vec::new(),
    }
}

pub fn token_upgraded(old: Address, new: Address) -> EncodedLog {
    EncodedLog {
        topics: vec![token_upgraded_event().signature()],
        data: ethabi::encode(&[Token::Address(old), Token::Address(new)]),
    }
}

pub fn token_reserveless_upgraded(old: Address, new: Address) -> EncodedLog {
    EncodedLog {
        topics: vec![token_reserveless_upgraded_event().signature()],
        data: ethabi::encode(&[Token::Address(old), Token::Address(new)]),
    }
}

pub fn upgraded(implementation: Address) -> EncodedLog {
    EncodedLog {
        topics: vec![upgraded_event().signature(), H256::from(implementation)],
        data: Vec::new(),
    }
}

pub fn ownership_transferred(previous: Address, new: Address) -> EncodedLog {
    EncodedLog {
        topics: vec![
            ownership_transferred_event().signature(),
            H256::from(previous),
            H256::from(new),
        ],
        data: Vec::new(),
    }
}

#[allow(deprecated)]
fn governance_function(name: &str, inputs: Vec<Param>) -> Function {
    Function {
        name: name.to_string(),
        inputs,
        outputs: vec![],
        constant: None,
        state_mutability: StateMutability::NonPayable,
    }
}

fn address_input(name: &str) -> Vec<Param> {
    vec![Param {
        name: name.to_string(),
        kind: ParamType::Address,
        internal_type: None,
    }]
}

/// Owner-only calls that may ride along a self-upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernanceCall {
    Pause,
    Unpause,
    SetContractCenter(Address),
    UpgradeToken(Address),
    UpgradeTokenReserveless(Address),
    TransferOwnership(Address),
    RenounceOwnership,
}

impl GovernanceCall {
    fn function(&self) -> Function {
        match self {
            GovernanceCall::Pause => governance_function("pause", vec![]),
            GovernanceCall::Unpause => governance_function("unpause", vec![]),
            GovernanceCall::SetContractCenter(_) => {
                governance_function("setContractCenter", address_input("contractCenter"))
            }
            GovernanceCall::UpgradeToken(_) => {
                governance_function("upgradeToken", address_input("newImplementation"))
            }
            GovernanceCall::UpgradeTokenReserveless(_) => {
                governance_function("upgradeTokenReserveless", address_input("newImplementation"))
            }
            GovernanceCall::TransferOwnership(_) => {
                governance_function("transferOwnership", address_input("newOwner"))
            }
            GovernanceCall::RenounceOwnership => governance_function("renounceOwnership", vec![]),
        }
    }

    fn argument(&self) -> Option<Address> {
        match *self {
            GovernanceCall::SetContractCenter(a)
            | GovernanceCall::UpgradeToken(a)
            | GovernanceCall::UpgradeTokenReserveless(a)
            | GovernanceCall::TransferOwnership(a) => Some(a),
            GovernanceCall::Pause | GovernanceCall::Unpause | GovernanceCall::RenounceOwnership => None,
        }
    }

    /// Every call shape with a placeholder argument, for selector matching
    fn templates() -> [GovernanceCall; 7] {
        let zero = Address::zero();
        [
            GovernanceCall::Pause,
            GovernanceCall::Unpause,
            GovernanceCall::SetContractCenter(zero),
            GovernanceCall::UpgradeToken(zero),
            GovernanceCall::UpgradeTokenReserveless(zero),
            GovernanceCall::TransferOwnership(zero),
            GovernanceCall::RenounceOwnership,
        ]
    }

    pub fn encode(&self) -> LaunchpadResult<Vec<u8>> {
        let args: Vec<Token> = self.argument().map(Token::Address).into_iter().collect();
        self.function()
            .encode_input(&args)
            .map_err(|e| ledger::LedgerError::InvalidCalldata(e.to_string()).into())
    }

    pub fn decode(data: &[u8]) -> LaunchpadResult<Self> {
        let selector = data.get(..4).ok_or_else(|| {
            LaunchpadError::from(ledger::LedgerError::InvalidCalldata(
                "calldata shorter than a selector".into(),
            ))
        })?;
        let template = Self::templates()
            .into_iter()
            .find(|call| call.function().short_signature() == selector)
            .ok_or_else(|| {
                LaunchpadError::from(ledger::LedgerError::InvalidCalldata(
                    "unknown governance selector".into(),
                ))
            })?;

        let mut reader = TokenReader::new(decode_call(&template.function(), data)?);
        Ok(match template {
            GovernanceCall::SetContractCenter(_) => GovernanceCall::SetContractCenter(reader.address()?),
            GovernanceCall::UpgradeToken(_) => GovernanceCall::UpgradeToken(reader.address()?),
            GovernanceCall::UpgradeTokenReserveless(_) => {
                GovernanceCall::UpgradeTokenReserveless(reader.address()?)
            }
            GovernanceCall::TransferOwnership(_) => GovernanceCall::TransferOwnership(reader.address()?),
            other => other,
        })
    }
}
