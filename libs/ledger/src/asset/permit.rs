//! EIP-2612 delegated authorization
//!
//! The owner signs an EIP-712 digest off-ledger; anyone may then submit it to
//! set the owner's allowance for a spender. Each accepted permit consumes the
//! owner's current nonce.

use crate::error::{LedgerError, LedgerResult};
use ethabi::Token;
use ethereum_types::{Address, H256, U256};
use ethers_core::types::Signature;
use launch_types::keccak256;

/// Version string bound into every asset's domain separator
pub const DOMAIN_VERSION: &str = "1";

const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

const PERMIT_TYPE: &str =
    "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// A signed authorization as submitted on-ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permit {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub deadline: U256,
    pub v: u8,
    pub r: H256,
    pub s: H256,
}

pub fn permit_typehash() -> H256 {
    keccak256(PERMIT_TYPE.as_bytes())
}

pub fn domain_separator(name: &str, chain_id: u64, verifying_contract: Address) -> H256 {
    keccak256(ethabi::encode(&[
        Token::FixedBytes(keccak256(DOMAIN_TYPE.as_bytes()).as_bytes().to_vec()),
        Token::FixedBytes(keccak256(name.as_bytes()).as_bytes().to_vec()),
        Token::FixedBytes(keccak256(DOMAIN_VERSION.as_bytes()).as_bytes().to_vec()),
        Token::Uint(U256::from(chain_id)),
        Token::Address(verifying_contract),
    ]))
}

/// Digest the owner signs: `keccak256(0x1901 ‖ domain ‖ structHash)`
pub fn permit_digest(
    domain: H256,
    owner: Address,
    spender: Address,
    value: U256,
    nonce: U256,
    deadline: U256,
) -> H256 {
    let struct_hash = keccak256(ethabi::encode(&[
        Token::FixedBytes(permit_typehash().as_bytes().to_vec()),
        Token::Address(owner),
        Token::Address(spender),
        Token::Uint(value),
        Token::Uint(nonce),
        Token::Uint(deadline),
    ]));

    let mut preimage = Vec::with_capacity(2 + 32 + 32);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(domain.as_bytes());
    preimage.extend_from_slice(struct_hash.as_bytes());
    keccak256(preimage)
}

/// Recover the signer of `digest`
pub fn recover(digest: H256, v: u8, r: H256, s: H256) -> LedgerResult<Address> {
    let signature = Signature {
        r: U256::from_big_endian(r.as_bytes()),
        s: U256::from_big_endian(s.as_bytes()),
        v: u64::from(v),
    };
    signature
        .recover(digest)
        .map_err(|e| LedgerError::InvalidSignature(e.to_string()))
}
