//! Content-addressed deployment
//!
//! A beacon proxy's address is fully determined by the deployer, a salt and
//! its init code, where the init code is the proxy creation bytecode followed
//! by `abi.encode(beacon, initData)`:
//!
//! ```text
//! address = low160(keccak256(0xff ‖ deployer ‖ salt ‖ keccak256(initCode)))
//! ```
//!
//! The factory in the control plane and the runtime both build init code
//! through [`init_code`], so a prediction only diverges from the deployed
//! address when the two sides hold different creation bytecode.

use ethabi::Token;
use ethereum_types::{Address, H256};
use launch_types::{keccak256, low160};

/// Creation bytecode of the beacon proxy template
///
/// Constructor arguments are appended ABI-encoded; the runtime interprets the
/// deployed proxy natively, so only the bytes' identity matters here.
pub const BEACON_PROXY_CREATION_CODE: &[u8] = &[
    0x60, 0x80, 0x60, 0x40, 0x52, 0x60, 0x40, 0x51, 0x61, 0x04, 0x9a, 0x38, 0x03, 0x80, 0x61,
    0x04, 0x9a, 0x83, 0x39, 0x81, 0x01, 0x60, 0x40, 0x81, 0x90, 0x52, 0x61, 0x00, 0x22, 0x91,
    0x61, 0x02, 0x2e, 0x56, 0x5b, 0x61, 0x00, 0x2c, 0x82, 0x82, 0x61, 0x00, 0x33, 0x56, 0x5b,
    0x50, 0x50, 0x61, 0x03, 0x26, 0x56, 0x5b, 0x7f, 0xa3, 0xf0, 0xad, 0x74, 0xe5, 0x42, 0x3a,
    0xeb, 0xfd, 0x80, 0xd3, 0xef, 0x43, 0x46, 0x57, 0x83, 0x35, 0xa9, 0xa7, 0x2a, 0xea, 0xee,
    0x59, 0xff, 0x6c, 0xb3, 0x58, 0x2b, 0x35, 0x13, 0x3d, 0x50, 0x56, 0xfe,
];

/// Proxy init code: `creation_code ‖ abi.encode(beacon, init_data)`
pub fn init_code(creation_code: &[u8], beacon: Address, init_data: &[u8]) -> Vec<u8> {
    let args = ethabi::encode(&[Token::Address(beacon), Token::Bytes(init_data.to_vec())]);
    let mut code = Vec::with_capacity(creation_code.len() + args.len());
    code.extend_from_slice(creation_code);
    code.extend_from_slice(&args);
    code
}

/// EIP-1014 address of `init_code` deployed by `deployer` with `salt`
pub fn create2_address(deployer: Address, salt: H256, init_code: &[u8]) -> Address {
    let mut preimage = Vec::with_capacity(1 + 20 + 32 + 32);
    preimage.push(0xff);
    preimage.extend_from_slice(deployer.as_bytes());
    preimage.extend_from_slice(salt.as_bytes());
    preimage.extend_from_slice(keccak256(init_code).as_bytes());
    low160(keccak256(preimage))
}

/// Nonce-derived address for plain deployments
pub fn create_address(deployer: Address, nonce: u64) -> Address {
    let mut preimage = Vec::with_capacity(20 + 8);
    preimage.extend_from_slice(deployer.as_bytes());
    preimage.extend_from_slice(&nonce.to_be_bytes());
    low160(keccak256(preimage))
}
