//! Keccak-256 helpers
//!
//! Every content address, salt, storage slot and event topic in the workspace
//! goes through these two functions.

use ethereum_types::{Address, H256};
use sha3::{Digest, Keccak256};

/// Keccak-256 of arbitrary bytes
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    H256::from_slice(&Keccak256::digest(data.as_ref()))
}

/// Lowest 160 bits of a 256-bit word, as an address
pub fn low160(word: H256) -> Address {
    Address::from_slice(&word.as_bytes()[12..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty_input() {
        // keccak256("") is a well known constant
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_low160_takes_trailing_bytes() {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&[0xab; 20]);
        word[0] = 0xff;
        assert_eq!(low160(H256(word)), Address::repeat_byte(0xab));
    }
}
