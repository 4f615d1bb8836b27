//! Common building blocks: error types and hashing helpers

pub mod errors;
pub mod hashing;
