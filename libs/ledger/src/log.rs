//! Append-only event log

use ethabi::RawLog;
use ethereum_types::{Address, H256};

/// One emitted event, in the shape a node would return it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Emitting account
    pub address: Address,
    /// `topics[0]` is the event signature hash for non-anonymous events
    pub topics: Vec<H256>,
    /// ABI-encoded non-indexed parameters
    pub data: Vec<u8>,
    /// Block in which the entry was emitted
    pub block_number: u64,
}

impl LogEntry {
    /// Raw form accepted by `ethabi::Event::parse_log`
    pub fn to_raw(&self) -> RawLog {
        RawLog {
            topics: self.topics.clone(),
            data: self.data.clone(),
        }
    }

    pub fn signature(&self) -> Option<H256> {
        self.topics.first().copied()
    }
}
