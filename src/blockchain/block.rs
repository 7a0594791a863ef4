use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hasher::calculate_hash;
use super::{GENESIS_DATA, GENESIS_TIMESTAMP};
use crate::error::{LedgerError, Result};

/// A single link in the chain. Fields are private: a block is never edited
/// in place, "changing" one means building a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    index: u64,
    hash: String,
    prev_hash: String,
    timestamp: i64, // Unix timestamp (UTC, seconds)
    data: String,
    nonce: u64, // Proof-of-Work nonce
}

impl Block {
    /// The fixed genesis block. Every call on every node yields the same hash.
    pub fn genesis() -> Self {
        let (index, prev_hash, nonce) = (0, String::new(), 0);
        let hash = calculate_hash(index, &prev_hash, GENESIS_TIMESTAMP, GENESIS_DATA, nonce);
        Self {
            index,
            hash,
            prev_hash,
            timestamp: GENESIS_TIMESTAMP,
            data: GENESIS_DATA.to_string(),
            nonce,
        }
    }

    /// Build the successor of `prev_block` carrying `data`, stamped with the
    /// current time and hashed with `nonce`. Does not perform proof-of-work.
    pub fn new(data: &str, prev_block: &Block, nonce: u64) -> Result<Self> {
        if data.is_empty() {
            return Err(LedgerError::InvalidInput("block data must not be empty".into()));
        }
        let index = prev_block
            .index
            .checked_add(1)
            .ok_or_else(|| LedgerError::InvalidInput("block index overflow".into()))?;
        let timestamp = Utc::now().timestamp();
        let prev_hash = prev_block.hash.clone();
        let hash = calculate_hash(index, &prev_hash, timestamp, data, nonce);

        Ok(Self {
            index,
            hash,
            prev_hash,
            timestamp,
            data: data.to_string(),
            nonce,
        })
    }

    /// Assemble a block from raw fields without any checks, e.g. a record
    /// received from a peer. Run it through the validator before trusting it.
    pub fn from_parts(
        index: u64,
        hash: String,
        prev_hash: String,
        timestamp: i64,
        data: String,
        nonce: u64,
    ) -> Self {
        Self {
            index,
            hash,
            prev_hash,
            timestamp,
            data,
            nonce,
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn prev_hash(&self) -> &str {
        &self.prev_hash
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Recompute the digest from the block's other fields.
    pub fn compute_hash(&self) -> String {
        calculate_hash(self.index, &self.prev_hash, self.timestamp, &self.data, self.nonce)
    }

    /// Whether the stored `hash` still matches the contents.
    pub fn has_consistent_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }
}
