use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use super::Block;
use super::hasher::{HASH_HEX_LEN, meets_difficulty};
use crate::error::{LedgerError, Result};

/// Perform Proof-of-Work: try nonces from `start_nonce` upwards until the
/// block hash starts with `difficulty` zeros (in hex). Unbounded; see
/// [`mine_block_cancellable`] for a search the caller can abandon.
pub fn mine_block(
    data: &str,
    prev_block: &Block,
    difficulty: usize,
    start_nonce: u64,
) -> Result<Block> {
    let never = AtomicBool::new(false);
    mine_block_cancellable(data, prev_block, difficulty, start_nonce, &never)
}

/// Same search as [`mine_block`], checking `cancel` before each nonce.
///
/// Every candidate is built with [`Block::new`], so each attempt carries the
/// time it was built at. Nothing is committed anywhere; an abandoned search
/// leaves no trace.
pub fn mine_block_cancellable(
    data: &str,
    prev_block: &Block,
    difficulty: usize,
    start_nonce: u64,
    cancel: &AtomicBool,
) -> Result<Block> {
    if difficulty > HASH_HEX_LEN {
        return Err(LedgerError::InvalidInput(format!(
            "difficulty {difficulty} exceeds digest length {HASH_HEX_LEN}"
        )));
    }

    let mut nonce = start_nonce;
    let mut attempts: u64 = 0;
    loop {
        if cancel.load(Ordering::Relaxed) {
            debug!("MINER - cancelled after {attempts} attempts");
            return Err(LedgerError::MiningCancelled { attempts });
        }

        let candidate = Block::new(data, prev_block, nonce)?;
        attempts += 1;
        if meets_difficulty(candidate.hash(), difficulty) {
            info!(
                "MINER - found block #{} (nonce={}, attempts={})",
                candidate.index(),
                nonce,
                attempts
            );
            return Ok(candidate);
        }

        nonce = nonce.checked_add(1).ok_or(LedgerError::NonceExhausted)?;
    }
}
