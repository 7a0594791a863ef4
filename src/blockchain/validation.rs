//! Pure predicates over blocks and chains. Nothing here mutates state.

use log::debug;
use serde_json::Value;

use super::Block;
use super::hasher::is_digest;
use crate::error::{BlockRejection, ChainRejection};

/// Shape check on a typed block: `hash` is a digest, `prev_hash` is empty
/// for genesis and a digest otherwise. Does not recompute the hash.
pub fn is_valid_block_structure(block: &Block) -> bool {
    if !is_digest(block.hash()) {
        return false;
    }
    if block.index() == 0 {
        block.prev_hash().is_empty()
    } else {
        is_digest(block.prev_hash())
    }
}

/// Shape check on an untyped wire record before it is decoded into a
/// [`Block`]: field presence and primitive types only.
pub fn is_valid_block_record(record: &Value) -> bool {
    let Some(obj) = record.as_object() else {
        return false;
    };
    obj.get("index").is_some_and(Value::is_u64)
        && obj.get("hash").is_some_and(Value::is_string)
        && obj.get("prevHash").is_some_and(Value::is_string)
        && obj.get("timestamp").is_some_and(Value::is_i64)
        && obj.get("data").is_some_and(Value::is_string)
        && obj.get("nonce").is_some_and(Value::is_u64)
}

/// Linkage validation with the first failing condition as the error.
pub fn check_new_block(new_block: &Block, prev_block: &Block) -> Result<(), BlockRejection> {
    if prev_block.index().checked_add(1) != Some(new_block.index()) {
        return Err(BlockRejection::IndexNotSuccessor);
    }
    if new_block.prev_hash() != prev_block.hash() {
        return Err(BlockRejection::PrevHashMismatch);
    }
    if !new_block.has_consistent_hash() {
        return Err(BlockRejection::HashMismatch);
    }
    Ok(())
}

pub fn is_valid_new_block(new_block: &Block, prev_block: &Block) -> bool {
    check_new_block(new_block, prev_block).is_ok()
}

/// Genesis identity is index, hash and data. Timestamp plays no part.
pub fn is_valid_genesis_block(block: &Block) -> bool {
    let genesis = Block::genesis();
    block.index() == 0 && block.hash() == genesis.hash() && block.data() == genesis.data()
}

/// Full-chain validation, stopping at the first bad position.
pub fn check_chain(chain: &[Block]) -> Result<(), ChainRejection> {
    let first = chain.first().ok_or(ChainRejection::Empty)?;
    if !is_valid_genesis_block(first) {
        return Err(ChainRejection::BadGenesis);
    }

    for (position, pair) in chain.windows(2).enumerate() {
        if let Err(reason) = check_new_block(&pair[1], &pair[0]) {
            debug!("chain invalid at block {}: {}", position + 1, reason);
            return Err(ChainRejection::BadLink {
                position: position + 1,
                reason,
            });
        }
    }
    Ok(())
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    check_chain(chain).is_ok()
}
