pub mod block;
pub mod hasher;
pub mod miner;
pub mod model;
pub mod validation;

pub use block::Block;
pub use hasher::{calculate_hash, meets_difficulty};
pub use miner::{mine_block, mine_block_cancellable};
pub use model::ChainManager;
pub use validation::{
    check_chain, check_new_block, is_valid_block_record, is_valid_block_structure,
    is_valid_chain, is_valid_genesis_block, is_valid_new_block,
};

/// Payload of the genesis block.
pub const GENESIS_DATA: &str = "This is the genesis";

/// Genesis timestamp (2020-01-01T00:00:00Z), fixed so every node derives the same root.
pub const GENESIS_TIMESTAMP: i64 = 1_577_836_800;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: usize = 3;

/// Difficulty bound for the node (keep low in dev to avoid long waits)
pub const MAX_DIFFICULTY: usize = 6;
