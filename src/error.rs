use thiserror::Error;

/// Why a single block was refused as the successor of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockRejection {
    #[error("block is malformed")]
    MalformedStructure,
    #[error("index is not a direct successor of the previous block")]
    IndexNotSuccessor,
    #[error("prevHash does not match the previous block's hash")]
    PrevHashMismatch,
    #[error("hash does not match block contents")]
    HashMismatch,
}

/// Why a candidate chain failed full validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainRejection {
    #[error("chain is empty")]
    Empty,
    #[error("first block is not the canonical genesis block")]
    BadGenesis,
    #[error("block at position {position} rejected: {reason}")]
    BadLink {
        position: usize,
        reason: BlockRejection,
    },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid block: {0}")]
    InvalidBlock(BlockRejection),

    #[error("Invalid chain: {0}")]
    InvalidChain(ChainRejection),

    #[error("Candidate chain is not longer ({candidate} <= {current})")]
    NotLonger { candidate: usize, current: usize },

    #[error("Chain holds no blocks")]
    EmptyChain,

    #[error("Mining cancelled after {attempts} attempts")]
    MiningCancelled { attempts: u64 },

    #[error("Nonce space exhausted")]
    NonceExhausted,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
