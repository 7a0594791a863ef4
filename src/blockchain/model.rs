use log::{debug, info, warn};

use super::Block;
use super::validation::{check_chain, check_new_block, is_valid_block_structure, is_valid_chain};
use crate::error::{BlockRejection, LedgerError, Result};

/// Owner of one local chain. The only stateful piece of the ledger.
///
/// Transitions are append (guarded by linkage validation) and replace
/// (guarded by full validation plus strictly greater length). Fork choice
/// compares raw length, not cumulative work. Callers sharing one manager
/// must hold a lock across each call, e.g. `Mutex<ChainManager>`.
#[derive(Debug, Clone)]
pub struct ChainManager {
    chain: Vec<Block>,
}

impl Default for ChainManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainManager {
    /// Start a chain holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
        }
    }

    /// Resume from a previously held chain, e.g. one restored from storage.
    pub fn with_chain(chain: Vec<Block>) -> Result<Self> {
        check_chain(&chain).map_err(LedgerError::InvalidChain)?;
        Ok(Self { chain })
    }

    /// Read-only view of the current chain.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Return the last block in the chain.
    pub fn latest_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        is_valid_chain(&self.chain)
    }

    /// Append `block` if it directly extends the latest block. On error the
    /// chain is left untouched.
    pub fn add_block_to_chain(&mut self, block: Block) -> Result<&[Block]> {
        if !is_valid_block_structure(&block) {
            debug!("rejected block #{}: malformed", block.index());
            return Err(LedgerError::InvalidBlock(BlockRejection::MalformedStructure));
        }
        let latest = self.latest_block()?;
        if let Err(reason) = check_new_block(&block, latest) {
            debug!("rejected block #{}: {}", block.index(), reason);
            return Err(LedgerError::InvalidBlock(reason));
        }

        info!("appended block #{} (hash={})", block.index(), block.hash());
        self.chain.push(block);
        Ok(&self.chain)
    }

    /// Longest-valid-chain rule with the reason on refusal.
    pub fn try_replace_chain(&mut self, candidate: Vec<Block>) -> Result<()> {
        if let Err(reason) = check_chain(&candidate) {
            warn!("refused candidate chain: {reason}");
            return Err(LedgerError::InvalidChain(reason));
        }
        let (candidate_len, current_len) = (candidate.len(), self.chain.len());
        if candidate_len <= current_len {
            debug!("refused candidate chain: length {candidate_len} <= {current_len}");
            return Err(LedgerError::NotLonger {
                candidate: candidate_len,
                current: current_len,
            });
        }

        info!("replaced chain: length {current_len} -> {candidate_len}");
        self.chain = candidate;
        Ok(())
    }

    /// Replace the held chain iff `candidate` is valid and strictly longer.
    /// Ties keep the incumbent.
    pub fn replace_chain(&mut self, candidate: Vec<Block>) -> bool {
        self.try_replace_chain(candidate).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::mine_block;
    use crate::error::ChainRejection;

    fn grow(manager: &mut ChainManager, blocks: usize) {
        for i in 0..blocks {
            let prev = manager.latest_block().unwrap().clone();
            let block = mine_block(&format!("block {i}"), &prev, 0, 0).unwrap();
            manager.add_block_to_chain(block).unwrap();
        }
    }

    #[test]
    fn starts_with_genesis() {
        let manager = ChainManager::new();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.latest_block().unwrap(), &Block::genesis());
        assert!(manager.is_valid());
    }

    #[test]
    fn appends_valid_successor() {
        let mut manager = ChainManager::new();
        let block = Block::new("hello", manager.latest_block().unwrap(), 0).unwrap();
        let chain = manager.add_block_to_chain(block.clone()).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(manager.latest_block().unwrap(), &block);
    }

    #[test]
    fn stale_prev_hash_leaves_chain_unchanged() {
        let mut manager = ChainManager::new();
        grow(&mut manager, 2);
        let before = manager.chain().to_vec();

        let stale_parent = before[0].clone();
        let stale = Block::new("late", &stale_parent, 0).unwrap();
        let err = manager.add_block_to_chain(stale).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidBlock(BlockRejection::IndexNotSuccessor)
        ));
        assert_eq!(manager.chain(), before.as_slice());
    }

    #[test]
    fn wrong_parent_at_right_height_is_prev_hash_mismatch() {
        let mut manager = ChainManager::new();
        grow(&mut manager, 1);

        let fork_tip = Block::new("other branch", &Block::genesis(), 0).unwrap();
        let foreign = Block::new("fork", &fork_tip, 0).unwrap();

        assert!(matches!(
            manager.add_block_to_chain(foreign),
            Err(LedgerError::InvalidBlock(BlockRejection::PrevHashMismatch))
        ));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn tampered_block_is_rejected() {
        let mut manager = ChainManager::new();
        let good = Block::new("honest", manager.latest_block().unwrap(), 0).unwrap();
        let forged = Block::from_parts(
            good.index(),
            good.hash().to_string(),
            good.prev_hash().to_string(),
            good.timestamp(),
            "dishonest".into(),
            good.nonce(),
        );
        assert!(matches!(
            manager.add_block_to_chain(forged),
            Err(LedgerError::InvalidBlock(BlockRejection::HashMismatch))
        ));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn malformed_block_is_rejected() {
        let mut manager = ChainManager::new();
        let genesis = Block::genesis();
        let junk = Block::from_parts(1, "zz".into(), genesis.hash().into(), 0, "x".into(), 0);
        assert!(matches!(
            manager.add_block_to_chain(junk),
            Err(LedgerError::InvalidBlock(BlockRejection::MalformedStructure))
        ));
    }

    #[test]
    fn longer_valid_chain_replaces() {
        let mut short = ChainManager::new();
        grow(&mut short, 1);
        let mut long = ChainManager::new();
        grow(&mut long, 3);

        assert!(short.replace_chain(long.chain().to_vec()));
        assert_eq!(short.chain(), long.chain());
    }

    #[test]
    fn equal_length_keeps_incumbent() {
        let mut a = ChainManager::new();
        grow(&mut a, 2);
        let mut b = ChainManager::new();
        grow(&mut b, 2);
        let before = a.chain().to_vec();

        assert!(matches!(
            a.try_replace_chain(b.chain().to_vec()),
            Err(LedgerError::NotLonger { candidate: 3, current: 3 })
        ));
        assert_eq!(a.chain(), before.as_slice());
    }

    #[test]
    fn invalid_longer_chain_is_refused() {
        let mut manager = ChainManager::new();
        let mut donor = ChainManager::new();
        grow(&mut donor, 3);
        let mut candidate = donor.chain().to_vec();
        let last = candidate.pop().unwrap();
        candidate.push(Block::from_parts(
            last.index(),
            last.hash().to_string(),
            last.prev_hash().to_string(),
            last.timestamp(),
            "rewritten".into(),
            last.nonce(),
        ));

        assert!(matches!(
            manager.try_replace_chain(candidate),
            Err(LedgerError::InvalidChain(ChainRejection::BadLink { position: 3, .. }))
        ));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn empty_candidate_is_refused() {
        let mut manager = ChainManager::new();
        assert!(!manager.replace_chain(Vec::new()));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn resumes_from_valid_chain_only() {
        let mut donor = ChainManager::new();
        grow(&mut donor, 2);
        let resumed = ChainManager::with_chain(donor.chain().to_vec()).unwrap();
        assert_eq!(resumed.len(), 3);

        assert!(matches!(
            ChainManager::with_chain(Vec::new()),
            Err(LedgerError::InvalidChain(ChainRejection::Empty))
        ));
    }
}
