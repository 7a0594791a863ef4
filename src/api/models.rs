use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

use crate::blockchain::{Block, ChainManager, DEFAULT_DIFFICULTY};

/// Shared node state: one chain manager behind a lock, plus the difficulty
/// the node mines at.
pub struct AppState {
    pub blockchain: Mutex<ChainManager>,
    pub difficulty: Mutex<usize>,
}

impl AppState {
    pub fn new(difficulty: usize) -> Self {
        Self {
            blockchain: Mutex::new(ChainManager::new()),
            difficulty: Mutex::new(difficulty),
        }
    }

    /// Lock the chain. A panic in another handler cannot leave the chain
    /// half-written (mutations are a single push or swap), so a poisoned
    /// lock is recovered.
    pub fn chain(&self) -> MutexGuard<'_, ChainManager> {
        self.blockchain.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn difficulty(&self) -> usize {
        *self.difficulty.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_difficulty(&self, difficulty: usize) {
        *self.difficulty.lock().unwrap_or_else(|e| e.into_inner()) = difficulty;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct AppendResponse {
    pub index: u64,
    pub hash: String,
    pub length: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ReplaceResponse {
    pub replaced: bool,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/* ---------- Mining API Models ---------- */

#[derive(Deserialize)]
pub struct MineRequest {
    pub data: String,
    pub difficulty: Option<usize>,
}

#[derive(Serialize, Deserialize)]
pub struct MineResponse {
    pub mined_index: u64,
    pub hash: String,
    pub nonce: u64,
    pub difficulty: usize,
}

#[derive(Serialize, Deserialize)]
pub struct DifficultyResponse {
    pub difficulty: usize,
}

#[derive(Deserialize)]
pub struct SetDifficultyRequest {
    pub difficulty: usize,
}
