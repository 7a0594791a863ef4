//! Core ledger of a minimal proof-of-work blockchain: block construction,
//! validation, mining and longest-valid-chain fork choice, plus a small
//! actix-web node that drives it.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;

pub use blockchain::{Block, ChainManager};
pub use error::{LedgerError, Result};
