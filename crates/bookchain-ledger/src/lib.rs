//! Append-only, hash-linked ledger of book checkouts.
//!
//! This crate is the heart of bookchain. It provides:
//! - `Block` construction with a deterministic digest over its content
//! - `Validator` for single-extension checks and whole-chain audits
//! - `ChainWriter` / `ChainReader` trait boundaries
//! - `InMemoryChain`, the lock-serialized append service

pub mod block;
pub mod error;
pub mod memory;
pub mod traits;
pub mod validation;

pub use block::{create_block, create_block_at, format_timestamp, Block};
pub use error::LedgerError;
pub use memory::InMemoryChain;
pub use traits::{ChainReader, ChainWriter};
pub use validation::{ValidationReport, Validator, Violation, ViolationKind};
