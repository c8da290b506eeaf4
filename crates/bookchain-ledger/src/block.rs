use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use bookchain_crypto::block_digest;
use bookchain_types::{BlockHash, CheckoutEvent};

use crate::error::LedgerError;

/// One ledger entry: a checkout event plus its linkage metadata.
///
/// `hash` is the digest of the other four fields, fixed at construction.
/// Blocks are never mutated once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub position: u64,
    pub payload: CheckoutEvent,
    pub timestamp: String,
    pub hash: BlockHash,
    pub prev_hash: BlockHash,
}

impl Block {
    /// Build a block from its content fields and compute its hash.
    pub fn seal(
        position: u64,
        timestamp: impl Into<String>,
        payload: CheckoutEvent,
        prev_hash: BlockHash,
    ) -> Result<Self, LedgerError> {
        let timestamp = timestamp.into();
        let hash = block_digest(position, &timestamp, &payload, &prev_hash)?;
        Ok(Self {
            position,
            payload,
            timestamp,
            hash,
            prev_hash,
        })
    }

    /// The genesis block, stamped with the current time.
    pub fn genesis() -> Result<Self, LedgerError> {
        Self::genesis_at(Utc::now())
    }

    /// The genesis block: position 0, genesis payload, zero predecessor.
    pub fn genesis_at(now: DateTime<Utc>) -> Result<Self, LedgerError> {
        Self::seal(
            0,
            format_timestamp(now),
            CheckoutEvent::genesis(),
            BlockHash::ZERO,
        )
    }

    /// Recompute the digest from the current field values.
    pub fn compute_hash(&self) -> Result<BlockHash, LedgerError> {
        Ok(block_digest(
            self.position,
            &self.timestamp,
            &self.payload,
            &self.prev_hash,
        )?)
    }

    pub fn is_genesis(&self) -> bool {
        self.payload.is_genesis
    }
}

/// Build the successor of `prev` carrying `event`, stamped with the current time.
///
/// No business rules are checked here; that is the validator's job.
pub fn create_block(prev: &Block, event: CheckoutEvent) -> Result<Block, LedgerError> {
    create_block_at(prev, event, Utc::now())
}

/// [`create_block`] with an explicit clock reading.
pub fn create_block_at(
    prev: &Block,
    event: CheckoutEvent,
    now: DateTime<Utc>,
) -> Result<Block, LedgerError> {
    Block::seal(
        prev.position.saturating_add(1),
        next_timestamp(prev, now),
        event,
        prev.hash,
    )
}

/// RFC 3339, UTC, microsecond precision, `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// Never step behind the predecessor's clock reading, so timestamps stay
// non-decreasing along the chain even if the wall clock moves backwards.
fn next_timestamp(prev: &Block, now: DateTime<Utc>) -> String {
    let floor = DateTime::parse_from_rfc3339(&prev.timestamp)
        .ok()
        .map(|t| t.with_timezone(&Utc));
    match floor {
        Some(prev_at) if prev_at > now => format_timestamp(prev_at),
        _ => format_timestamp(now),
    }
}
