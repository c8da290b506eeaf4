use bookchain_types::CheckoutEvent;

use crate::block::Block;
use crate::error::LedgerError;

/// Write boundary for chain append operations.
///
/// Implementations must serialize the read-tip, build, validate, extend
/// sequence so that no two appends observe the same tip.
pub trait ChainWriter: Send + Sync {
    /// Build a block for `event` on top of the current tip and append it.
    fn append(&self, event: CheckoutEvent) -> Result<Block, LedgerError>;

    /// Validate a block built elsewhere against the current tip and append it.
    fn append_block(&self, candidate: Block) -> Result<Block, LedgerError>;
}

/// Read boundary for chain queries.
pub trait ChainReader: Send + Sync {
    fn tip(&self) -> Result<Block, LedgerError>;

    /// Point-in-time copy of every block, genesis first.
    fn snapshot(&self) -> Result<Vec<Block>, LedgerError>;

    fn get(&self, position: u64) -> Result<Option<Block>, LedgerError>;

    fn block_count(&self) -> Result<u64, LedgerError>;
}
