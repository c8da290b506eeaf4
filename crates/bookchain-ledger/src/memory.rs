use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bookchain_types::CheckoutEvent;

use crate::block::{create_block, Block};
use crate::error::LedgerError;
use crate::traits::{ChainReader, ChainWriter};
use crate::validation::{ValidationReport, Validator};

/// In-memory checkout chain.
///
/// Appends take the write lock for the whole read-tip, build, validate,
/// extend sequence. Readers take the read lock and clone, so they only ever
/// see a chain between appends.
pub struct InMemoryChain {
    inner: RwLock<Vec<Block>>,
}

impl InMemoryChain {
    /// A chain holding a freshly stamped genesis block.
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_genesis(Block::genesis()?)
    }

    pub fn with_genesis(genesis: Block) -> Result<Self, LedgerError> {
        Validator::validate_genesis(&genesis)?;
        Ok(Self {
            inner: RwLock::new(vec![genesis]),
        })
    }

    /// Rebuild a chain from previously exported blocks, verifying every link.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, LedgerError> {
        Validator::verify_chain(&blocks)?;
        Ok(Self {
            inner: RwLock::new(blocks),
        })
    }

    /// Audit the current chain contents.
    pub fn verify(&self) -> Result<ValidationReport, LedgerError> {
        let blocks = self.read()?;
        Ok(Validator::audit(&blocks))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Block>>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Block>>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }

    fn extend(blocks: &mut Vec<Block>, candidate: Block) -> Result<Block, LedgerError> {
        let tip = blocks.last().ok_or(LedgerError::MissingGenesis)?;
        if let Err(err) = Validator::check_extension(&candidate, tip) {
            tracing::warn!(
                position = candidate.position,
                tip = tip.position,
                reason = err.reason(),
                "append rejected: {err}"
            );
            return Err(err);
        }

        tracing::info!(
            position = candidate.position,
            hash = %candidate.hash.short_hex(),
            book_id = %candidate.payload.book_id,
            "block appended"
        );
        blocks.push(candidate.clone());
        Ok(candidate)
    }
}

impl ChainWriter for InMemoryChain {
    fn append(&self, event: CheckoutEvent) -> Result<Block, LedgerError> {
        let mut blocks = self.write()?;
        let tip = blocks.last().ok_or(LedgerError::MissingGenesis)?;
        let candidate = create_block(tip, event)?;
        Self::extend(&mut blocks, candidate)
    }

    fn append_block(&self, candidate: Block) -> Result<Block, LedgerError> {
        let mut blocks = self.write()?;
        Self::extend(&mut blocks, candidate)
    }
}

impl ChainReader for InMemoryChain {
    fn tip(&self) -> Result<Block, LedgerError> {
        self.read()?
            .last()
            .cloned()
            .ok_or(LedgerError::MissingGenesis)
    }

    fn snapshot(&self) -> Result<Vec<Block>, LedgerError> {
        let blocks = self.read()?;
        tracing::debug!(length = blocks.len(), "chain snapshot");
        Ok(blocks.clone())
    }

    fn get(&self, position: u64) -> Result<Option<Block>, LedgerError> {
        let blocks = self.read()?;
        Ok(usize::try_from(position)
            .ok()
            .and_then(|index| blocks.get(index))
            .cloned())
    }

    fn block_count(&self) -> Result<u64, LedgerError> {
        Ok(self.read()?.len() as u64)
    }
}
