use serde::Serialize;

use crate::block::Block;
use crate::error::LedgerError;

/// Result of auditing a full chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub length: u64,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during an audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub position: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    PositionMismatch,
    LinkageBroken,
    HashMismatch,
    GenesisMisplaced,
    InvalidGenesis,
    MissingGenesis,
    Internal,
}

impl From<&LedgerError> for ViolationKind {
    fn from(err: &LedgerError) -> Self {
        match err {
            LedgerError::PositionMismatch { .. } => Self::PositionMismatch,
            LedgerError::LinkageBroken { .. } => Self::LinkageBroken,
            LedgerError::HashMismatch { .. } => Self::HashMismatch,
            LedgerError::GenesisMisplaced { .. } => Self::GenesisMisplaced,
            LedgerError::InvalidGenesis(_) => Self::InvalidGenesis,
            LedgerError::MissingGenesis => Self::MissingGenesis,
            LedgerError::InternalHashFailure(_) | LedgerError::LockPoisoned => Self::Internal,
        }
    }
}

/// Pure predicates over blocks. Holds no state.
pub struct Validator;

impl Validator {
    /// Check that `candidate` may extend a chain whose last block is `tip`.
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. position is `tip.position + 1`
    /// 2. `prev_hash` equals `tip.hash`
    /// 3. the recomputed digest equals `candidate.hash`
    /// 4. the payload is not a genesis event
    pub fn check_extension(candidate: &Block, tip: &Block) -> Result<(), LedgerError> {
        let expected = tip.position.saturating_add(1);
        if candidate.position != expected {
            return Err(LedgerError::PositionMismatch {
                expected,
                actual: candidate.position,
            });
        }

        if candidate.prev_hash != tip.hash {
            return Err(LedgerError::LinkageBroken {
                position: candidate.position,
                expected: tip.hash,
                actual: candidate.prev_hash,
            });
        }

        Self::check_hash(candidate)?;

        if candidate.is_genesis() {
            return Err(LedgerError::GenesisMisplaced {
                position: candidate.position,
            });
        }

        Ok(())
    }

    /// Boolean form of [`Validator::check_extension`].
    pub fn is_valid_extension(candidate: &Block, tip: &Block) -> bool {
        Self::check_extension(candidate, tip).is_ok()
    }

    /// Check the first block of a chain. No linkage check applies.
    pub fn validate_genesis(block: &Block) -> Result<(), LedgerError> {
        if block.position != 0 {
            return Err(LedgerError::InvalidGenesis(format!(
                "position is {}, expected 0",
                block.position
            )));
        }
        if !block.is_genesis() {
            return Err(LedgerError::InvalidGenesis(
                "payload is not flagged as genesis".into(),
            ));
        }
        if !block.prev_hash.is_zero() {
            return Err(LedgerError::InvalidGenesis(
                "prev_hash is not the zero sentinel".into(),
            ));
        }
        Self::check_hash(block)
    }

    /// Verify an entire chain, stopping at the first violation.
    pub fn verify_chain(blocks: &[Block]) -> Result<(), LedgerError> {
        let (genesis, rest) = blocks.split_first().ok_or(LedgerError::MissingGenesis)?;
        Self::validate_genesis(genesis)?;
        let mut tip = genesis;
        for block in rest {
            Self::check_extension(block, tip)?;
            tip = block;
        }
        Ok(())
    }

    /// Audit an entire chain, collecting one violation per faulty block.
    ///
    /// Each block is checked against its stored predecessor, so a tampered
    /// block is reported at its own position without cascading.
    pub fn audit(blocks: &[Block]) -> ValidationReport {
        let mut violations = Vec::new();

        match blocks.first() {
            None => violations.push(violation(0, &LedgerError::MissingGenesis)),
            Some(genesis) => {
                if let Err(err) = Self::validate_genesis(genesis) {
                    violations.push(violation(genesis.position, &err));
                }
            }
        }

        for pair in blocks.windows(2) {
            if let Err(err) = Self::check_extension(&pair[1], &pair[0]) {
                violations.push(violation(pair[1].position, &err));
            }
        }

        ValidationReport {
            length: blocks.len() as u64,
            violations,
        }
    }

    fn check_hash(block: &Block) -> Result<(), LedgerError> {
        let computed = block.compute_hash()?;
        if computed != block.hash {
            return Err(LedgerError::HashMismatch {
                position: block.position,
                stored: block.hash,
                computed,
            });
        }
        Ok(())
    }
}

fn violation(position: u64, err: &LedgerError) -> Violation {
    Violation {
        position,
        kind: ViolationKind::from(err),
        description: err.to_string(),
    }
}
