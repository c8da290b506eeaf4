use bookchain_crypto::HasherError;
use bookchain_types::BlockHash;

/// Errors produced by ledger operations.
///
/// The first four variants are append rejections: the chain is untouched and
/// the caller may retry. The rest indicate a broken chain or a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("position mismatch: expected {expected}, got {actual}")]
    PositionMismatch { expected: u64, actual: u64 },

    #[error("linkage broken at position {position}: prev_hash {actual} does not match {expected}")]
    LinkageBroken {
        position: u64,
        expected: BlockHash,
        actual: BlockHash,
    },

    #[error("hash mismatch at position {position}: stored {stored}, computed {computed}")]
    HashMismatch {
        position: u64,
        stored: BlockHash,
        computed: BlockHash,
    },

    #[error("genesis event at position {position}; only position 0 may be genesis")]
    GenesisMisplaced { position: u64 },

    #[error("invalid genesis block: {0}")]
    InvalidGenesis(String),

    #[error("chain has no genesis block")]
    MissingGenesis,

    #[error("internal hash failure: {0}")]
    InternalHashFailure(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Stable machine-readable name of the error kind.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::PositionMismatch { .. } => "PositionMismatch",
            Self::LinkageBroken { .. } => "LinkageBroken",
            Self::HashMismatch { .. } => "HashMismatch",
            Self::GenesisMisplaced { .. } => "GenesisMisplaced",
            Self::InvalidGenesis(_) => "InvalidGenesis",
            Self::MissingGenesis => "MissingGenesis",
            Self::InternalHashFailure(_) => "InternalHashFailure",
            Self::LockPoisoned => "LockPoisoned",
        }
    }

    /// Returns `true` if a proposed block was refused by validation.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::PositionMismatch { .. }
                | Self::LinkageBroken { .. }
                | Self::HashMismatch { .. }
                | Self::GenesisMisplaced { .. }
        )
    }
}

impl From<HasherError> for LedgerError {
    fn from(err: HasherError) -> Self {
        Self::InternalHashFailure(err.to_string())
    }
}
