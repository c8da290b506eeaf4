//! Hashing primitives for the book checkout ledger.
//!
//! Provides domain-separated BLAKE3 hashing, the canonical block digest, and
//! the content-derived identifier used by the book registry.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod digest;
pub mod hasher;

pub use digest::{block_digest, book_id};
pub use hasher::{canonical_json, ContentHasher, HasherError};
