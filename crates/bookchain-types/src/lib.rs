//! Foundation types for the book checkout ledger.
//!
//! Every other bookchain crate depends on `bookchain-types`.
//!
//! # Key Types
//!
//! - [`CheckoutEvent`] — The payload a block records
//! - [`BlockHash`] — 32-byte block digest, hex-encoded on the wire
//! - [`Book`] — Catalog record with a content-derived identifier

pub mod book;
pub mod checkout;
pub mod error;
pub mod hash;

pub use book::Book;
pub use checkout::CheckoutEvent;
pub use error::TypeError;
pub use hash::BlockHash;
