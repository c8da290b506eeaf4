use bookchain_types::{BlockHash, Book, CheckoutEvent};

use crate::hasher::{canonical_json, ContentHasher, HasherError};

/// Digest of a block's four content fields.
///
/// Canonical encoding, in order:
/// - `position` as 8 bytes big-endian
/// - `timestamp` as a u64 big-endian byte length followed by its UTF-8 bytes
/// - `payload` as compact JSON, length-prefixed the same way
/// - `prev_hash` as its 32 raw bytes
///
/// Length prefixes keep adjacent variable-width fields from sliding into
/// each other.
pub fn block_digest(
    position: u64,
    timestamp: &str,
    payload: &CheckoutEvent,
    prev_hash: &BlockHash,
) -> Result<BlockHash, HasherError> {
    let payload = canonical_json(payload)?;
    let digest = ContentHasher::BLOCK.hash_parts(&[
        &position.to_be_bytes(),
        &(timestamp.len() as u64).to_be_bytes(),
        timestamp.as_bytes(),
        &(payload.len() as u64).to_be_bytes(),
        &payload,
        prev_hash.as_bytes(),
    ]);
    Ok(BlockHash::from_bytes(digest))
}

/// Content-derived identifier for a catalog record (ISBN + publish date).
pub fn book_id(book: &Book) -> String {
    hex::encode(ContentHasher::BOOK.hash(&book.identity_material()))
}
