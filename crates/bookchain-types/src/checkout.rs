use serde::{Deserialize, Serialize};

/// A book checkout, the payload carried by every block.
///
/// Field order is part of the block digest: the hasher serializes this struct
/// with `serde_json`, which emits fields in declaration order. Reordering the
/// fields changes every hash on the chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutEvent {
    pub book_id: String,
    pub user: String,
    /// Free-form; never parsed.
    pub checkout_date: String,
    #[serde(default)]
    pub is_genesis: bool,
}

impl CheckoutEvent {
    pub fn new(
        book_id: impl Into<String>,
        user: impl Into<String>,
        checkout_date: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            user: user.into(),
            checkout_date: checkout_date.into(),
            is_genesis: false,
        }
    }

    /// The synthetic event recorded at position 0.
    pub fn genesis() -> Self {
        Self {
            is_genesis: true,
            ..Self::default()
        }
    }
}
