use std::sync::Arc;

use bookchain_ledger::InMemoryChain;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<InMemoryChain>,
}

impl AppState {
    pub fn new(chain: Arc<InMemoryChain>) -> Self {
        Self { chain }
    }
}
