use std::sync::Arc;

use tokio::net::TcpListener;

use bookchain_ledger::{ChainReader, InMemoryChain};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// HTTP front end over a single in-memory chain.
pub struct BookchainServer {
    config: ServerConfig,
    state: AppState,
}

impl BookchainServer {
    pub fn new(config: ServerConfig, chain: Arc<InMemoryChain>) -> Self {
        Self {
            config,
            state: AppState::new(chain),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let genesis = self.state.chain.get(0)?.ok_or(ServerError::Internal(
            "chain has no genesis block".into(),
        ))?;
        tracing::info!(
            genesis = %genesis.hash.short_hex(),
            "bookchain server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
