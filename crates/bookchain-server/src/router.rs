use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::state::AppState;

/// Build the axum router with all bookchain endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/", get(handler::get_chain).post(handler::write_block))
        .route("/new", post(handler::new_book))
        .route("/blocks", post(handler::submit_block))
        .route("/blocks/:position", get(handler::get_block))
        .route("/validate", get(handler::validate_chain))
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(state);

    if config.log_requests {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
