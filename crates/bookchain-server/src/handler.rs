use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::json;

use bookchain_crypto::book_id;
use bookchain_ledger::{Block, ChainReader, ChainWriter, ValidationReport};
use bookchain_types::{Book, CheckoutEvent};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// `GET /` — the full chain, genesis first.
pub async fn get_chain(State(state): State<AppState>) -> ServerResult<Json<Vec<Block>>> {
    Ok(Json(state.chain.snapshot()?))
}

/// `POST /` — append a checkout event.
pub async fn write_block(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutEvent>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Block>)> {
    let Json(event) = payload.map_err(|rejection| {
        tracing::warn!("couldn't decode checkout event: {}", rejection.body_text());
        ServerError::from(rejection)
    })?;
    let block = state.chain.append(event)?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// `POST /blocks` — append a block built elsewhere, validated against the tip.
pub async fn submit_block(
    State(state): State<AppState>,
    payload: Result<Json<Block>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Block>)> {
    let Json(candidate) = payload.map_err(|rejection| {
        tracing::warn!("couldn't decode block: {}", rejection.body_text());
        ServerError::from(rejection)
    })?;
    let block = state.chain.append_block(candidate)?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// `GET /blocks/:position`
pub async fn get_block(
    State(state): State<AppState>,
    position: Result<Path<u64>, PathRejection>,
) -> ServerResult<Json<Block>> {
    let Path(position) = position?;
    state
        .chain
        .get(position)?
        .map(Json)
        .ok_or(ServerError::BlockNotFound(position))
}

/// `GET /validate` — audit the whole chain.
pub async fn validate_chain(State(state): State<AppState>) -> ServerResult<Json<ValidationReport>> {
    Ok(Json(state.chain.verify()?))
}

/// `POST /new` — assign a content-derived identifier to a catalog record.
pub async fn new_book(payload: Result<Json<Book>, JsonRejection>) -> ServerResult<Json<Book>> {
    let Json(mut book) = payload.map_err(|rejection| {
        tracing::warn!("couldn't decode book: {}", rejection.body_text());
        ServerError::from(rejection)
    })?;
    book.id = book_id(&book);
    tracing::info!(id = %book.id, isbn = %book.isbn, "book registered");
    Ok(Json(book))
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "bookchain-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
