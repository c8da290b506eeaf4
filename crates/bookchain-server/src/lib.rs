//! HTTP server for the book checkout ledger.
//!
//! Exposes the chain for reading, accepts checkout events for appending,
//! and hosts the book registry that assigns content-derived identifiers.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::BookchainServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use bookchain_ledger::{create_block, Block, ChainReader, InMemoryChain};
    use bookchain_types::CheckoutEvent;
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::*;

    fn app() -> (Router, Arc<InMemoryChain>) {
        let chain = Arc::new(InMemoryChain::new().unwrap());
        let state = AppState::new(Arc::clone(&chain));
        (router::build_router(state, &ServerConfig::default()), chain)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const CHECKOUT: &str =
        r#"{"book_id":"B1","user":"alice","checkout_date":"2024-01-01","is_genesis":false}"#;

    #[tokio::test]
    async fn get_returns_genesis_only_chain() {
        let (app, _) = app();
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let blocks = body.as_array().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["position"], 0);
        assert_eq!(blocks[0]["payload"]["is_genesis"], true);
        assert_eq!(blocks[0]["prev_hash"], "0".repeat(64));
    }

    #[tokio::test]
    async fn post_appends_block() {
        let (app, chain) = app();
        let genesis = chain.tip().unwrap();

        let response = app.clone().oneshot(post_json("/", CHECKOUT)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let block: Block = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(block.position, 1);
        assert_eq!(block.prev_hash, genesis.hash);
        assert_eq!(block.payload.user, "alice");

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (app, chain) = app();
        let response = app.oneshot(post_json("/", "{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["reason"], "DecodeError");
        assert_eq!(chain.block_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (app, _) = app();
        let response = app
            .oneshot(post_json("/", r#"{"book_id":"B1","checkout_date":"x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let (app, _) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(CHECKOUT))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn genesis_event_is_conflict() {
        let (app, chain) = app();
        let response = app
            .oneshot(post_json(
                "/",
                r#"{"book_id":"","user":"","checkout_date":"","is_genesis":true}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"]["reason"], "GenesisMisplaced");
        assert_eq!(chain.block_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let chain = Arc::new(InMemoryChain::new().unwrap());
        let config = ServerConfig {
            max_body_bytes: 16,
            ..ServerConfig::default()
        };
        let app = router::build_router(AppState::new(chain), &config);
        let response = app.oneshot(post_json("/", CHECKOUT)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn get_block_by_position() {
        let (app, _) = app();
        app.clone().oneshot(post_json("/", CHECKOUT)).await.unwrap();

        let response = app.clone().oneshot(get("/blocks/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["payload"]["book_id"], "B1");

        let response = app.oneshot(get("/blocks/9")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_position_is_json_bad_request() {
        let (app, _) = app();
        let response = app.oneshot(get("/blocks/abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], 400);
        assert_eq!(body["error"]["reason"], "DecodeError");
        assert!(body["error"]["message"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn submitted_block_extending_tip_is_appended() {
        let (app, chain) = app();
        let block =
            create_block(&chain.tip().unwrap(), CheckoutEvent::new("B1", "alice", "d")).unwrap();
        let body = serde_json::to_string(&block).unwrap();

        let response = app.oneshot(post_json("/blocks", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(chain.tip().unwrap(), block);
    }

    #[tokio::test]
    async fn stale_submitted_block_is_linkage_conflict() {
        let (app, chain) = app();
        let genesis = chain.tip().unwrap();
        app.clone().oneshot(post_json("/", CHECKOUT)).await.unwrap();

        let stale = Block::seal(
            2,
            "2024-01-01T00:00:00.000000Z",
            CheckoutEvent::new("B2", "bob", "2024-01-02"),
            genesis.hash,
        )
        .unwrap();
        let body = serde_json::to_string(&stale).unwrap();

        let response = app.oneshot(post_json("/blocks", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], 409);
        assert_eq!(body["error"]["reason"], "LinkageBroken");
        assert_eq!(chain.block_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn tampered_submitted_block_is_hash_conflict() {
        let (app, chain) = app();
        let mut block =
            create_block(&chain.tip().unwrap(), CheckoutEvent::new("B1", "alice", "d")).unwrap();
        block.payload.user = "mallory".into();
        let body = serde_json::to_string(&block).unwrap();

        let response = app.oneshot(post_json("/blocks", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"]["reason"], "HashMismatch");
        assert_eq!(chain.block_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn submitted_block_with_bad_hash_encoding_is_bad_request() {
        let (app, _) = app();
        let body = r#"{"position":1,"payload":{"book_id":"B1","user":"a","checkout_date":"d"},"timestamp":"t","hash":"xyz","prev_hash":"00"}"#;
        let response = app.oneshot(post_json("/blocks", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["reason"], "DecodeError");
    }

    #[tokio::test]
    async fn validate_reports_clean_chain() {
        let (app, _) = app();
        app.clone().oneshot(post_json("/", CHECKOUT)).await.unwrap();
        let response = app.oneshot(get("/validate")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["length"], 2);
        assert_eq!(body["violations"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn new_book_assigns_content_id() {
        let (app, chain) = app();
        let request = r#"{"id":"ignored","title":"Dune","author":"Frank Herbert","publish_date":"1965-08-01","isbn":"9780441013593"}"#;
        let response = app.clone().oneshot(post_json("/new", request)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let id = body["id"].as_str().unwrap();
        assert_eq!(id.len(), 64);
        assert_ne!(id, "ignored");
        assert_eq!(body["title"], "Dune");

        let response = app.oneshot(post_json("/new", request)).await.unwrap();
        assert_eq!(body_json(response).await["id"], id);
        assert_eq!(chain.block_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn new_book_malformed_is_bad_request() {
        let (app, _) = app();
        let response = app.oneshot(post_json("/new", r#"{"title":1}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_and_info() {
        let (app, _) = app();
        let response = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");

        let response = app.oneshot(get("/info")).await.unwrap();
        assert_eq!(body_json(response).await["name"], "bookchain-server");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_posts_produce_contiguous_chain() {
        const N: usize = 32;
        let (app, chain) = app();

        let mut tasks = Vec::with_capacity(N);
        for i in 0..N {
            let app = app.clone();
            tasks.push(tokio::spawn(async move {
                let body = format!(
                    r#"{{"book_id":"B{i}","user":"u{i}","checkout_date":"2024-01-01"}}"#
                );
                app.oneshot(post_json("/", &body)).await.unwrap().status()
            }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap(), StatusCode::CREATED);
        }

        let blocks = chain.snapshot().unwrap();
        assert_eq!(blocks.len(), N + 1);
        for (index, block) in blocks.iter().enumerate() {
            assert_eq!(block.position, index as u64);
        }
        assert!(chain.verify().unwrap().is_valid());
    }
}
