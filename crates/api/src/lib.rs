//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the ledger gateway
//! - Success and error response envelopes
//! - Health reporting, 404 fallback and panic recovery

pub mod response;
pub mod routes;

use std::any::Any;
use std::sync::Arc;

use axum::{Router, http::StatusCode, response::Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use ledgerline_backend::LedgerGateway;

use crate::response::error_body;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger operations.
    pub gateway: Arc<LedgerGateway>,
}

impl AppState {
    /// Creates state over `gateway`.
    pub fn new(gateway: Arc<LedgerGateway>) -> Self {
        Self { gateway }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes())
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(state)
}

async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "NOT_FOUND", "Endpoint not found")
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Handler panicked");
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An unexpected error occurred",
    )
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request},
        routing::get,
    };
    use ledgerline_backend::InMemoryLedger;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = test_support::app(&Arc::new(InMemoryLedger::new()));
        let (status, body) = test_support::get(app, "/api/nope").await;

        assert_eq!(status, 404);
        assert_eq!(
            body,
            json!({"success": false, "error": {"code": "NOT_FOUND", "message": "Endpoint not found"}})
        );
    }

    #[rstest]
    #[case(Method::DELETE, "/api/accounts")]
    #[case(Method::PUT, "/api/transactions")]
    #[case(Method::POST, "/health")]
    #[tokio::test]
    async fn test_unsupported_method_is_not_found(#[case] method: Method, #[case] uri: &str) {
        let ledger = Arc::new(InMemoryLedger::new());
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = test_support::send(test_support::app(&ledger), request).await;

        assert_eq!(status, 404);
        assert_eq!(
            body,
            json!({"success": false, "error": {"code": "NOT_FOUND", "message": "Endpoint not found"}})
        );
        assert_eq!(ledger.calls(), 0);
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        async fn boom() -> &'static str {
            panic!("boom")
        }
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));
        let (status, body) = test_support::get(app, "/boom").await;

        assert_eq!(status, 500);
        assert_eq!(body["error"]["code"], json!("INTERNAL_ERROR"));
        assert_eq!(body["error"]["message"], json!("An unexpected error occurred"));
    }
}
