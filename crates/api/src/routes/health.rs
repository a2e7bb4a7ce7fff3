//! Health check endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::AppState;

/// Status of each dependency.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    /// `connected` or `disconnected`.
    pub actual_budget: &'static str,
    /// Always `running` while the server answers.
    pub http_server: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`.
    pub status: &'static str,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Dependency status.
    pub services: ServiceStatus,
    /// Cause of the last failed connection attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check handler. Reports the connection state without connecting.
async fn health_check(State(state): State<AppState>) -> Response {
    let connection = state.gateway.status();
    let body = HealthResponse {
        status: if connection.last_error.is_some() {
            "unhealthy"
        } else {
            "healthy"
        },
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        services: ServiceStatus {
            actual_budget: if connection.connected {
                "connected"
            } else {
                "disconnected"
            },
            http_server: "running",
        },
        error: connection.last_error,
    };

    let status = if body.error.is_some() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, Json(body)).into_response()
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
