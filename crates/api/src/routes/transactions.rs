//! Transaction routes.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::{info, warn};

use ledgerline_core::catalog::Transaction;
use ledgerline_core::transaction::{AddTransactionRequest, ImportResult};
use ledgerline_shared::AppError;

use crate::AppState;
use crate::response::{ApiResponse, ApiResult};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/transactions",
        get(list_transactions).post(create_transaction),
    )
}

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Account to list.
    pub account_id: Option<String>,
    /// First day, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// GET `/api/transactions` - List an account's transactions in a date range.
async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> ApiResult<ApiResponse<Vec<Transaction>>> {
    let Query(query) = query.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected transaction query");
        AppError::InvalidParameters(rejection.body_text())
    })?;

    let transactions = state
        .gateway
        .list_transactions(
            query.account_id.as_deref(),
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )
        .await?;
    Ok(ApiResponse::ok(transactions))
}

/// POST `/api/transactions` - Create a transaction, optionally split.
async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<AddTransactionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, ApiResponse<ImportResult>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected transaction body");
        AppError::Validation(rejection.body_text())
    })?;

    let result = state.gateway.create_transaction(&request).await?;
    info!(added = ?result.added, "Transaction created");
    Ok((StatusCode::CREATED, ApiResponse::ok(result)))
}
