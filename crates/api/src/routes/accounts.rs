//! Account routes.

use axum::{Router, extract::State, routing::get};

use ledgerline_core::catalog::Account;

use crate::AppState;
use crate::response::{ApiResponse, ApiResult};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/accounts", get(list_accounts))
}

/// GET `/api/accounts` - List all accounts.
async fn list_accounts(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Account>>> {
    let accounts = state.gateway.list_accounts().await?;
    Ok(ApiResponse::ok(accounts))
}
