//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod categories;
pub mod health;
pub mod transactions;

/// Creates the `/api` router with all resource routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(accounts::routes())
        .merge(categories::routes())
        .merge(transactions::routes())
}
