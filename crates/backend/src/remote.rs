//! HTTP client for the ledger bridge sidecar.
//!
//! The ledger library runs in a sidecar process. Every operation is a single
//! `POST {bridge_url}/rpc` carrying `{method, params}`; the bridge answers
//! `{data}` on success or `{error: {message}}` on failure.
//!
//! For `runQuery` the bridge may forward the library's own `{data: [...]}`
//! result as-is; one nested `data` level is unwrapped.
//!
//! Only connecting is bounded in time. Requests wait as long as the bridge
//! takes, since opening a large budget can be slow.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use ledgerline_core::catalog::{Account, Category, CategoryGroup, Transaction};
use ledgerline_core::query::{Query, QueryResult};
use ledgerline_core::transaction::{ImportResult, ImportTransaction};

use crate::client::{BackendError, InitOptions, LedgerBackend};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcError {
    message: String,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    data: Option<T>,
    error: Option<RpcError>,
}

/// Ledger backend reached through the bridge sidecar.
#[derive(Debug, Clone)]
pub struct HttpLedgerBackend {
    client: Client,
    endpoint: String,
}

impl HttpLedgerBackend {
    /// Creates a client for the bridge at `bridge_url`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unreachable` if the HTTP client cannot be built.
    pub fn new(bridge_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .gzip(true)
            .build()
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/rpc", bridge_url.trim_end_matches('/')),
        })
    }

    /// The RPC endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, BackendError> {
        debug!(method, "Calling ledger bridge");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RpcRequest { method, params })
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body: RpcResponse<T> = response.json().await.map_err(|e| {
            BackendError::InvalidResponse(format!("{method} ({status}): {e}"))
        })?;

        if let Some(error) = body.error {
            return Err(BackendError::Failed(error.message));
        }
        if !status.is_success() {
            return Err(BackendError::Failed(format!(
                "{method} failed with status {status}"
            )));
        }
        Ok(body.data)
    }

    async fn call_unit(&self, method: &str, params: Value) -> Result<(), BackendError> {
        self.call::<Value>(method, params).await.map(|_| ())
    }
}

#[async_trait]
impl LedgerBackend for HttpLedgerBackend {
    async fn init(&self, options: &InitOptions) -> Result<(), BackendError> {
        let params = serde_json::to_value(options)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        self.call_unit("init", params).await
    }

    async fn download_budget(&self, budget_id: &str) -> Result<(), BackendError> {
        self.call_unit("downloadBudget", json!({ "budgetId": budget_id }))
            .await
    }

    async fn shutdown(&self) -> Result<(), BackendError> {
        self.call_unit("shutdown", json!({})).await
    }

    async fn get_accounts(&self) -> Result<Option<Vec<Account>>, BackendError> {
        self.call("getAccounts", json!({})).await
    }

    async fn get_categories(&self) -> Result<Option<Vec<Category>>, BackendError> {
        self.call("getCategories", json!({})).await
    }

    async fn get_category_groups(&self) -> Result<Option<Vec<CategoryGroup>>, BackendError> {
        self.call("getCategoryGroups", json!({})).await
    }

    async fn get_transactions(
        &self,
        account_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<Vec<Transaction>>, BackendError> {
        self.call(
            "getTransactions",
            json!({
                "accountId": account_id,
                "startDate": start_date,
                "endDate": end_date,
            }),
        )
        .await
    }

    async fn import_transactions(
        &self,
        account_id: &str,
        transactions: &[ImportTransaction],
    ) -> Result<ImportResult, BackendError> {
        self.call(
            "importTransactions",
            json!({
                "accountId": account_id,
                "transactions": transactions,
            }),
        )
        .await?
        .ok_or_else(|| BackendError::InvalidResponse("importTransactions returned no data".into()))
    }

    async fn run_query(&self, query: &Query) -> Result<QueryResult, BackendError> {
        let data: Option<Value> = self.call("runQuery", json!({ "query": query })).await?;
        Ok(QueryResult {
            data: data.and_then(query_rows),
        })
    }
}

/// Strips the library's own `{data}` wrapper from a query result, if present.
fn query_rows(data: Value) -> Option<Value> {
    match data {
        Value::Object(mut result) if result.contains_key("data") => {
            result.remove("data").filter(|rows| !rows.is_null())
        }
        other => Some(other),
    }
}
