//! The ledger backend seam.
//!
//! Ledgerline never touches budget storage directly. Everything it reads or
//! writes goes through [`LedgerBackend`], which mirrors the operations of the
//! ledger client library.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use ledgerline_core::catalog::{Account, Category, CategoryGroup, Transaction};
use ledgerline_core::query::{Query, QueryResult};
use ledgerline_core::transaction::{ImportResult, ImportTransaction};
use ledgerline_shared::ActualConfig;

/// Errors raised by a backend implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend could not be reached.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend refused or failed the operation.
    #[error("{0}")]
    Failed(String),

    /// The backend answered with something that could not be decoded.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Arguments for initializing the ledger library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    /// Local budget cache directory.
    pub data_dir: String,
    /// Sync server URL.
    #[serde(rename = "serverURL")]
    pub server_url: String,
    /// Sync server password.
    pub password: String,
}

impl From<&ActualConfig> for InitOptions {
    fn from(config: &ActualConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            server_url: config.server_url.clone(),
            password: config.password.clone(),
        }
    }
}

/// Operations of the external ledger library.
///
/// List reads return `None` when the backend answers with nothing; callers
/// decide how to present that.
#[async_trait]
pub trait LedgerBackend: Send + Sync {
    /// Initializes the library against a sync server.
    async fn init(&self, options: &InitOptions) -> Result<(), BackendError>;

    /// Downloads (opens) a budget by sync id.
    async fn download_budget(&self, budget_id: &str) -> Result<(), BackendError>;

    /// Closes the budget and releases the library.
    async fn shutdown(&self) -> Result<(), BackendError>;

    /// Lists accounts.
    async fn get_accounts(&self) -> Result<Option<Vec<Account>>, BackendError>;

    /// Lists categories.
    async fn get_categories(&self) -> Result<Option<Vec<Category>>, BackendError>;

    /// Lists category groups.
    async fn get_category_groups(&self) -> Result<Option<Vec<CategoryGroup>>, BackendError>;

    /// Lists an account's transactions between two dates, inclusive.
    async fn get_transactions(
        &self,
        account_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<Vec<Transaction>>, BackendError>;

    /// Imports a batch of transactions into an account.
    async fn import_transactions(
        &self,
        account_id: &str,
        transactions: &[ImportTransaction],
    ) -> Result<ImportResult, BackendError>;

    /// Executes a query against the record store.
    async fn run_query(&self, query: &Query) -> Result<QueryResult, BackendError>;
}
