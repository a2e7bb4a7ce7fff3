//! Resource operations over the ledger backend.
//!
//! Every operation validates its input first, then ensures the connection,
//! then calls the backend. Failures are tagged here, at the point they occur.

use std::sync::Arc;

use futures::future::{try_join, try_join3};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use ledgerline_core::catalog::{
    Account, Category, CategoryFilter, CategoryGroup, EnrichedCategory, Note, Transaction,
    category_groups_query, join_notes, join_notes_and_groups, notes_query,
};
use ledgerline_core::query::Query;
use ledgerline_core::transaction::{
    AddTransactionRequest, DateRange, ImportResult, validate_transaction,
};
use ledgerline_shared::{AppError, AppResult};

use crate::connector::{BackendConnector, ConnectionStatus};

/// Ledger operations exposed to the HTTP layer.
pub struct LedgerGateway {
    connector: Arc<BackendConnector>,
}

impl LedgerGateway {
    /// Creates a gateway over `connector`.
    #[must_use]
    pub fn new(connector: Arc<BackendConnector>) -> Self {
        Self { connector }
    }

    /// Connection status for health reporting.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.connector.status()
    }

    /// Lists all accounts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BackendConnection` if the backend is unreachable or
    /// the read fails.
    pub async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.connector.ensure_connected().await?;
        let accounts = self
            .connector
            .backend()
            .get_accounts()
            .await
            .map_err(|e| read_failed("accounts", &e))?;
        Ok(accounts.unwrap_or_default())
    }

    /// Lists all categories as the backend returns them.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BackendConnection` on connection or read failure.
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.connector.ensure_connected().await?;
        let categories = self
            .connector
            .backend()
            .get_categories()
            .await
            .map_err(|e| read_failed("categories", &e))?;
        Ok(categories.unwrap_or_default())
    }

    /// Lists all category groups.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BackendConnection` on connection or read failure.
    pub async fn list_category_groups(&self) -> AppResult<Vec<CategoryGroup>> {
        self.connector.ensure_connected().await?;
        let groups = self
            .connector
            .backend()
            .get_category_groups()
            .await
            .map_err(|e| read_failed("category groups", &e))?;
        Ok(groups.unwrap_or_default())
    }

    /// Lists filtered categories, each with its note.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BackendConnection` if the connection fails and
    /// `AppError::QueryJoin` if either query fails or returns no usable data.
    pub async fn list_categories_with_notes(
        &self,
        filter: CategoryFilter,
    ) -> AppResult<Vec<EnrichedCategory>> {
        self.connector.ensure_connected().await?;
        debug!(?filter, "Listing categories with notes");

        let (categories, notes) = try_join(
            self.fetch::<Category>(filter.categories_query()),
            self.fetch::<Note>(notes_query()),
        )
        .await?;

        Ok(join_notes(categories, notes))
    }

    /// Lists filtered categories, each with its note and its group.
    ///
    /// # Errors
    ///
    /// Same as [`LedgerGateway::list_categories_with_notes`].
    pub async fn list_categories_with_notes_and_groups(
        &self,
        filter: CategoryFilter,
    ) -> AppResult<Vec<EnrichedCategory>> {
        self.connector.ensure_connected().await?;
        debug!(?filter, "Listing categories with notes and groups");

        let (categories, notes, groups) = try_join3(
            self.fetch::<Category>(filter.categories_query()),
            self.fetch::<Note>(notes_query()),
            self.fetch::<CategoryGroup>(category_groups_query()),
        )
        .await?;

        Ok(join_notes_and_groups(categories, notes, groups))
    }

    /// Lists an account's transactions within an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingParameters` or `AppError::InvalidParameters`
    /// before touching the backend, and `AppError::BackendConnection` on
    /// connection or read failure.
    pub async fn list_transactions(
        &self,
        account_id: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<Vec<Transaction>> {
        let range = DateRange::parse(account_id, start_date, end_date)?;

        self.connector.ensure_connected().await?;
        let transactions = self
            .connector
            .backend()
            .get_transactions(&range.account_id, &range.start_date, &range.end_date)
            .await
            .map_err(|e| read_failed("transactions", &e))?;
        Ok(transactions.unwrap_or_default())
    }

    /// Validates and imports one transaction.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` before touching the backend, and
    /// `AppError::BackendWrite` if connecting or importing fails.
    pub async fn create_transaction(
        &self,
        request: &AddTransactionRequest,
    ) -> AppResult<ImportResult> {
        let validated = validate_transaction(request)?;

        self.connector
            .ensure_connected()
            .await
            .map_err(|e| AppError::BackendWrite(e.to_string()))?;

        let result = self
            .connector
            .backend()
            .import_transactions(&validated.account_id, &[validated.transaction])
            .await
            .map_err(|e| {
                error!(account_id = %validated.account_id, error = %e, "Transaction import failed");
                AppError::BackendWrite(format!("Failed to create transaction: {e}"))
            })?;

        info!(
            account_id = %validated.account_id,
            added = result.added.len(),
            "Transaction imported"
        );
        Ok(result)
    }

    /// Closes the backend connection if open.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BackendConnection` if the backend fails to shut down.
    pub async fn shutdown(&self) -> AppResult<()> {
        self.connector.disconnect().await
    }

    async fn fetch<T: DeserializeOwned>(&self, query: Query) -> AppResult<Vec<T>> {
        let table = query.table_name().to_string();
        let result = self
            .connector
            .backend()
            .run_query(&query)
            .await
            .map_err(|e| AppError::QueryJoin(format!("Query on {table} failed: {e}")))?;

        let data = result
            .data
            .ok_or_else(|| AppError::QueryJoin(format!("Query on {table} returned no data")))?;

        serde_json::from_value(data).map_err(|e| {
            AppError::QueryJoin(format!("Query on {table} returned malformed data: {e}"))
        })
    }
}

fn read_failed(resource: &str, cause: &dyn std::fmt::Display) -> AppError {
    error!(resource, error = %cause, "Backend read failed");
    AppError::BackendConnection(format!("Failed to retrieve {resource}: {cause}"))
}
