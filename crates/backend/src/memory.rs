//! In-memory ledger backend.
//!
//! Holds records as backend-native JSON rows (integer flags, `tombstone`
//! columns, `group`/`account` relation names) and evaluates queries over
//! them, so everything above the [`LedgerBackend`] seam runs unchanged.
//! Faults can be injected per operation.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;
use uuid::Uuid;

use ledgerline_core::catalog::normalize::flag_value;
use ledgerline_core::catalog::{Account, Category, CategoryGroup, Transaction};
use ledgerline_core::query::{Direction, Query, QueryResult};
use ledgerline_core::transaction::{ImportResult, ImportTransaction};

use crate::client::{BackendError, InitOptions, LedgerBackend};

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Value>,
    categories: Vec<Value>,
    category_groups: Vec<Value>,
    notes: Vec<Value>,
    transactions: Vec<Value>,
}

impl Tables {
    fn get(&self, name: &str) -> Option<&[Value]> {
        match name {
            "accounts" => Some(&self.accounts),
            "categories" => Some(&self.categories),
            "category_groups" => Some(&self.category_groups),
            "notes" => Some(&self.notes),
            "transactions" => Some(&self.transactions),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Faults {
    init: Option<String>,
    download: Option<String>,
    shutdown: Option<String>,
    reads: Option<String>,
    import: Option<String>,
    queries: HashMap<String, String>,
    queries_without_data: HashSet<String>,
    null_lists: bool,
}

/// A ledger backend that lives entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    tables: RwLock<Tables>,
    faults: RwLock<Faults>,
    init_delay: Duration,
    open: AtomicBool,
    init_calls: AtomicUsize,
    shutdown_calls: AtomicUsize,
    calls: AtomicUsize,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds account rows.
    #[must_use]
    pub fn with_accounts(mut self, rows: Vec<Value>) -> Self {
        self.tables.get_mut().accounts = rows;
        self
    }

    /// Seeds category rows.
    #[must_use]
    pub fn with_categories(mut self, rows: Vec<Value>) -> Self {
        self.tables.get_mut().categories = rows;
        self
    }

    /// Seeds category group rows.
    #[must_use]
    pub fn with_category_groups(mut self, rows: Vec<Value>) -> Self {
        self.tables.get_mut().category_groups = rows;
        self
    }

    /// Seeds note rows.
    #[must_use]
    pub fn with_notes(mut self, rows: Vec<Value>) -> Self {
        self.tables.get_mut().notes = rows;
        self
    }

    /// Seeds transaction rows.
    #[must_use]
    pub fn with_transactions(mut self, rows: Vec<Value>) -> Self {
        self.tables.get_mut().transactions = rows;
        self
    }

    /// Makes `init` take this long.
    #[must_use]
    pub fn with_init_delay(mut self, delay: Duration) -> Self {
        self.init_delay = delay;
        self
    }

    /// Makes list reads answer with nothing instead of an empty list.
    #[must_use]
    pub fn with_null_lists(mut self) -> Self {
        self.faults.get_mut().null_lists = true;
        self
    }

    /// Makes queries on `table` answer without a `data` payload.
    #[must_use]
    pub fn without_query_data(mut self, table: &str) -> Self {
        self.faults
            .get_mut()
            .queries_without_data
            .insert(table.to_string());
        self
    }

    /// Makes queries on `table` fail.
    #[must_use]
    pub fn failing_query(mut self, table: &str, message: &str) -> Self {
        self.faults
            .get_mut()
            .queries
            .insert(table.to_string(), message.to_string());
        self
    }

    /// Makes the direct list reads fail.
    #[must_use]
    pub fn failing_reads(mut self, message: &str) -> Self {
        self.faults.get_mut().reads = Some(message.to_string());
        self
    }

    /// Makes imports fail.
    #[must_use]
    pub fn failing_import(mut self, message: &str) -> Self {
        self.faults.get_mut().import = Some(message.to_string());
        self
    }

    /// Makes budget downloads fail.
    #[must_use]
    pub fn failing_download(mut self, message: &str) -> Self {
        self.faults.get_mut().download = Some(message.to_string());
        self
    }

    /// Makes `shutdown` fail, leaving the budget open.
    #[must_use]
    pub fn failing_shutdown(mut self, message: &str) -> Self {
        self.faults.get_mut().shutdown = Some(message.to_string());
        self
    }

    /// Sets or clears the `init` failure at runtime.
    pub async fn set_init_failure(&self, message: Option<&str>) {
        self.faults.write().await.init = message.map(str::to_string);
    }

    /// Number of `init` calls so far.
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of `shutdown` calls so far.
    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of backend operations of any kind so far.
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Snapshot of the stored transaction rows.
    pub async fn transaction_rows(&self) -> Vec<Value> {
        self.tables.read().await.transactions.clone()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
    }

    fn ensure_open(&self) -> Result<(), BackendError> {
        if self.open.load(AtomicOrdering::SeqCst) {
            Ok(())
        } else {
            Err(BackendError::Failed("No budget is loaded".into()))
        }
    }

    async fn read_list<T: DeserializeOwned>(
        &self,
        table: &str,
    ) -> Result<Option<Vec<T>>, BackendError> {
        self.record_call();
        self.ensure_open()?;
        {
            let faults = self.faults.read().await;
            if let Some(message) = &faults.reads {
                return Err(BackendError::Failed(message.clone()));
            }
            if faults.null_lists {
                return Ok(None);
            }
        }

        let tables = self.tables.read().await;
        let live: Vec<Value> = tables
            .get(table)
            .unwrap_or_default()
            .iter()
            .filter(|row| !is_tombstoned(row))
            .cloned()
            .collect();
        decode(live).map(Some)
    }
}

fn is_tombstoned(row: &Value) -> bool {
    row.get("tombstone")
        .and_then(flag_value)
        .unwrap_or(false)
}

fn decode<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, BackendError> {
    serde_json::from_value(Value::Array(rows))
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

fn field_matches(actual: Option<&Value>, expected: &Value) -> bool {
    let actual = actual.unwrap_or(&Value::Null);
    match (expected, flag_value(actual)) {
        (Value::Bool(expected), Some(actual)) => actual == *expected,
        _ => actual == expected,
    }
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&y.as_f64().unwrap_or_default()),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn project(row: &Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return row.clone();
    }
    let selected: Map<String, Value> = fields
        .iter()
        .filter_map(|field| row.get(field).map(|v| (field.clone(), v.clone())))
        .collect();
    Value::Object(selected)
}

/// Evaluates `query` over `rows`: filter, stable multi-key sort, project.
fn evaluate(rows: &[Value], query: &Query) -> Vec<Value> {
    let mut matched: Vec<&Value> = rows
        .iter()
        .filter(|row| {
            query
                .filters()
                .iter()
                .all(|f| field_matches(row.get(&f.field), &f.value))
        })
        .collect();

    for order in query.orderings().iter().rev() {
        matched.sort_by(|a, b| {
            let ordering = compare_fields(a.get(&order.field), b.get(&order.field));
            match order.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
    }

    matched
        .into_iter()
        .map(|row| project(row, query.selected()))
        .collect()
}

fn import_row(account_id: &str, transaction: &ImportTransaction) -> (String, Value) {
    let id = Uuid::new_v4().to_string();
    let subtransactions: Vec<Value> = transaction
        .subtransactions
        .iter()
        .flatten()
        .map(|sub| {
            json!({
                "id": Uuid::new_v4().to_string(),
                "amount": sub.amount,
                "category": sub.category,
                "notes": sub.notes,
            })
        })
        .collect();
    let row = json!({
        "id": id,
        "account": account_id,
        "date": transaction.date,
        "amount": transaction.amount,
        "payee_name": transaction.payee_name,
        "category": transaction.category,
        "notes": transaction.notes,
        "cleared": 0,
        "tombstone": 0,
        "subtransactions": subtransactions,
    });
    (id, row)
}

#[async_trait]
impl LedgerBackend for InMemoryLedger {
    async fn init(&self, _options: &InitOptions) -> Result<(), BackendError> {
        self.record_call();
        self.init_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if !self.init_delay.is_zero() {
            tokio::time::sleep(self.init_delay).await;
        }
        match &self.faults.read().await.init {
            Some(message) => Err(BackendError::Unreachable(message.clone())),
            None => Ok(()),
        }
    }

    async fn download_budget(&self, budget_id: &str) -> Result<(), BackendError> {
        self.record_call();
        if let Some(message) = &self.faults.read().await.download {
            return Err(BackendError::Failed(format!("{budget_id}: {message}")));
        }
        self.open.store(true, AtomicOrdering::SeqCst);
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), BackendError> {
        self.record_call();
        self.shutdown_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if let Some(message) = &self.faults.read().await.shutdown {
            return Err(BackendError::Failed(message.clone()));
        }
        self.open.store(false, AtomicOrdering::SeqCst);
        Ok(())
    }

    async fn get_accounts(&self) -> Result<Option<Vec<Account>>, BackendError> {
        self.read_list("accounts").await
    }

    async fn get_categories(&self) -> Result<Option<Vec<Category>>, BackendError> {
        self.read_list("categories").await
    }

    async fn get_category_groups(&self) -> Result<Option<Vec<CategoryGroup>>, BackendError> {
        self.read_list("category_groups").await
    }

    async fn get_transactions(
        &self,
        account_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<Vec<Transaction>>, BackendError> {
        let Some(rows) = self.read_list::<Value>("transactions").await? else {
            return Ok(None);
        };

        let mut in_range: Vec<Value> = rows
            .into_iter()
            .filter(|row| row.get("account").and_then(Value::as_str) == Some(account_id))
            .filter(|row| {
                row.get("date")
                    .and_then(Value::as_str)
                    .is_some_and(|date| start_date <= date && date <= end_date)
            })
            .collect();
        // Newest first.
        in_range.sort_by(|a, b| compare_fields(b.get("date"), a.get("date")));
        decode(in_range).map(Some)
    }

    async fn import_transactions(
        &self,
        account_id: &str,
        transactions: &[ImportTransaction],
    ) -> Result<ImportResult, BackendError> {
        self.record_call();
        self.ensure_open()?;
        if let Some(message) = &self.faults.read().await.import {
            return Err(BackendError::Failed(message.clone()));
        }

        let mut tables = self.tables.write().await;
        let mut added = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            let (id, row) = import_row(account_id, transaction);
            tables.transactions.push(row);
            added.push(id);
        }

        Ok(ImportResult {
            added,
            updated: Vec::new(),
            errors: Vec::new(),
        })
    }

    async fn run_query(&self, query: &Query) -> Result<QueryResult, BackendError> {
        self.record_call();
        self.ensure_open()?;
        {
            let faults = self.faults.read().await;
            if let Some(message) = faults.queries.get(query.table_name()) {
                return Err(BackendError::Failed(message.clone()));
            }
            if faults.queries_without_data.contains(query.table_name()) {
                return Ok(QueryResult { data: None });
            }
        }

        let tables = self.tables.read().await;
        let rows = tables.get(query.table_name()).ok_or_else(|| {
            BackendError::Failed(format!("Table \"{}\" does not exist", query.table_name()))
        })?;
        Ok(QueryResult {
            data: Some(Value::Array(evaluate(rows, query))),
        })
    }
}
