//! Transaction creation types.
//!
//! Request fields are kept loose (`Option`, raw JSON amounts) so that the
//! validator, not the JSON decoder, decides which rule a request breaks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for creating a transaction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddTransactionRequest {
    /// Account the transaction is added to.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Amount in minor currency units; must be a JSON integer.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Payee name.
    #[serde(default)]
    pub payee_name: Option<String>,
    /// Category id.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Optional split parts.
    #[serde(default)]
    pub subtransactions: Option<Vec<SubtransactionRequest>>,
}

/// One split part of an [`AddTransactionRequest`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubtransactionRequest {
    /// Amount in minor currency units; must be a JSON integer.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Category id.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Transaction in the shape the backend imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTransaction {
    /// Date, `YYYY-MM-DD`.
    pub date: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Payee name; the backend creates the payee if needed.
    pub payee_name: String,
    /// Category id.
    pub category: String,
    /// Notes, empty when none were given.
    pub notes: String,
    /// Split parts, in request order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtransactions: Option<Vec<ImportSubtransaction>>,
}

/// Split part in the shape the backend imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSubtransaction {
    /// Amount in minor currency units.
    pub amount: i64,
    /// Category id.
    pub category: String,
    /// Notes, empty when none were given.
    pub notes: String,
}

/// A request that passed validation, ready for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransaction {
    /// Target account.
    pub account_id: String,
    /// Normalized transaction.
    pub transaction: ImportTransaction,
}

/// Outcome of an import batch, passed through from the backend untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Ids of newly added transactions.
    #[serde(default)]
    pub added: Vec<String>,
    /// Ids of transactions that matched and were updated.
    #[serde(default)]
    pub updated: Vec<String>,
    /// Per-transaction import errors.
    #[serde(default)]
    pub errors: Vec<Value>,
}
