//! Records read from the ledger backend.
//!
//! These are owned by the backend; Ledgerline only reads and re-serializes
//! them. Field aliases accept the backend's column names while the wire
//! output uses the names below.

use serde::{Deserialize, Serialize};

use super::normalize::{flag, optional_flag};

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking account.
    Checking,
    /// Savings account.
    Savings,
    /// Credit card.
    Credit,
    /// Investment account.
    Investment,
    /// Mortgage.
    Mortgage,
    /// Other debt.
    Debt,
    /// Anything else.
    Other,
}

/// A ledger account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Account type, when the backend reports one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    /// Balance in minor currency units, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    /// Whether the account is closed.
    #[serde(default, deserialize_with = "flag")]
    pub closed: bool,
    /// Whether the account is off-budget.
    #[serde(default, deserialize_with = "flag")]
    pub offbudget: bool,
}

/// A budget category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning category group. May point at a group that no longer exists.
    #[serde(default, alias = "group", alias = "cat_group")]
    pub group_id: Option<String>,
    /// Income category flag.
    #[serde(default, deserialize_with = "flag")]
    pub is_income: bool,
    /// Position within the group.
    #[serde(default)]
    pub sort_order: Option<serde_json::Number>,
    /// Hidden flag.
    #[serde(default, deserialize_with = "flag")]
    pub hidden: bool,
    /// Goal template, when the backend tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_def: Option<String>,
}

/// A group of budget categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Group id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Income group flag.
    #[serde(default, deserialize_with = "flag")]
    pub is_income: bool,
    /// Position among groups.
    #[serde(default)]
    pub sort_order: Option<serde_json::Number>,
    /// Hidden flag.
    #[serde(default, deserialize_with = "flag")]
    pub hidden: bool,
}

/// A free-text note attached to any entity by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Id of the entity the note belongs to.
    #[serde(rename = "id")]
    pub owner_id: String,
    /// Note text.
    #[serde(rename = "note", default)]
    pub text: Option<String>,
}

/// A category joined with its note and, optionally, its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedCategory {
    /// The category itself, flattened into the output object.
    #[serde(flatten)]
    pub category: Category,
    /// Note text, or `null` when the category has none.
    pub note: Option<String>,
    /// Outer `None`: groups were not requested and the key is omitted.
    /// `Some(None)`: the group reference dangles and `null` is emitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_group: Option<Option<CategoryGroup>>,
}

/// A ledger transaction as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction id.
    pub id: String,
    /// Owning account.
    #[serde(alias = "account")]
    pub account_id: String,
    /// Date, `YYYY-MM-DD`.
    pub date: String,
    /// Signed amount in minor currency units.
    pub amount: i64,
    /// Payee id.
    #[serde(default, alias = "payee")]
    pub payee_id: Option<String>,
    /// Payee display name.
    #[serde(default)]
    pub payee_name: Option<String>,
    /// Raw payee description from an import.
    #[serde(default)]
    pub imported_payee: Option<String>,
    /// Category id.
    #[serde(default, alias = "category")]
    pub category_id: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Bank-provided identifier.
    #[serde(default)]
    pub imported_id: Option<String>,
    /// Counterpart transaction of a transfer.
    #[serde(default)]
    pub transfer_id: Option<String>,
    /// Cleared flag.
    #[serde(default, deserialize_with = "optional_flag")]
    pub cleared: Option<bool>,
    /// Split parts, in order.
    #[serde(default, deserialize_with = "nullable_list")]
    pub subtransactions: Vec<Subtransaction>,
}

/// One part of a split transaction as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtransaction {
    /// Subtransaction id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Category id.
    #[serde(default, alias = "category")]
    pub category_id: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
