//! Gateway tests: reads, query joins, listing and transaction creation.
//!
//! These tests verify that:
//! - Category joins keep query order, filter hidden rows and attach notes/groups
//! - Any failed or empty join query fails the whole operation
//! - Validation failures never reach the backend
//! - Imports are normalized and backend failures are tagged as write errors

#![allow(clippy::unwrap_used)]

mod fixtures;

use std::sync::Arc;

use rstest::rstest;
use serde_json::{Value, json};

use ledgerline_backend::InMemoryLedger;
use ledgerline_core::catalog::CategoryFilter;
use ledgerline_core::transaction::AddTransactionRequest;
use ledgerline_shared::AppError;

use fixtures::{gateway, seeded_ledger};

fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|item| id(item).to_string()).collect()
}

fn request(body: Value) -> AddTransactionRequest {
    serde_json::from_value(body).unwrap()
}

fn valid_body() -> Value {
    json!({
        "account_id": "acc-1",
        "date": "2024-03-01",
        "amount": 1000,
        "payee_name": "Grocer",
        "category_id": "cat-power",
    })
}

// --- Direct reads ---

#[tokio::test]
async fn test_list_accounts_normalizes_flags() {
    let ledger = Arc::new(seeded_ledger());
    let accounts = gateway(&ledger).list_accounts().await.unwrap();

    assert_eq!(ids(&accounts, |a| &a.id), vec!["acc-1", "acc-2"]);
    assert!(!accounts[0].offbudget);
    assert!(accounts[1].offbudget);
    assert_eq!(accounts[0].balance, Some(125_000));
}

#[tokio::test]
async fn test_null_lists_become_empty() {
    let ledger = Arc::new(seeded_ledger().with_null_lists());
    let gateway = gateway(&ledger);

    assert!(gateway.list_accounts().await.unwrap().is_empty());
    assert!(gateway.list_categories().await.unwrap().is_empty());
    assert!(gateway.list_category_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_read_failure_is_connection_error() {
    let ledger = Arc::new(seeded_ledger().failing_reads("database is locked"));
    let err = gateway(&ledger).list_categories().await.unwrap_err();

    assert_eq!(
        err,
        AppError::BackendConnection("Failed to retrieve categories: database is locked".into())
    );
}

#[tokio::test]
async fn test_connection_failure_surfaces_on_read() {
    let ledger = Arc::new(seeded_ledger().failing_download("bad budget"));
    let err = gateway(&ledger).list_category_groups().await.unwrap_err();

    assert!(matches!(err, AppError::BackendConnection(_)));
    assert_eq!(err.error_code(), "ACTUAL_CONNECTION_ERROR");
}

#[tokio::test]
async fn test_status_tracks_connection() {
    let ledger = Arc::new(seeded_ledger());
    let gateway = gateway(&ledger);

    assert!(!gateway.status().connected);
    gateway.list_accounts().await.unwrap();
    assert!(gateway.status().connected);

    gateway.shutdown().await.unwrap();
    assert!(!gateway.status().connected);
    assert_eq!(ledger.shutdown_calls(), 1);
}

// --- Query joins ---

#[tokio::test]
async fn test_categories_with_notes_sorted_and_visible() {
    let ledger = Arc::new(seeded_ledger());
    let categories = gateway(&ledger)
        .list_categories_with_notes(CategoryFilter::default())
        .await
        .unwrap();

    assert_eq!(
        ids(&categories, |c| &c.category.id),
        vec!["cat-power", "cat-salary", "cat-rent", "cat-orphan"]
    );
    assert!(categories.iter().all(|c| !c.category.hidden));
    assert!(categories.iter().all(|c| c.category_group.is_none()));
}

#[tokio::test]
async fn test_include_hidden() {
    let ledger = Arc::new(seeded_ledger());
    let filter = CategoryFilter::from_params(Some("true"), None, None);
    let categories = gateway(&ledger)
        .list_categories_with_notes(filter)
        .await
        .unwrap();

    assert_eq!(categories[0].category.id, "cat-secret");
    assert!(categories[0].category.hidden);
}

#[rstest]
#[case(Some("true"), None, vec!["cat-salary"])]
#[case(None, Some("true"), vec!["cat-power", "cat-rent", "cat-orphan"])]
#[case(Some("true"), Some("true"), vec!["cat-salary"])]
#[tokio::test]
async fn test_income_and_expense_filters(
    #[case] income_only: Option<&str>,
    #[case] expense_only: Option<&str>,
    #[case] expected: Vec<&str>,
) {
    let ledger = Arc::new(seeded_ledger());
    let filter = CategoryFilter::from_params(None, income_only, expense_only);
    let categories = gateway(&ledger)
        .list_categories_with_notes(filter)
        .await
        .unwrap();

    assert_eq!(ids(&categories, |c| &c.category.id), expected);
}

#[tokio::test]
async fn test_notes_attached_first_wins() {
    let ledger = Arc::new(seeded_ledger());
    let categories = gateway(&ledger)
        .list_categories_with_notes(CategoryFilter::default())
        .await
        .unwrap();

    let note = |id: &str| {
        categories
            .iter()
            .find(|c| c.category.id == id)
            .and_then(|c| c.note.clone())
    };
    assert_eq!(note("cat-rent").as_deref(), Some("Due on the 1st"));
    assert_eq!(note("cat-salary").as_deref(), Some("Monthly"));
    assert_eq!(note("cat-power"), None);
}

#[tokio::test]
async fn test_groups_attached_and_dangling_null() {
    let ledger = Arc::new(seeded_ledger());
    let categories = gateway(&ledger)
        .list_categories_with_notes_and_groups(CategoryFilter::default())
        .await
        .unwrap();

    let power = serde_json::to_value(&categories[0]).unwrap();
    assert_eq!(power["category_group"]["name"], json!("Bills"));
    assert_eq!(power["category_group"]["is_income"], json!(false));
    assert_eq!(power["note"], Value::Null);

    let orphan = serde_json::to_value(&categories[3]).unwrap();
    assert_eq!(orphan["id"], json!("cat-orphan"));
    assert_eq!(orphan["group_id"], json!("grp-gone"));
    assert_eq!(orphan["category_group"], Value::Null);
}

#[rstest]
#[case("categories")]
#[case("notes")]
#[case("category_groups")]
#[tokio::test]
async fn test_failed_query_fails_join(#[case] table: &str) {
    let ledger = Arc::new(seeded_ledger().failing_query(table, "syntax error"));
    let err = gateway(&ledger)
        .list_categories_with_notes_and_groups(CategoryFilter::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::QueryJoin(_)));
    assert!(err.to_string().contains("syntax error"));
}

#[rstest]
#[case("categories")]
#[case("notes")]
#[tokio::test]
async fn test_query_without_data_fails_join(#[case] table: &str) {
    let ledger = Arc::new(seeded_ledger().without_query_data(table));
    let err = gateway(&ledger)
        .list_categories_with_notes(CategoryFilter::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AppError::QueryJoin(format!("Query on {table} returned no data"))
    );
}

#[tokio::test]
async fn test_malformed_rows_fail_join() {
    let ledger = Arc::new(
        seeded_ledger().with_categories(vec![json!({"id": 7, "name": "Bad", "hidden": 0, "tombstone": 0})]),
    );
    let err = gateway(&ledger)
        .list_categories_with_notes(CategoryFilter::default())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "QUERY_JOIN_ERROR");
}

// --- Transaction listing ---

#[tokio::test]
async fn test_list_transactions_in_range() {
    let ledger = Arc::new(seeded_ledger());
    let transactions = gateway(&ledger)
        .list_transactions(Some("acc-1"), Some("2024-01-01"), Some("2024-01-31"))
        .await
        .unwrap();

    assert_eq!(ids(&transactions, |t| &t.id), vec!["tx-2", "tx-1"]);
    assert_eq!(transactions[1].category_id.as_deref(), Some("cat-power"));
    assert_eq!(transactions[1].payee_id.as_deref(), Some("p-1"));
    assert_eq!(transactions[1].cleared, Some(true));
    assert_eq!(transactions[0].cleared, Some(false));
}

#[tokio::test]
async fn test_list_transactions_empty() {
    let ledger = Arc::new(seeded_ledger());
    let transactions = gateway(&ledger)
        .list_transactions(Some("acc-9"), Some("2024-01-01"), Some("2024-12-31"))
        .await
        .unwrap();

    assert!(transactions.is_empty());
}

#[rstest]
#[case(None, Some("2024-01-01"), Some("2024-01-31"), "MISSING_REQUIRED_PARAMETERS")]
#[case(Some(""), Some("2024-01-01"), Some("2024-01-31"), "INVALID_PARAMETERS")]
#[case(Some("a1"), Some("2024-02-01"), Some("2024-01-01"), "INVALID_PARAMETERS")]
#[case(Some("a1"), Some("01/02/2024"), Some("2024-03-01"), "INVALID_PARAMETERS")]
#[tokio::test]
async fn test_list_transactions_rejects_before_backend(
    #[case] account_id: Option<&str>,
    #[case] start: Option<&str>,
    #[case] end: Option<&str>,
    #[case] code: &str,
) {
    let ledger = Arc::new(seeded_ledger());
    let err = gateway(&ledger)
        .list_transactions(account_id, start, end)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), code);
    assert_eq!(ledger.calls(), 0);
}

// --- Transaction creation ---

#[tokio::test]
async fn test_create_transaction_imports_normalized_row() {
    let ledger = Arc::new(seeded_ledger());
    let result = gateway(&ledger)
        .create_transaction(&request(valid_body()))
        .await
        .unwrap();

    assert_eq!(result.added.len(), 1);
    assert!(result.updated.is_empty());
    assert!(result.errors.is_empty());

    let rows = ledger.transaction_rows().await;
    let stored = rows.last().unwrap();
    assert_eq!(stored["id"], json!(result.added[0]));
    assert_eq!(stored["account"], json!("acc-1"));
    assert_eq!(stored["category"], json!("cat-power"));
    assert_eq!(stored["notes"], json!(""));
}

#[tokio::test]
async fn test_create_split_transaction() {
    let mut body = valid_body();
    body["subtransactions"] = json!([
        {"amount": 700, "category_id": "cat-power"},
        {"amount": 300, "category_id": "cat-rent", "notes": "half"},
    ]);
    let ledger = Arc::new(seeded_ledger());
    gateway(&ledger)
        .create_transaction(&request(body))
        .await
        .unwrap();

    let rows = ledger.transaction_rows().await;
    let parts = rows.last().unwrap()["subtransactions"].as_array().unwrap().clone();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["amount"], json!(700));
    assert_eq!(parts[1]["category"], json!("cat-rent"));
    assert_eq!(parts[1]["notes"], json!("half"));
}

#[rstest]
#[case::fractional(json!({"amount": 12345.6}), "amount must be an integer")]
#[case::empty_splits(json!({"subtransactions": []}), "subtransactions")]
#[case::unbalanced(
    json!({"amount": 999, "subtransactions": [
        {"amount": 700, "category_id": "c1"},
        {"amount": 300, "category_id": "c2"},
    ]}),
    "1000"
)]
#[tokio::test]
async fn test_invalid_transaction_never_reaches_backend(
    #[case] overrides: Value,
    #[case] message_part: &str,
) {
    let mut body = valid_body();
    for (key, value) in overrides.as_object().unwrap() {
        body[key] = value.clone();
    }
    let ledger = Arc::new(seeded_ledger());
    let err = gateway(&ledger)
        .create_transaction(&request(body))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains(message_part), "{err}");
    assert_eq!(ledger.calls(), 0);
}

#[tokio::test]
async fn test_import_failure_is_write_error() {
    let ledger = Arc::new(seeded_ledger().failing_import("constraint violated"));
    let err = gateway(&ledger)
        .create_transaction(&request(valid_body()))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AppError::BackendWrite("Failed to create transaction: constraint violated".into())
    );
}

#[tokio::test]
async fn test_connection_failure_on_create_is_write_error() {
    let ledger = Arc::new(InMemoryLedger::new());
    ledger.set_init_failure(Some("ECONNREFUSED")).await;
    let err = gateway(&ledger)
        .create_transaction(&request(valid_body()))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "TRANSACTION_WRITE_ERROR");
    assert!(err.to_string().contains("ECONNREFUSED"));
}
