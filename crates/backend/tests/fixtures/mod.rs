//! Shared ledger fixtures for backend integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};

use ledgerline_backend::{BackendConnector, InMemoryLedger, LedgerGateway};
use ledgerline_shared::ActualConfig;

pub fn config() -> ActualConfig {
    ActualConfig {
        password: "secret".into(),
        budget_id: "budget-1".into(),
        ..ActualConfig::default()
    }
}

pub fn accounts() -> Vec<Value> {
    vec![
        json!({"id": "acc-1", "name": "Checking", "type": "checking", "balance": 125_000, "closed": 0, "offbudget": 0}),
        json!({"id": "acc-2", "name": "Brokerage", "type": "investment", "closed": 0, "offbudget": 1}),
        json!({"id": "acc-3", "name": "Old Card", "closed": 1, "offbudget": 0, "tombstone": 1}),
    ]
}

pub fn category_groups() -> Vec<Value> {
    vec![
        json!({"id": "grp-bills", "name": "Bills", "is_income": 0, "sort_order": 1, "hidden": 0, "tombstone": 0}),
        json!({"id": "grp-income", "name": "Income", "is_income": 1, "sort_order": 2, "hidden": 0, "tombstone": 0}),
        json!({"id": "grp-gone", "name": "Deleted", "is_income": 0, "sort_order": 3, "hidden": 0, "tombstone": 1}),
    ]
}

pub fn categories() -> Vec<Value> {
    vec![
        json!({"id": "cat-rent", "name": "Rent", "group": "grp-bills", "is_income": 0, "sort_order": 30, "hidden": 0, "tombstone": 0}),
        json!({"id": "cat-power", "name": "Power", "group": "grp-bills", "is_income": 0, "sort_order": 10, "hidden": 0, "tombstone": 0}),
        json!({"id": "cat-salary", "name": "Salary", "group": "grp-income", "is_income": 1, "sort_order": 20, "hidden": 0, "tombstone": 0}),
        json!({"id": "cat-secret", "name": "Secret", "group": "grp-bills", "is_income": 0, "sort_order": 5, "hidden": 1, "tombstone": 0}),
        json!({"id": "cat-orphan", "name": "Orphan", "group": "grp-gone", "is_income": 0, "sort_order": 40, "hidden": 0, "tombstone": 0}),
        json!({"id": "cat-deleted", "name": "Deleted", "group": "grp-bills", "is_income": 0, "sort_order": 1, "hidden": 0, "tombstone": 1}),
    ]
}

pub fn notes() -> Vec<Value> {
    vec![
        json!({"id": "cat-rent", "note": "Due on the 1st"}),
        json!({"id": "cat-salary", "note": "Monthly"}),
        json!({"id": "cat-rent", "note": "Ignored duplicate"}),
    ]
}

pub fn transactions() -> Vec<Value> {
    vec![
        json!({"id": "tx-1", "account": "acc-1", "date": "2024-01-05", "amount": -5000, "payee": "p-1", "category": "cat-power", "notes": "", "cleared": 1, "tombstone": 0}),
        json!({"id": "tx-2", "account": "acc-1", "date": "2024-01-20", "amount": 250_000, "category": "cat-salary", "cleared": 0, "tombstone": 0}),
        json!({"id": "tx-3", "account": "acc-1", "date": "2024-02-02", "amount": -1000, "cleared": null, "tombstone": 0}),
        json!({"id": "tx-4", "account": "acc-2", "date": "2024-01-10", "amount": 700, "tombstone": 0}),
        json!({"id": "tx-5", "account": "acc-1", "date": "2024-01-15", "amount": 900, "tombstone": 1}),
    ]
}

/// A ledger seeded with every fixture table.
pub fn seeded_ledger() -> InMemoryLedger {
    InMemoryLedger::new()
        .with_accounts(accounts())
        .with_category_groups(category_groups())
        .with_categories(categories())
        .with_notes(notes())
        .with_transactions(transactions())
}

pub fn gateway(ledger: &Arc<InMemoryLedger>) -> LedgerGateway {
    LedgerGateway::new(Arc::new(BackendConnector::new(ledger.clone(), &config())))
}
