//! Property-based tests for transaction validation rules.

use proptest::prelude::*;
use serde_json::{Value, json};

use super::error::TransactionValidationError;
use super::types::{AddTransactionRequest, SubtransactionRequest};
use super::validation::{is_iso_date, validate_transaction};

/// Strategy for a non-zero split amount (expenses and refunds).
fn split_amount() -> impl Strategy<Value = i64> {
    prop_oneof![-10_000_000i64..=-1, 1i64..=10_000_000]
}

/// Strategy for a list of split amounts.
fn split_amounts() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(split_amount(), 1..=20)
}

fn make_request(amount: Value, splits: Option<Vec<i64>>) -> AddTransactionRequest {
    AddTransactionRequest {
        account_id: Some("a1".into()),
        date: Some("2024-06-30".into()),
        amount: Some(amount),
        payee_name: Some("Payee".into()),
        category_id: Some("c1".into()),
        notes: None,
        subtransactions: splits.map(|amounts| {
            amounts
                .into_iter()
                .enumerate()
                .map(|(i, amount)| SubtransactionRequest {
                    amount: Some(json!(amount)),
                    category_id: Some(format!("c{i}")),
                    notes: None,
                })
                .collect()
        }),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* split whose parts sum to the parent amount, validation
    /// SHALL accept it and keep the parts in order.
    #[test]
    fn prop_balanced_split_accepted(amounts in split_amounts()) {
        let total: i64 = amounts.iter().sum();
        prop_assume!(total != 0);

        let validated = validate_transaction(&make_request(json!(total), Some(amounts.clone())))
            .expect("balanced split should validate");
        let parts: Vec<i64> = validated
            .transaction
            .subtransactions
            .unwrap_or_default()
            .iter()
            .map(|s| s.amount)
            .collect();
        prop_assert_eq!(parts, amounts);
    }

    /// *For any* split whose parts miss the parent amount, validation SHALL
    /// reject it naming the computed subtotal and the expected total.
    #[test]
    fn prop_unbalanced_split_rejected(amounts in split_amounts(), delta in split_amount()) {
        let subtotal: i64 = amounts.iter().sum();
        let total = subtotal + delta;
        prop_assume!(total != 0);

        let result = validate_transaction(&make_request(json!(total), Some(amounts)));
        prop_assert_eq!(
            result,
            Err(TransactionValidationError::Unbalanced { subtotal, total })
        );
    }

    /// *For any* amount with a fractional part, validation SHALL reject it.
    #[test]
    fn prop_fractional_amount_rejected(whole in -1_000_000i64..1_000_000, cents in 1u8..=99) {
        let fractional: Value = serde_json::from_str(&format!("{whole}.{cents:02}")).unwrap();

        let result = validate_transaction(&make_request(fractional, None));
        prop_assert_eq!(result, Err(TransactionValidationError::NonIntegerAmount));
    }

    /// *For any* non-zero integer amount without splits, validation SHALL
    /// accept it unchanged.
    #[test]
    fn prop_integer_amount_accepted(amount in split_amount()) {
        let validated = validate_transaction(&make_request(json!(amount), None)).unwrap();
        prop_assert_eq!(validated.transaction.amount, amount);
        prop_assert!(validated.transaction.subtransactions.is_none());
    }

    /// *For any* string built from the `YYYY-MM-DD` shape, the date check
    /// SHALL pass; dropping any character SHALL make it fail.
    #[test]
    fn prop_date_shape(y in 0u32..10_000, m in 0u32..100, d in 0u32..100, drop in 0usize..10) {
        let date = format!("{y:04}-{m:02}-{d:02}");
        prop_assert!(is_iso_date(&date));

        let mut shortened = date.clone();
        shortened.remove(drop);
        prop_assert!(!is_iso_date(&shortened));
    }
}
