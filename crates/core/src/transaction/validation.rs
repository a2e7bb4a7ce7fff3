//! Validation and normalization of transaction creation requests.
//!
//! Checks run in a fixed order and the first violation is reported:
//! 1. account id present
//! 2. date, amount, payee name and category present
//! 3. date format
//! 4. integer amount
//! 5. payee name and notes length
//! 6. split structure (non-empty, bounded, integer amounts, categories)
//! 7. split amounts add up to the transaction amount

use std::num::FpCategory;

use serde_json::Value;

use super::error::TransactionValidationError;
use super::types::{
    AddTransactionRequest, ImportSubtransaction, ImportTransaction, SubtransactionRequest,
    ValidatedTransaction,
};

/// Maximum payee name length in characters.
pub const MAX_PAYEE_NAME_CHARS: usize = 255;

/// Maximum notes length in characters, for transactions and split parts.
pub const MAX_NOTES_CHARS: usize = 1000;

/// Maximum number of split parts.
pub const MAX_SUBTRANSACTIONS: usize = 50;

/// Returns true if `value` is `YYYY-MM-DD` made of ASCII digits.
///
/// Only the shape is checked; `2024-13-45` passes.
#[must_use]
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Falsy amounts count as missing. This includes a literal `0`.
fn amount_is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n
            .as_f64()
            .is_some_and(|f| matches!(f.classify(), FpCategory::Zero)),
        Some(_) => false,
    }
}

/// 2^63: the first magnitude outside `i64` on the positive side.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Integer amounts, including integral floats such as `1000.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integer_amount(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && matches!(f.fract().classify(), FpCategory::Zero))
            .filter(|f| ((i64::MIN as f64)..I64_BOUND).contains(f))
            .map(|f| f as i64)
    })
}

fn char_count_exceeds(value: Option<&String>, max: usize) -> bool {
    value.is_some_and(|s| s.chars().count() > max)
}

fn validate_subtransactions(
    subtransactions: &[SubtransactionRequest],
    total: i64,
) -> Result<Vec<ImportSubtransaction>, TransactionValidationError> {
    if subtransactions.is_empty() {
        return Err(TransactionValidationError::EmptySubtransactions);
    }
    if subtransactions.len() > MAX_SUBTRANSACTIONS {
        return Err(TransactionValidationError::TooManySubtransactions {
            max: MAX_SUBTRANSACTIONS,
        });
    }

    let mut normalized = Vec::with_capacity(subtransactions.len());
    for (index, sub) in subtransactions.iter().enumerate() {
        let amount = sub
            .amount
            .as_ref()
            .and_then(integer_amount)
            .ok_or(TransactionValidationError::InvalidSubtransactionAmount { index })?;
        let category = present(sub.category_id.as_ref())
            .ok_or(TransactionValidationError::MissingSubtransactionCategory { index })?;
        if char_count_exceeds(sub.notes.as_ref(), MAX_NOTES_CHARS) {
            return Err(TransactionValidationError::SubtransactionNotesTooLong {
                index,
                max: MAX_NOTES_CHARS,
            });
        }

        normalized.push(ImportSubtransaction {
            amount,
            category: category.to_string(),
            notes: sub.notes.clone().unwrap_or_default(),
        });
    }

    let subtotal = normalized
        .iter()
        .try_fold(0_i64, |acc, sub| acc.checked_add(sub.amount))
        .ok_or(TransactionValidationError::SubtotalOverflow)?;
    if subtotal != total {
        return Err(TransactionValidationError::Unbalanced { subtotal, total });
    }

    Ok(normalized)
}

/// Validates a creation request and builds the backend import shape.
///
/// # Errors
///
/// Returns the first rule the request violates.
pub fn validate_transaction(
    request: &AddTransactionRequest,
) -> Result<ValidatedTransaction, TransactionValidationError> {
    let account_id = present(request.account_id.as_ref())
        .ok_or(TransactionValidationError::MissingAccountId)?;

    let (Some(date), Some(payee_name), Some(category)) = (
        present(request.date.as_ref()),
        present(request.payee_name.as_ref()),
        present(request.category_id.as_ref()),
    ) else {
        return Err(TransactionValidationError::MissingRequiredFields);
    };
    if amount_is_missing(request.amount.as_ref()) {
        return Err(TransactionValidationError::MissingRequiredFields);
    }

    if !is_iso_date(date) {
        return Err(TransactionValidationError::InvalidDate);
    }

    let amount = request
        .amount
        .as_ref()
        .and_then(integer_amount)
        .ok_or(TransactionValidationError::NonIntegerAmount)?;

    if char_count_exceeds(request.payee_name.as_ref(), MAX_PAYEE_NAME_CHARS) {
        return Err(TransactionValidationError::PayeeNameTooLong {
            max: MAX_PAYEE_NAME_CHARS,
        });
    }
    if char_count_exceeds(request.notes.as_ref(), MAX_NOTES_CHARS) {
        return Err(TransactionValidationError::NotesTooLong {
            max: MAX_NOTES_CHARS,
        });
    }

    let subtransactions = request
        .subtransactions
        .as_deref()
        .map(|subs| validate_subtransactions(subs, amount))
        .transpose()?;

    Ok(ValidatedTransaction {
        account_id: account_id.to_string(),
        transaction: ImportTransaction {
            date: date.to_string(),
            amount,
            payee_name: payee_name.to_string(),
            category: category.to_string(),
            notes: request.notes.clone().unwrap_or_default(),
            subtransactions,
        },
    })
}
