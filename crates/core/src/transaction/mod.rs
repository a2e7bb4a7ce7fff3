//! Transaction creation and listing rules.
//!
//! This module implements:
//! - Request and import shapes for new transactions
//! - Ordered, fail-fast validation with split-amount balancing
//! - Listing parameter validation (account + date range)

pub mod error;
pub mod range;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::{DateRangeError, TransactionValidationError};
pub use range::DateRange;
pub use types::{
    AddTransactionRequest, ImportResult, ImportSubtransaction, ImportTransaction,
    SubtransactionRequest, ValidatedTransaction,
};
pub use validation::{is_iso_date, validate_transaction};
