//! Transaction validation errors.

use ledgerline_shared::AppError;
use thiserror::Error;

/// Reasons a transaction request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionValidationError {
    /// `account_id` is absent or empty.
    #[error("account_id is required")]
    MissingAccountId,

    /// One of the other required fields is absent or empty.
    #[error("date, amount, payee_name, and category_id are required")]
    MissingRequiredFields,

    /// `date` is not `YYYY-MM-DD`.
    #[error("date must be in YYYY-MM-DD format")]
    InvalidDate,

    /// `amount` is not an integer number of minor units.
    #[error("amount must be an integer (minor currency units)")]
    NonIntegerAmount,

    /// `payee_name` exceeds the length limit.
    #[error("payee_name must be at most {max} characters")]
    PayeeNameTooLong {
        /// Limit in characters.
        max: usize,
    },

    /// `notes` exceeds the length limit.
    #[error("notes must be at most {max} characters")]
    NotesTooLong {
        /// Limit in characters.
        max: usize,
    },

    /// `subtransactions` was given as an empty list.
    #[error("subtransactions must contain at least one item when provided")]
    EmptySubtransactions,

    /// Too many split parts.
    #[error("subtransactions must contain at most {max} items")]
    TooManySubtransactions {
        /// Limit in items.
        max: usize,
    },

    /// A split part has a missing or non-integer amount.
    #[error("subtransactions[{index}].amount must be an integer (minor currency units)")]
    InvalidSubtransactionAmount {
        /// Zero-based position of the part.
        index: usize,
    },

    /// A split part has no category.
    #[error("subtransactions[{index}].category_id is required")]
    MissingSubtransactionCategory {
        /// Zero-based position of the part.
        index: usize,
    },

    /// A split part's notes exceed the length limit.
    #[error("subtransactions[{index}].notes must be at most {max} characters")]
    SubtransactionNotesTooLong {
        /// Zero-based position of the part.
        index: usize,
        /// Limit in characters.
        max: usize,
    },

    /// Split amounts overflow when summed.
    #[error("subtransaction amounts overflow")]
    SubtotalOverflow,

    /// Split amounts do not add up to the transaction amount.
    #[error("subtransaction amounts total {subtotal} but transaction amount is {total}")]
    Unbalanced {
        /// Sum of the split amounts.
        subtotal: i64,
        /// Transaction amount.
        total: i64,
    },
}

impl From<TransactionValidationError> for AppError {
    fn from(err: TransactionValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Reasons a transaction listing request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    /// One or more of the three parameters is absent.
    #[error("accountId, startDate, and endDate are required")]
    MissingParameters,

    /// The account id is blank.
    #[error("accountId must not be empty")]
    EmptyAccountId,

    /// A date is not `YYYY-MM-DD`.
    #[error("{field} must be in YYYY-MM-DD format")]
    InvalidDate {
        /// Parameter name.
        field: &'static str,
    },

    /// The range is inverted.
    #[error("startDate ({start}) must not be after endDate ({end})")]
    StartAfterEnd {
        /// Requested start.
        start: String,
        /// Requested end.
        end: String,
    },
}

impl From<DateRangeError> for AppError {
    fn from(err: DateRangeError) -> Self {
        match err {
            DateRangeError::MissingParameters => Self::MissingParameters(err.to_string()),
            _ => Self::InvalidParameters(err.to_string()),
        }
    }
}
