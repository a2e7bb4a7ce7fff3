//! Application-wide error types.
//!
//! Every failure that reaches the HTTP boundary is one of these variants. The
//! variant is chosen where the failure happens; handlers only translate it
//! into a status code and a stable machine-readable code.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Client input is malformed.
    #[error("{0}")]
    Validation(String),

    /// Required query parameters are absent.
    #[error("{0}")]
    MissingParameters(String),

    /// Query parameters are present but malformed.
    #[error("{0}")]
    InvalidParameters(String),

    /// Route or resource not found.
    #[error("{0}")]
    NotFound(String),

    /// The ledger backend could not be reached, initialized or read.
    #[error("{0}")]
    BackendConnection(String),

    /// A write to the ledger backend failed after validation passed.
    #[error("{0}")]
    BackendWrite(String),

    /// A join step failed or a query returned malformed data.
    #[error("{0}")]
    QueryJoin(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::MissingParameters(_) | Self::InvalidParameters(_) => 400,
            Self::NotFound(_) => 404,
            Self::BackendConnection(_)
            | Self::BackendWrite(_)
            | Self::QueryJoin(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingParameters(_) => "MISSING_REQUIRED_PARAMETERS",
            Self::InvalidParameters(_) => "INVALID_PARAMETERS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BackendConnection(_) => "ACTUAL_CONNECTION_ERROR",
            Self::BackendWrite(_) => "TRANSACTION_WRITE_ERROR",
            Self::QueryJoin(_) => "QUERY_JOIN_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
