//! Validation of transaction listing parameters.

use super::error::DateRangeError;
use super::validation::is_iso_date;

/// A validated account and inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// Account to list.
    pub account_id: String,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: String,
}

impl DateRange {
    /// Validates raw listing parameters.
    ///
    /// `YYYY-MM-DD` strings order chronologically when compared as text, so
    /// the range check is a plain string comparison.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: absence, blank account, bad date
    /// shape, then an inverted range.
    pub fn parse(
        account_id: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, DateRangeError> {
        let (Some(account_id), Some(start_date), Some(end_date)) =
            (account_id, start_date, end_date)
        else {
            return Err(DateRangeError::MissingParameters);
        };

        if account_id.trim().is_empty() {
            return Err(DateRangeError::EmptyAccountId);
        }
        if !is_iso_date(start_date) {
            return Err(DateRangeError::InvalidDate { field: "startDate" });
        }
        if !is_iso_date(end_date) {
            return Err(DateRangeError::InvalidDate { field: "endDate" });
        }
        if start_date > end_date {
            return Err(DateRangeError::StartAfterEnd {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }

        Ok(Self {
            account_id: account_id.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        })
    }
}
