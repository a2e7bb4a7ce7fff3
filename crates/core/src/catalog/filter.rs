//! Category listing filters and the queries they produce.

use crate::query::{Direction, Query};

/// Fields selected from the `categories` table.
pub const CATEGORY_FIELDS: [&str; 7] = [
    "id",
    "name",
    "is_income",
    "hidden",
    "group",
    "sort_order",
    "goal_def",
];

/// Fields selected from the `category_groups` table.
pub const CATEGORY_GROUP_FIELDS: [&str; 5] = ["id", "name", "is_income", "sort_order", "hidden"];

/// Fields selected from the `notes` table.
pub const NOTE_FIELDS: [&str; 2] = ["id", "note"];

/// Options for listing categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Include hidden categories.
    pub include_hidden: bool,
    /// Only income categories. Wins over `expense_only`.
    pub income_only: bool,
    /// Only expense categories.
    pub expense_only: bool,
}

impl CategoryFilter {
    /// Builds a filter from raw query-string values; only `"true"` enables a flag.
    #[must_use]
    pub fn from_params(
        include_hidden: Option<&str>,
        income_only: Option<&str>,
        expense_only: Option<&str>,
    ) -> Self {
        let enabled = |value: Option<&str>| value == Some("true");
        Self {
            include_hidden: enabled(include_hidden),
            income_only: enabled(income_only),
            expense_only: enabled(expense_only),
        }
    }

    /// Value the `is_income` column must equal, if any.
    #[must_use]
    pub const fn income_filter(&self) -> Option<bool> {
        if self.income_only {
            Some(true)
        } else if self.expense_only {
            Some(false)
        } else {
            None
        }
    }

    /// Query for live categories matching this filter, by `sort_order`.
    #[must_use]
    pub fn categories_query(&self) -> Query {
        let mut query = Query::table("categories").filter("tombstone", false);
        if !self.include_hidden {
            query = query.filter("hidden", false);
        }
        if let Some(is_income) = self.income_filter() {
            query = query.filter("is_income", is_income);
        }
        query
            .select(CATEGORY_FIELDS)
            .order_by("sort_order", Direction::Asc)
    }
}

/// Query for every category note.
#[must_use]
pub fn notes_query() -> Query {
    Query::table("notes").select(NOTE_FIELDS)
}

/// Query for live category groups.
#[must_use]
pub fn category_groups_query() -> Query {
    Query::table("category_groups")
        .filter("tombstone", false)
        .select(CATEGORY_GROUP_FIELDS)
}
