//! Builder for the ledger backend's query language.
//!
//! A [`Query`] names a table, a conjunction of equality filters, the fields
//! to select and the ordering. It serializes to the backend's JSON query form:
//!
//! ```json
//! {
//!   "table": "categories",
//!   "filterExpressions": [{"tombstone": false}],
//!   "selectExpressions": ["id", "name"],
//!   "orderExpressions": [{"sort_order": "asc"}]
//! }
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// An equality filter on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name.
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

/// An ordering on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Field name.
    pub field: String,
    /// Direction.
    pub direction: Direction,
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.direction)?;
        map.end()
    }
}

/// A parametrized read against one backend table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    table: String,
    #[serde(rename = "filterExpressions")]
    filters: Vec<Filter>,
    #[serde(rename = "selectExpressions")]
    select: Vec<String>,
    #[serde(rename = "orderExpressions")]
    order: Vec<Order>,
}

impl Query {
    /// Starts a query on `table` selecting every field.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            select: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Restricts the selected fields.
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds an ordering; earlier orderings take precedence.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order.push(Order {
            field: field.into(),
            direction,
        });
        self
    }

    /// Table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Equality filters, all of which must hold.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Selected fields; empty means every field.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.select
    }

    /// Orderings.
    #[must_use]
    pub fn orderings(&self) -> &[Order] {
        &self.order
    }
}

/// Result envelope of a query execution.
///
/// `data` is `None` when the backend answered without a payload, which the
/// join engine treats as a malformed result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Rows returned by the backend.
    #[serde(default)]
    pub data: Option<Value>,
}
