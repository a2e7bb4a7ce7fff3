//! Coercion of backend-native boolean columns.
//!
//! The ledger backend stores flags as SQLite integers, so depending on the
//! code path a flag arrives as `true`, `1`, `0` or `null`. Every catalog type
//! routes its flag fields through these deserializers so that the wire output
//! always carries real JSON booleans.

use serde::{Deserialize, Deserializer};

/// A flag exactly as the backend may encode it.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl From<RawFlag> for bool {
    fn from(flag: RawFlag) -> Self {
        match flag {
            RawFlag::Bool(value) => value,
            RawFlag::Int(value) => value != 0,
            RawFlag::Float(value) => value.is_normal(),
        }
    }
}

/// Deserializes a flag, treating `null` as `false`.
///
/// Use together with `#[serde(default)]` so a missing column is also `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawFlag>::deserialize(deserializer)?.is_some_and(bool::from))
}

/// Deserializes a nullable flag, keeping `null` distinct from `false`.
pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawFlag>::deserialize(deserializer)?.map(bool::from))
}

/// Coerces a loose JSON flag for comparisons outside of typed records.
///
/// Returns `None` for values that are not flag-like (strings, objects, ...).
#[must_use]
pub fn flag_value(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::Null => Some(false),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(|i| i != 0)
            .or_else(|| n.as_f64().map(f64::is_normal)),
        _ => None,
    }
}
