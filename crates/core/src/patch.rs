//! Partial-update helpers.
//!
//! A text field in an update payload is applied only when it is present and
//! not blank. `None`, `""` and whitespace-only strings all mean "keep the
//! stored value".

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};

/// Returns the supplied value when it counts as provided.
pub fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the value to persist for a text field: the supplied value when
/// provided, otherwise the current one.
pub fn merge_text(supplied: Option<&str>, current: &str) -> String {
    provided(supplied).unwrap_or(current).to_string()
}

/// `deserialize_with` for optional fields sent as strings: missing, `null`
/// and blank values become `None`, anything else must parse as `T`.
///
/// Pair with `#[serde(default)]` so an absent key still deserializes.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    provided(raw.as_deref())
        .map(|v| v.trim().parse().map_err(de::Error::custom))
        .transpose()
}
