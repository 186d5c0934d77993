//! Header parameter serialization.

use serde_json::Value;

use crate::style::scalar_text;

/// Text for a header parameter value.
///
/// Arrays are comma-joined, strings are taken as-is, numbers and booleans
/// use their display form, objects become compact JSON. `null` yields `None`,
/// which callers treat as "remove this header".
#[must_use]
pub fn header_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| scalar_text(item).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(scalar_text(other).into_owned()),
    }
}
