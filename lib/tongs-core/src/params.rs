//! Request parameters grouped by location.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Path, query and header parameters of one call.
///
/// Every location is a JSON object map; insertion order is kept and drives
/// the order of serialized output.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tongs_core::Params;
///
/// let params = Params::new()
///     .path("petId", 42)
///     .query("tags", json!(["cat", "dog"]))
///     .header("X-Trace", "abc");
/// assert_eq!(params.path["petId"], json!(42));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Values for path template variables.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub path: Map<String, Value>,
    /// Query parameters.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub query: Map<String, Value>,
    /// Header parameters; `null` removes the header.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub header: Map<String, Value>,
}

impl Params {
    /// Empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a path parameter.
    #[must_use]
    pub fn path(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Set a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Set a header parameter.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }

    /// Returns `true` when no location holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty() && self.header.is_empty()
    }
}
