//! Query string serialization.
//!
//! [`QuerySerializerOptions`] picks a style for array and object values;
//! [`QuerySerializer::Custom`] replaces the whole algorithm with a function.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tongs_core::{ArrayStyle, QuerySerializerOptions};
//!
//! let query = json!({"tags": ["a", "b"], "page": 2});
//! let options = QuerySerializerOptions::default().array(ArrayStyle::PipeDelimited, false);
//! assert_eq!(options.serialize(query.as_object().unwrap()), "tags=a|b&page=2");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::Encoding;
use crate::style::{self, Style};

/// Style for array-valued query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrayStyle {
    /// `key=1,2,3`, or `key=1&key=2&key=3` when exploded.
    #[default]
    Form,
    /// `key=1%202%203` when not exploded.
    SpaceDelimited,
    /// `key=1|2|3` when not exploded.
    PipeDelimited,
}

impl From<ArrayStyle> for Style {
    fn from(style: ArrayStyle) -> Self {
        match style {
            ArrayStyle::Form => Self::Form,
            ArrayStyle::SpaceDelimited => Self::SpaceDelimited,
            ArrayStyle::PipeDelimited => Self::PipeDelimited,
        }
    }
}

/// Style for object-valued query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectStyle {
    /// `key=k,v,k,v`, or `k=v&k=v` when exploded.
    Form,
    /// `key[k]=v&key[k]=v`, whatever the explode flag says.
    #[default]
    DeepObject,
}

impl From<ObjectStyle> for Style {
    fn from(style: ObjectStyle) -> Self {
        match style {
            ObjectStyle::Form => Self::Form,
            ObjectStyle::DeepObject => Self::DeepObject,
        }
    }
}

/// Array serialization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArraySerialization {
    /// Style.
    pub style: ArrayStyle,
    /// Repeat `key=value` for every item.
    pub explode: bool,
}

impl Default for ArraySerialization {
    fn default() -> Self {
        Self {
            style: ArrayStyle::Form,
            explode: true,
        }
    }
}

/// Object serialization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectSerialization {
    /// Style.
    pub style: ObjectStyle,
    /// Write one pair per property.
    pub explode: bool,
}

impl Default for ObjectSerialization {
    fn default() -> Self {
        Self {
            style: ObjectStyle::DeepObject,
            explode: true,
        }
    }
}

/// Built-in query serialization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuerySerializerOptions {
    /// How arrays are written.
    pub array: ArraySerialization,
    /// How objects are written.
    pub object: ObjectSerialization,
    /// Leave reserved characters in values unescaped.
    pub allow_reserved: bool,
}

impl QuerySerializerOptions {
    /// Set the array style.
    #[must_use]
    pub const fn array(mut self, style: ArrayStyle, explode: bool) -> Self {
        self.array = ArraySerialization { style, explode };
        self
    }

    /// Set the object style.
    #[must_use]
    pub const fn object(mut self, style: ObjectStyle, explode: bool) -> Self {
        self.object = ObjectSerialization { style, explode };
        self
    }

    /// Set `allowReserved`.
    #[must_use]
    pub const fn allow_reserved(mut self, allow_reserved: bool) -> Self {
        self.allow_reserved = allow_reserved;
        self
    }

    /// Serialize a flat query mapping, keys in mapping order.
    ///
    /// `null` values and empty arrays/objects emit nothing at all.
    #[must_use]
    pub fn serialize(&self, query: &Map<String, Value>) -> String {
        let encoding = Encoding::from_allow_reserved(self.allow_reserved);
        query
            .iter()
            .filter_map(|(name, value)| match value {
                Value::Null => None,
                Value::Array(items) => Some(style::serialize_array(
                    name,
                    items,
                    self.array.style.into(),
                    self.array.explode,
                    encoding,
                )),
                Value::Object(members) => Some(style::serialize_object(
                    name,
                    members,
                    self.object.style.into(),
                    self.object.explode,
                    encoding,
                )),
                scalar => style::serialize_primitive(name, scalar, encoding),
            })
            .filter(|pair| !pair.is_empty())
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Signature of a custom query serializer.
pub type QuerySerializerFn = dyn Fn(&Map<String, Value>) -> String + Send + Sync;

/// Query serialization: built-in options, or a function that takes over.
#[derive(Clone)]
pub enum QuerySerializer {
    /// Built-in serializer.
    Options(QuerySerializerOptions),
    /// Caller-supplied serializer; its output is used verbatim, minus a leading `?`.
    Custom(Arc<QuerySerializerFn>),
}

impl QuerySerializer {
    /// Wrap a custom serializer function.
    pub fn custom<F>(serializer: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(serializer))
    }

    /// Serialize a query mapping into a query string without the leading `?`.
    #[must_use]
    pub fn serialize(&self, query: &Map<String, Value>) -> String {
        match self {
            Self::Options(options) => options.serialize(query),
            Self::Custom(serializer) => {
                let raw = serializer(query);
                match raw.strip_prefix('?') {
                    Some(stripped) => stripped.to_string(),
                    None => raw,
                }
            }
        }
    }
}

impl Default for QuerySerializer {
    fn default() -> Self {
        Self::Options(QuerySerializerOptions::default())
    }
}

impl From<QuerySerializerOptions> for QuerySerializer {
    fn from(options: QuerySerializerOptions) -> Self {
        Self::Options(options)
    }
}

impl fmt::Debug for QuerySerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(options) => f.debug_tuple("Options").field(options).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
