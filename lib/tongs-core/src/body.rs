//! Body serialization utilities.
//!
//! Outgoing bodies go through a [`BodySerializer`]; incoming bodies are
//! turned into a [`serde_json::Value`] according to [`ParseAs`].

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use tongs_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Pet { name: String }
///
/// let pet = Pet { name: "Rex".to_string() };
/// let bytes = to_json(&pet).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Rex"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// Uses `serde_html_form`, so sequences become repeated fields
/// (`tags=a&tags=b`).
///
/// # Errors
///
/// Returns an error if form serialization fails, for example on nested maps.
pub fn to_form<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Convert any serializable value into a [`Value`].
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
pub fn to_value<T: serde::Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(Into::into)
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails; the message names the
/// path to the offending field (e.g. `pet.owner.name`).
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize an already parsed [`Value`] with path-aware error messages.
///
/// # Errors
///
/// Returns an error if the value does not match `T`.
pub fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Signature of a custom body serializer.
pub type BodySerializerFn = dyn Fn(&Value) -> Result<Bytes> + Send + Sync;

/// How a request body is written to the wire.
#[derive(Clone, Default)]
pub enum BodySerializer {
    /// Compact JSON.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`; the body must be a flat object.
    Form,
    /// Caller-supplied encoder. No content type is implied.
    Custom(Arc<BodySerializerFn>),
}

impl BodySerializer {
    /// Wrap a custom serializer function.
    pub fn custom<F>(serializer: F) -> Self
    where
        F: Fn(&Value) -> Result<Bytes> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(serializer))
    }

    /// Content type implied by this serializer, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<ContentType> {
        match self {
            Self::Json => Some(ContentType::Json),
            Self::Form => Some(ContentType::FormUrlEncoded),
            Self::Custom(_) => None,
        }
    }

    /// Encode a body.
    ///
    /// # Errors
    ///
    /// Returns the underlying serializer error.
    pub fn serialize(&self, body: &Value) -> Result<Bytes> {
        match self {
            Self::Json => to_json(body),
            Self::Form => to_form(body),
            Self::Custom(serializer) => serializer(body),
        }
    }
}

impl fmt::Debug for BodySerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("Json"),
            Self::Form => f.write_str("Form"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How a response body becomes the `data` or `error` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseAs {
    /// Parse JSON; fall back to the raw text when the body is not JSON.
    #[default]
    Json,
    /// Keep the body as a string.
    Text,
    /// Leave the value `null`; read the bytes from the response itself.
    Bytes,
}

impl ParseAs {
    /// Interpret a non-empty body. Never fails.
    #[must_use]
    pub fn parse(self, body: &[u8]) -> Value {
        match self {
            Self::Json => serde_json::from_slice(body).unwrap_or_else(|_| lossy_text(body)),
            Self::Text => lossy_text(body),
            Self::Bytes => Value::Null,
        }
    }
}

fn lossy_text(body: &[u8]) -> Value {
    Value::String(String::from_utf8_lossy(body).into_owned())
}
