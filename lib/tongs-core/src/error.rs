//! Error types for tongs.
//!
//! Only failures that stop a call live here: transport and interceptor
//! failures, bad input, and (de)serialization problems. A non-2xx HTTP status
//! is never an [`Error`]; it is surfaced through the `error` side of a
//! [`FetchResponse`](crate::FetchResponse).

use derive_more::{Display, Error, From};

/// Main error type for tongs operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout reported by the transport.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Any other failure raised by a transport.
    #[display("transport error: {_0}")]
    #[from(skip)]
    Transport(#[error(not(source))] String),

    /// Failure raised by an interceptor hook.
    #[display("interceptor error: {_0}")]
    #[from(skip)]
    Interceptor(#[error(not(source))] String),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// A header name or value is not valid on the wire.
    #[display("invalid header: {_0}")]
    #[from(skip)]
    InvalidHeader(#[error(not(source))] String),

    /// A path template variable has no value.
    #[display("missing required path parameter '{_0}'")]
    #[from(skip)]
    MissingPathParameter(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a generic transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an interceptor error.
    #[must_use]
    pub fn interceptor(message: impl Into<String>) -> Self {
        Self::Interceptor(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid header error.
    #[must_use]
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader(message.into())
    }

    /// Create a missing path parameter error.
    #[must_use]
    pub fn missing_path_parameter(name: impl Into<String>) -> Self {
        Self::MissingPathParameter(name.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the error came from the transport layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Tls(_) | Self::Timeout | Self::Transport(_)
        )
    }

    /// Returns `true` if an interceptor raised this error.
    #[must_use]
    pub const fn is_interceptor(&self) -> bool {
        matches!(self, Self::Interceptor(_))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::invalid_header(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::invalid_header(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(Error::Timeout.to_string(), "request timeout");
        assert_eq!(
            Error::connection("failed to connect").to_string(),
            "connection error: failed to connect"
        );
        assert_eq!(
            Error::missing_path_parameter("id").to_string(),
            "missing required path parameter 'id'"
        );
        assert_eq!(
            Error::json_deserialization("user.address.city", "missing field `city`").to_string(),
            "JSON deserialization error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn error_classification() {
        assert!(Error::Timeout.is_timeout());
        assert!(Error::Timeout.is_transport());
        assert!(Error::connection("refused").is_connection());
        assert!(Error::transport("boom").is_transport());
        assert!(Error::interceptor("denied").is_interceptor());
        assert!(!Error::interceptor("denied").is_transport());
    }

    #[test]
    fn header_errors_convert() {
        let err = http::HeaderName::from_bytes(b"bad header").map_err(Error::from);
        assert!(matches!(err, Err(Error::InvalidHeader(_))));

        let err = http::HeaderValue::from_str("line\nbreak").map_err(Error::from);
        assert!(matches!(err, Err(Error::InvalidHeader(_))));
    }
}
