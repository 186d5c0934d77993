//! HTTP response handling.
//!
//! [`Response`] is what a transport returns and what response interceptors
//! inspect or replace. The body is still raw at that point; turning it into
//! `data`/`error` happens afterwards in [`FetchResponse`](crate::FetchResponse).

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, HeaderMap};

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Assemble a response, typically from a transport.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Single header value by name, if it is visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Declared `content-length`, if present and numeric.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.header(CONTENT_LENGTH.as_str())
            .and_then(|value| value.trim().parse().ok())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }

    const fn class(&self) -> u16 {
        self.status / 100
    }

    /// `2xx`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.class() == 2
    }

    /// `4xx`.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.class() == 4
    }

    /// `5xx`.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.class() == 5
    }

    /// Decode the raw body as JSON, bypassing discrimination.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonDeserialization`] with the failing path.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// The raw body as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Fails on invalid UTF-8; [`ParseAs::Text`](crate::ParseAs::Text) is the lossy variant.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// The body is empty, or declared empty by `content-length: 0`.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.body.is_empty() || self.content_length() == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let response = Response::new(200, headers, Bytes::from(r#"{"id":1}"#));

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn response_status_checks() {
        assert!(Response::new(404, HeaderMap::new(), Bytes::new()).is_client_error());
        assert!(Response::new(503, HeaderMap::new(), Bytes::new()).is_server_error());
        assert!(!Response::new(302, HeaderMap::new(), Bytes::new()).is_success());
    }

    #[test]
    fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
            name: String,
        }

        let response = Response::new(200, HeaderMap::new(), Bytes::from(r#"{"id":1,"name":"test"}"#));
        let user: User = response.json().expect("deserialize");
        assert_eq!(
            user,
            User {
                id: 1,
                name: "test".to_string()
            }
        );
    }

    #[test]
    fn empty_body_detection() {
        assert!(Response::new(200, HeaderMap::new(), Bytes::new()).is_empty_body());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        assert!(Response::new(200, headers, Bytes::from("ignored")).is_empty_body());

        assert!(!Response::new(200, HeaderMap::new(), Bytes::from("{}")).is_empty_body());
    }
}
