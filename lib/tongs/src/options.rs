//! Per-request options and how they combine with client defaults.
//!
//! Precedence is always "later wins": client defaults, then the request.
//! Headers merge key by key and a `null` value deletes the key.

use std::fmt;
use std::sync::Arc;

use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};
use tongs_core::{
    BodySerializer, ContentType, Params, ParseAs, QuerySerializer, Responses, Result,
    header_value, to_value,
};

use crate::ClientConfig;
use crate::transport::Transport;

/// Options for one call.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tongs::{ParseAs, RequestOptions};
///
/// let options = RequestOptions::new()
///     .path_param("petId", 42)
///     .query_param("fields", json!(["name", "tag"]))
///     .header("x-request-id", "abc")
///     .parse_as(ParseAs::Text);
/// # let _ = options;
/// ```
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub(crate) params: Params,
    pub(crate) body: Option<Value>,
    pub(crate) headers: Map<String, Value>,
    pub(crate) query_serializer: Option<QuerySerializer>,
    pub(crate) body_serializer: Option<BodySerializer>,
    pub(crate) parse_as: Option<ParseAs>,
    pub(crate) transport: Option<Arc<dyn Transport>>,
    pub(crate) responses: Option<Responses>,
}

impl RequestOptions {
    /// No parameters, no body, client defaults everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Set a path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params = self.params.path(name, value);
        self
    }

    /// Set a query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params = self.params.query(name, value);
        self
    }

    /// Set a header parameter; these win over every other header source.
    #[must_use]
    pub fn header_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params = self.params.header(name, value);
        self
    }

    /// Set a request header; `null` removes a client default.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        Ok(self.body(to_value(body)?))
    }

    /// Override the query serializer.
    #[must_use]
    pub fn query_serializer(mut self, serializer: impl Into<QuerySerializer>) -> Self {
        self.query_serializer = Some(serializer.into());
        self
    }

    /// Override the body serializer.
    #[must_use]
    pub fn body_serializer(mut self, serializer: BodySerializer) -> Self {
        self.body_serializer = Some(serializer);
        self
    }

    /// Override how the response body is read.
    #[must_use]
    pub fn parse_as(mut self, parse_as: ParseAs) -> Self {
        self.parse_as = Some(parse_as);
        self
    }

    /// Override the transport for this call only.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Declare the statuses this operation answers with.
    #[must_use]
    pub fn responses(mut self, responses: Responses) -> Self {
        self.responses = Some(responses);
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("params", &self.params)
            .field("body", &self.body)
            .field("headers", &self.headers)
            .field("query_serializer", &self.query_serializer)
            .field("body_serializer", &self.body_serializer)
            .field("parse_as", &self.parse_as)
            .field("transport", &self.transport.as_ref().map(|_| ".."))
            .field("responses", &self.responses)
            .finish()
    }
}

/// Client defaults resolved against one request.
pub(crate) struct Merged<'a> {
    pub(crate) query_serializer: &'a QuerySerializer,
    pub(crate) body_serializer: &'a BodySerializer,
    pub(crate) parse_as: ParseAs,
}

impl<'a> Merged<'a> {
    pub(crate) fn new(config: &'a ClientConfig, options: &'a RequestOptions) -> Self {
        Self {
            query_serializer: options
                .query_serializer
                .as_ref()
                .unwrap_or(&config.query_serializer),
            body_serializer: options
                .body_serializer
                .as_ref()
                .unwrap_or(&config.body_serializer),
            parse_as: options.parse_as.unwrap_or(config.parse_as),
        }
    }
}

/// Join base URL and path with exactly one `/` between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    if base.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Merge header layers in order; later layers win and `null` deletes.
///
/// `content_type` seeds the map before any layer, so every layer can
/// override or remove it.
pub(crate) fn merge_headers<'a>(
    content_type: Option<ContentType>,
    layers: impl IntoIterator<Item = &'a Map<String, Value>>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(content_type) = content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type.as_str()));
    }
    for layer in layers {
        apply_headers(&mut headers, layer)?;
    }
    Ok(headers)
}

fn apply_headers(headers: &mut HeaderMap, values: &Map<String, Value>) -> Result<()> {
    for (name, value) in values {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        match header_value(value) {
            Some(text) => {
                headers.insert(name, HeaderValue::try_from(text)?);
            }
            None => {
                headers.remove(&name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;
    use tongs_core::QuerySerializerOptions;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn base_url_gets_exactly_one_slash() {
        check!(join_url("https://api.example.com", "/pets") == "https://api.example.com/pets");
        check!(join_url("https://api.example.com/", "/pets") == "https://api.example.com/pets");
        check!(join_url("https://api.example.com/", "pets") == "https://api.example.com/pets");
        check!(join_url("https://api.example.com/v1//", "pets") == "https://api.example.com/v1/pets");
        check!(join_url("", "https://other.example.com/pets") == "https://other.example.com/pets");
    }

    #[test]
    fn headers_merge_in_precedence_order() {
        let client = map(json!({"x-client": "1", "x-shared": "client", "accept": "text/plain"}));
        let request = map(json!({"x-shared": "request", "accept": null}));
        let params = map(json!({"x-shared": "param", "x-list": ["a", "b"]}));

        let headers =
            merge_headers(Some(ContentType::Json), [&client, &request, &params]).expect("headers");

        check!(headers.get("content-type").map(HeaderValue::as_bytes) == Some(b"application/json".as_slice()));
        check!(headers.get("x-client").map(HeaderValue::as_bytes) == Some(b"1".as_slice()));
        check!(headers.get("x-shared").map(HeaderValue::as_bytes) == Some(b"param".as_slice()));
        check!(headers.get("x-list").map(HeaderValue::as_bytes) == Some(b"a,b".as_slice()));
        check!(headers.get("accept").is_none());
    }

    #[test]
    fn content_type_can_be_removed_or_replaced() {
        let removed = merge_headers(Some(ContentType::Json), [&map(json!({"Content-Type": null}))])
            .expect("headers");
        check!(removed.get(CONTENT_TYPE).is_none());

        let replaced = merge_headers(
            Some(ContentType::Json),
            [&map(json!({"content-type": "application/merge-patch+json"}))],
        )
        .expect("headers");
        check!(
            replaced.get(CONTENT_TYPE).map(HeaderValue::as_bytes)
                == Some(b"application/merge-patch+json".as_slice())
        );
    }

    #[test]
    fn invalid_header_name_is_an_error() {
        let result = merge_headers(None, [&map(json!({"bad header": "x"}))]);
        check!(let Err(tongs_core::Error::InvalidHeader(_)) = result);
    }

    #[test]
    fn request_overrides_client_serializers() {
        let config = ClientConfig {
            query_serializer: QuerySerializerOptions::default().allow_reserved(true).into(),
            parse_as: ParseAs::Text,
            ..ClientConfig::default()
        };

        let inherited = RequestOptions::new();
        let merged = Merged::new(&config, &inherited);
        check!(merged.parse_as == ParseAs::Text);
        check!(merged.query_serializer.serialize(&map(json!({"p": "a/b"}))) == "p=a/b");

        let overriding = RequestOptions::new()
            .parse_as(ParseAs::Bytes)
            .query_serializer(QuerySerializer::custom(|_| "?custom=1".to_string()))
            .body_serializer(BodySerializer::Form);
        let merged = Merged::new(&config, &overriding);
        check!(merged.parse_as == ParseAs::Bytes);
        check!(merged.query_serializer.serialize(&Map::new()) == "custom=1");
        check!(merged.body_serializer.content_type() == Some(ContentType::FormUrlEncoded));
    }

    #[test]
    fn options_builder() {
        #[derive(Serialize)]
        struct Pet {
            name: &'static str,
        }

        let options = RequestOptions::new()
            .path_param("id", 1)
            .query_param("q", "x")
            .header_param("x-h", true)
            .json(&Pet { name: "Rex" })
            .expect("json");
        check!(options.params.path.get("id") == Some(&json!(1)));
        check!(options.params.query.get("q") == Some(&json!("x")));
        check!(options.params.header.get("x-h") == Some(&json!(true)));
        check!(options.body == Some(json!({"name": "Rex"})));
        check!(format!("{options:?}").contains("RequestOptions"));
    }
}
