//! Typed HTTP request layer.
//!
//! Describe a call with a path template such as `/pets/{petId}` and
//! structured parameters; tongs serializes them with RFC 6570 / `OpenAPI`
//! parameter styles, runs an ordered chain of interceptors, sends the request
//! through a pluggable transport, and hands back a [`FetchResponse`] holding
//! either `data` or `error`. HTTP error statuses are values, not failures.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use tongs::interceptor::BearerAuth;
//! use tongs::{Client, QuerySerializerOptions, ArrayStyle, RequestOptions};
//!
//! # async fn run() -> tongs::Result<()> {
//! let client = Client::builder()
//!     .base_url("https://petstore.example.com/v1/")
//!     .query_serializer(QuerySerializerOptions::default().array(ArrayStyle::PipeDelimited, false))
//!     .build();
//! client.use_interceptor(Arc::new(BearerAuth::new("secret")));
//!
//! // GET https://petstore.example.com/v1/pets?tags=cat|dog&limit=10
//! let pets = client
//!     .get(
//!         "/pets",
//!         RequestOptions::new()
//!             .query_param("tags", json!(["cat", "dog"]))
//!             .query_param("limit", 10),
//!     )
//!     .await?;
//!
//! if let Some(error) = pets.error() {
//!     eprintln!("{}: {error}", pets.status());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod interceptor;
mod options;
mod pipeline;
pub mod prelude;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, TransportConfig, TransportConfigBuilder};
pub use interceptor::{Interceptor, RequestContext};
pub use options::RequestOptions;
#[cfg(feature = "hyper-transport")]
pub use transport::HyperTransport;
pub use transport::{NoTransport, ServiceTransport, Transport, transport_fn};

// Re-export tower for transport composition
pub use tower;

// Re-export core types
pub use tongs_core::{
    ArraySerialization, ArrayStyle, BodySerializer, ContentType, Encoding, Error, FetchResponse,
    Method, ObjectSerialization, ObjectStyle, Outcome, Params, ParseAs, PathStyle, PathTemplate,
    PathVariable, QuerySerializer, QuerySerializerOptions, Request, RequestBuilder, Response,
    Responses, Result, from_json, from_value, header_value, style, to_form, to_json, to_value,
};

// Re-export http types for status codes and headers
pub use tongs_core::{HeaderMap, StatusCode, header};
