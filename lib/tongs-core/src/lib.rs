//! Core types for the tongs HTTP request layer.
//!
//! Nothing here performs I/O:
//! - [`PathTemplate`], [`QuerySerializer`] and [`header_value`] turn
//!   structured parameters into URL fragments and header text
//! - [`Request`] and [`Response`] are the snapshots interceptors see
//! - [`FetchResponse`] splits a response into `data` or `error`
//! - [`Error`] and [`Result`] cover everything that stops a call
//! - [`StatusCode`] and [`header`] are re-exported from the `http` crate

mod body;
mod encoding;
mod error;
mod fetch;
mod header_param;
mod method;
mod params;
mod path_template;
pub mod prelude;
mod query;
mod request;
mod response;
pub mod style;

pub use body::{
    BodySerializer, BodySerializerFn, ContentType, ParseAs, from_json, from_value, to_form,
    to_json, to_value,
};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use fetch::{FetchResponse, Outcome, Responses};
pub use header_param::header_value;
pub use method::Method;
pub use params::Params;
pub use path_template::{PathStyle, PathTemplate, PathVariable};
pub use query::{
    ArraySerialization, ArrayStyle, ObjectSerialization, ObjectStyle, QuerySerializer,
    QuerySerializerFn, QuerySerializerOptions,
};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{HeaderMap, StatusCode, header};
