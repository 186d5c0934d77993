//! Prelude module for convenient imports.
//!
//! ```ignore
//! use tongs::prelude::*;
//! ```

pub use crate::{
    ArrayStyle, BodySerializer, Client, Error, FetchResponse, Interceptor, Method, ObjectStyle,
    Outcome, Params, ParseAs, QuerySerializerOptions, Request, RequestContext, RequestOptions,
    Response, Responses, Result, Transport,
};
pub use serde::{Deserialize, Serialize};
pub use serde_json::json;
