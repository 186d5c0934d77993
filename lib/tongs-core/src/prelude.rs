//! Prelude module for convenient imports.
//!
//! ```ignore
//! use tongs_core::prelude::*;
//! ```

pub use crate::{
    ArrayStyle, BodySerializer, Encoding, Error, FetchResponse, Method, ObjectStyle, Outcome,
    Params, ParseAs, PathTemplate, QuerySerializer, QuerySerializerOptions, Request, Response,
    Responses, Result,
};
