//! Basic authentication interceptor.
//!
//! Adds an `Authorization: Basic <base64(user:pass)>` header to every
//! outgoing request.

use std::sync::Arc;

use base64::Engine;
use futures_util::future::{self, BoxFuture};
use http::header::{AUTHORIZATION, HeaderValue};
use tongs_core::{Error, Request, Result};

use super::{Interceptor, RequestContext};

/// Interceptor that adds basic authentication to requests.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    /// Base64-encoded "username:password".
    encoded_credentials: Arc<str>,
}

impl BasicAuth {
    /// Create a new basic auth interceptor with the given username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        Self {
            encoded_credentials: Arc::from(encoded),
        }
    }
}

impl Interceptor for BasicAuth {
    fn on_request<'a>(
        &'a self,
        _ctx: &'a RequestContext,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Option<Request>>> {
        let result = HeaderValue::try_from(format!("Basic {}", self.encoded_credentials))
            .map(|mut value| {
                value.set_sensitive(true);
                let mut request = request.clone();
                request.headers_mut().insert(AUTHORIZATION, value);
                Some(request)
            })
            .map_err(Error::from);
        Box::pin(future::ready(result))
    }

    fn name(&self) -> &str {
        "basic_auth"
    }
}
