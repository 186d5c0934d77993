//! Bearer token authentication interceptor.
//!
//! Adds an `Authorization: Bearer <token>` header to every outgoing request.

use std::sync::Arc;

use futures_util::future::{self, BoxFuture};
use http::header::{AUTHORIZATION, HeaderValue};
use tongs_core::{Error, Request, Result};

use super::{Interceptor, RequestContext};

/// Interceptor that adds bearer token authentication to requests.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tongs::interceptor::BearerAuth;
///
/// let client = tongs::Client::builder()
///     .base_url("https://api.example.com")
///     .interceptor(Arc::new(BearerAuth::new("my-secret-token")))
///     .build();
/// # let _ = client;
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: Arc<str>,
}

impl BearerAuth {
    /// Create a new bearer auth interceptor with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl Interceptor for BearerAuth {
    fn on_request<'a>(
        &'a self,
        _ctx: &'a RequestContext,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Option<Request>>> {
        let result = HeaderValue::try_from(format!("Bearer {}", self.token))
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
        "bearer_auth"
    }
}
