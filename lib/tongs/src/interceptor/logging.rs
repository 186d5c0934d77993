//! Request/response logging interceptor.
//!
//! Logs every call through the `tracing` crate. Timing comes from the
//! [`RequestContext`], so the interceptor keeps no per-call state and can be
//! shared between clients.

use futures_util::future::{self, BoxFuture};
use tongs_core::{Error, Request, Response, Result};
use tracing::{debug, info, warn};

use super::{Interceptor, RequestContext};

/// Log level for the logging interceptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// Interceptor that logs requests, responses and transport failures.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tongs::interceptor::LoggingInterceptor;
///
/// let client = tongs::Client::builder()
///     .base_url("https://api.example.com")
///     .interceptor(Arc::new(LoggingInterceptor::debug()))
///     .build();
/// assert_eq!(client.interceptors().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor {
    level: LogLevel,
}

impl LoggingInterceptor {
    /// Create a logging interceptor with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging interceptor that logs at debug level.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

/// Milliseconds since the call started, saturating.
fn elapsed_ms(ctx: &RequestContext) -> u64 {
    u64::try_from(ctx.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl Interceptor for LoggingInterceptor {
    fn on_request<'a>(
        &'a self,
        ctx: &'a RequestContext,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Option<Request>>> {
        let method = request.method();
        let url = request.url();
        match self.level {
            LogLevel::Debug => {
                debug!(
                    id = ctx.id(),
                    method = %method,
                    url = %url,
                    schema_path = %ctx.schema_path(),
                    headers = ?request.headers(),
                    "sending request"
                );
            }
            LogLevel::Info => {
                info!(id = ctx.id(), method = %method, url = %url, "sending request");
            }
        }
        Box::pin(future::ready(Ok(None)))
    }

    fn on_response<'a>(
        &'a self,
        ctx: &'a RequestContext,
        _request: &'a Request,
        response: &'a Response,
    ) -> BoxFuture<'a, Result<Option<Response>>> {
        let status = response.status();
        let elapsed_ms = elapsed_ms(ctx);
        if response.is_success() {
            info!(id = ctx.id(), status, elapsed_ms, "request completed");
        } else {
            warn!(id = ctx.id(), status, elapsed_ms, "request failed with HTTP error");
        }
        if self.level == LogLevel::Debug {
            debug!(id = ctx.id(), headers = ?response.headers(), "response headers");
        }
        Box::pin(future::ready(Ok(None)))
    }

    fn on_error<'a>(
        &'a self,
        ctx: &'a RequestContext,
        _request: &'a Request,
        error: &'a Error,
    ) -> BoxFuture<'a, Result<Option<Response>>> {
        let elapsed_ms = elapsed_ms(ctx);
        warn!(id = ctx.id(), error = %error, elapsed_ms, "request failed");
        Box::pin(future::ready(Ok(None)))
    }

    fn name(&self) -> &str {
        "logging"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::Bytes;
    use http::HeaderMap;
    use tongs_core::{Method, Params, PathTemplate};

    use super::*;

    fn request() -> Request {
        let url = url::Url::parse("https://api.example.com/pets").expect("url");
        Request::builder(Method::Get, url).build()
    }

    #[test]
    fn logging_default() {
        assert_eq!(LoggingInterceptor::new().level(), LogLevel::Info);
        assert_eq!(LoggingInterceptor::debug().level(), LogLevel::Debug);
    }

    #[tokio::test]
    async fn logging_never_changes_anything() {
        let logging = LoggingInterceptor::debug();
        let ctx = RequestContext::new(7, PathTemplate::new("/pets"), Params::new());
        let request = request();

        assert!(logging.on_request(&ctx, &request).await.expect("request").is_none());

        let response = Response::new(500, HeaderMap::new(), Bytes::new());
        assert!(
            logging
                .on_response(&ctx, &request, &response)
                .await
                .expect("response")
                .is_none()
        );

        let error = Error::Timeout;
        assert!(logging.on_error(&ctx, &request, &error).await.expect("error").is_none());
    }

    #[test]
    fn holds_no_per_call_state() {
        assert_eq!(
            std::mem::size_of::<LoggingInterceptor>(),
            std::mem::size_of::<LogLevel>()
        );
    }

    #[tokio::test]
    async fn elapsed_time_follows_each_context() {
        let logging = LoggingInterceptor::new();
        let request = request();

        // Two clients number their calls independently, so ids collide.
        let first = RequestContext::new(1, PathTemplate::new("/pets"), Params::new());
        logging.on_request(&first, &request).await.expect("request");
        std::thread::sleep(Duration::from_millis(20));
        let second = RequestContext::new(1, PathTemplate::new("/pets"), Params::new());
        logging.on_request(&second, &request).await.expect("request");

        assert!(elapsed_ms(&first) >= 20);
        assert!(second.started() > first.started());
    }
}
