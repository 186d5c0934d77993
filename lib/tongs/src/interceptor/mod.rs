//! Interceptors and the ordered registry that runs them.
//!
//! An [`Interceptor`] may observe or replace the outgoing [`Request`], the
//! incoming [`Response`], and transport failures. Hooks run in registration
//! order for requests and in reverse registration order for responses and
//! errors, so the first registered interceptor is the outermost one.
//!
//! Returning `Ok(None)` from a hook means "no change". Returning
//! `Ok(Some(..))` hands the replacement to the next interceptor.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tongs::interceptor::request_fn;
//!
//! let tag = Arc::new(request_fn(|_ctx, request| {
//!     let mut request = request.clone();
//!     request.headers_mut().insert("x-tag", http::HeaderValue::from_static("a"));
//!     Ok(Some(request))
//! }));
//!
//! let client = tongs::Client::builder().base_url("https://api.example.com").build();
//! client.use_interceptor(tag.clone());
//! assert!(client.eject(&tag));
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures_util::future::{self, BoxFuture};
use tongs_core::{Error, Params, PathTemplate, Request, Response, Result};
use tracing::debug;

#[cfg(feature = "interceptor-basic-auth")]
mod basic_auth;
mod bearer_auth;
mod logging;

#[cfg(feature = "interceptor-basic-auth")]
pub use basic_auth::BasicAuth;
pub use bearer_auth::BearerAuth;
pub use logging::{LogLevel, LoggingInterceptor};

/// What a hook sees besides the request itself.
///
/// Created once per call, so per-call facts such as the start time travel
/// with it instead of living in interceptor state.
#[derive(Debug, Clone)]
pub struct RequestContext {
    id: u64,
    schema_path: PathTemplate,
    params: Params,
    started: Instant,
}

impl RequestContext {
    /// Create a context for a call starting now.
    #[must_use]
    pub fn new(id: u64, schema_path: PathTemplate, params: Params) -> Self {
        Self {
            id,
            schema_path,
            params,
            started: Instant::now(),
        }
    }

    /// Request id, unique and increasing per client.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The unresolved path template, e.g. `/pets/{petId}`.
    #[must_use]
    pub const fn schema_path(&self) -> &PathTemplate {
        &self.schema_path
    }

    /// Parameters the call was made with.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// When the call started.
    #[must_use]
    pub const fn started(&self) -> Instant {
        self.started
    }

    /// Time since the call started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Request/response hooks.
///
/// Every hook has a no-op default, so implementors only override what they
/// need.
pub trait Interceptor: Send + Sync {
    /// Inspect or replace the outgoing request.
    ///
    /// An error aborts the call before the transport runs.
    fn on_request<'a>(
        &'a self,
        ctx: &'a RequestContext,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Option<Request>>> {
        let _ = (ctx, request);
        Box::pin(future::ready(Ok(None)))
    }

    /// Inspect or replace the incoming response.
    fn on_response<'a>(
        &'a self,
        ctx: &'a RequestContext,
        request: &'a Request,
        response: &'a Response,
    ) -> BoxFuture<'a, Result<Option<Response>>> {
        let _ = (ctx, request, response);
        Box::pin(future::ready(Ok(None)))
    }

    /// React to a transport failure.
    ///
    /// `Ok(Some(response))` recovers: remaining error hooks are skipped and
    /// the response goes through the response phase. `Err` replaces the
    /// error seen by later hooks and by the caller.
    fn on_error<'a>(
        &'a self,
        ctx: &'a RequestContext,
        request: &'a Request,
        error: &'a Error,
    ) -> BoxFuture<'a, Result<Option<Response>>> {
        let _ = (ctx, request, error);
        Box::pin(future::ready(Ok(None)))
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Ordered list of interceptors shared by a client and its clones.
///
/// Each phase of a call works on its own snapshot, so concurrent `push` or
/// `eject` never affects a phase that already started.
#[derive(Clone, Default)]
pub struct Interceptors {
    inner: Arc<Mutex<Vec<Arc<dyn Interceptor>>>>,
}

impl Interceptors {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor. Duplicates are allowed.
    pub fn push(&self, interceptor: Arc<dyn Interceptor>) {
        self.lock().push(interceptor);
    }

    /// Append several interceptors, keeping their order.
    pub fn extend<I>(&self, interceptors: I)
    where
        I: IntoIterator<Item = Arc<dyn Interceptor>>,
    {
        self.lock().extend(interceptors);
    }

    /// Remove the first registration of this exact instance.
    ///
    /// Returns `false` when it was not registered.
    pub fn eject<I>(&self, interceptor: &Arc<I>) -> bool
    where
        I: Interceptor + ?Sized,
    {
        let target = Arc::as_ptr(interceptor).cast::<()>();
        let mut interceptors = self.lock();
        let position = interceptors
            .iter()
            .position(|registered| Arc::as_ptr(registered).cast::<()>() == target);
        match position {
            Some(index) => {
                interceptors.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every interceptor.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current registrations, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn Interceptor>> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn Interceptor>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run request hooks in registration order.
    pub(crate) async fn run_request(
        &self,
        ctx: &RequestContext,
        mut request: Request,
    ) -> Result<Request> {
        for interceptor in self.snapshot() {
            let replacement = interceptor.on_request(ctx, &request).await?;
            if let Some(replacement) = replacement {
                debug!(interceptor = interceptor.name(), "request replaced");
                request = replacement;
            }
        }
        Ok(request)
    }

    /// Run response hooks in reverse registration order.
    pub(crate) async fn run_response(
        &self,
        ctx: &RequestContext,
        request: &Request,
        mut response: Response,
    ) -> Result<Response> {
        for interceptor in self.snapshot().iter().rev() {
            let replacement = interceptor.on_response(ctx, request, &response).await?;
            if let Some(replacement) = replacement {
                debug!(interceptor = interceptor.name(), "response replaced");
                response = replacement;
            }
        }
        Ok(response)
    }

    /// Run error hooks in reverse registration order until one recovers.
    pub(crate) async fn run_error(
        &self,
        ctx: &RequestContext,
        request: &Request,
        mut error: Error,
    ) -> Result<Response> {
        for interceptor in self.snapshot().iter().rev() {
            let outcome = interceptor.on_error(ctx, request, &error).await;
            match outcome {
                Ok(Some(response)) => {
                    debug!(interceptor = interceptor.name(), "error recovered");
                    return Ok(response);
                }
                Ok(None) => {}
                Err(replacement) => error = replacement,
            }
        }
        Err(error)
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interceptors = self.snapshot();
        f.debug_list()
            .entries(interceptors.iter().map(|interceptor| interceptor.name()))
            .finish()
    }
}

/// Interceptor built from a synchronous request closure.
#[derive(Clone)]
pub struct RequestFn<F>(F);

/// Build an interceptor that only has a request hook.
#[must_use]
pub fn request_fn<F>(f: F) -> RequestFn<F>
where
    F: Fn(&RequestContext, &Request) -> Result<Option<Request>> + Send + Sync,
{
    RequestFn(f)
}

impl<F> Interceptor for RequestFn<F>
where
    F: Fn(&RequestContext, &Request) -> Result<Option<Request>> + Send + Sync,
{
    fn on_request<'a>(
        &'a self,
        ctx: &'a RequestContext,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Option<Request>>> {
        Box::pin(future::ready((self.0)(ctx, request)))
    }

    fn name(&self) -> &str {
        "request_fn"
    }
}

/// Interceptor built from a synchronous response closure.
#[derive(Clone)]
pub struct ResponseFn<F>(F);

/// Build an interceptor that only has a response hook.
#[must_use]
pub fn response_fn<F>(f: F) -> ResponseFn<F>
where
    F: Fn(&RequestContext, &Request, &Response) -> Result<Option<Response>> + Send + Sync,
{
    ResponseFn(f)
}

impl<F> Interceptor for ResponseFn<F>
where
    F: Fn(&RequestContext, &Request, &Response) -> Result<Option<Response>> + Send + Sync,
{
    fn on_response<'a>(
        &'a self,
        ctx: &'a RequestContext,
        request: &'a Request,
        response: &'a Response,
    ) -> BoxFuture<'a, Result<Option<Response>>> {
        Box::pin(future::ready((self.0)(ctx, request, response)))
    }

    fn name(&self) -> &str {
        "response_fn"
    }
}

/// Interceptor built from a synchronous error closure.
#[derive(Clone)]
pub struct ErrorFn<F>(F);

/// Build an interceptor that only has an error hook.
#[must_use]
pub fn error_fn<F>(f: F) -> ErrorFn<F>
where
    F: Fn(&RequestContext, &Request, &Error) -> Result<Option<Response>> + Send + Sync,
{
    ErrorFn(f)
}

impl<F> Interceptor for ErrorFn<F>
where
    F: Fn(&RequestContext, &Request, &Error) -> Result<Option<Response>> + Send + Sync,
{
    fn on_error<'a>(
        &'a self,
        ctx: &'a RequestContext,
        request: &'a Request,
        error: &'a Error,
    ) -> BoxFuture<'a, Result<Option<Response>>> {
        Box::pin(future::ready((self.0)(ctx, request, error)))
    }

    fn name(&self) -> &str {
        "error_fn"
    }
}
