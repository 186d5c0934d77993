//! The network boundary.
//!
//! A [`Transport`] takes the final [`Request`] and returns one [`Response`]
//! or fails. The pipeline never looks inside it. Timeouts, pooling and TLS
//! are all transport concerns.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tongs_core::{Error, Request, Response, Result};
use tower::ServiceExt;
use tower_service::Service;

#[cfg(feature = "hyper-transport")]
mod connector;
#[cfg(feature = "hyper-transport")]
mod hyper;

#[cfg(feature = "hyper-transport")]
pub use self::hyper::HyperTransport;

/// Sends a request over the network.
pub trait Transport: Send + Sync {
    /// Perform one exchange.
    fn send(&self, request: Request) -> BoxFuture<'static, Result<Response>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: Request) -> BoxFuture<'static, Result<Response>> {
        (**self).send(request)
    }
}

/// Transport built from an async closure.
#[derive(Clone)]
pub struct TransportFn<F>(F);

/// Wrap a closure returning a future as a [`Transport`].
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use tongs::transport::transport_fn;
/// use tongs::{HeaderMap, Response};
///
/// let transport = transport_fn(|_request| async {
///     Ok(Response::new(200, HeaderMap::new(), Bytes::from_static(b"{}")))
/// });
/// let client = tongs::Client::builder()
///     .base_url("https://api.example.com")
///     .transport(transport)
///     .build();
/// # let _ = client;
/// ```
#[must_use]
pub fn transport_fn<F, Fut>(f: F) -> TransportFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    TransportFn(f)
}

impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    fn send(&self, request: Request) -> BoxFuture<'static, Result<Response>> {
        Box::pin((self.0)(request))
    }
}

impl<F> fmt::Debug for TransportFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransportFn")
    }
}

/// Adapts any tower [`Service`] into a [`Transport`].
///
/// Each call clones the service and drives it with `oneshot`, so layered
/// stacks built with `tower::ServiceBuilder` plug in directly.
#[derive(Debug, Clone)]
pub struct ServiceTransport<S> {
    service: S,
}

impl<S> ServiceTransport<S> {
    /// Wrap a service.
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    /// The wrapped service.
    pub const fn get_ref(&self) -> &S {
        &self.service
    }
}

impl<S> Transport for ServiceTransport<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    fn send(&self, request: Request) -> BoxFuture<'static, Result<Response>> {
        Box::pin(self.service.clone().oneshot(request))
    }
}

/// Transport that fails every call.
///
/// The default when the `hyper-transport` feature is disabled and no
/// transport was given to the builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransport;

impl Transport for NoTransport {
    fn send(&self, _request: Request) -> BoxFuture<'static, Result<Response>> {
        Box::pin(futures_util::future::ready(Err(Error::transport(
            "no transport configured",
        ))))
    }
}

/// Default transport for a client without an explicit one.
#[cfg(feature = "hyper-transport")]
pub(crate) fn default_transport(config: crate::TransportConfig) -> Arc<dyn Transport> {
    Arc::new(HyperTransport::with_config(config))
}

/// Default transport for a client without an explicit one.
#[cfg(not(feature = "hyper-transport"))]
pub(crate) fn default_transport(_config: crate::TransportConfig) -> Arc<dyn Transport> {
    Arc::new(NoTransport)
}
