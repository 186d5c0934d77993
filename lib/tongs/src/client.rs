//! The client facade.
//!
//! One method per HTTP verb, each forwarding `(path, options)` to the
//! pipeline with the method fixed, plus pass-throughs to the interceptor
//! registry.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tongs_core::{
    BodySerializer, Encoding, FetchResponse, Method, ParseAs, PathTemplate, QuerySerializer,
    Result,
};

use crate::interceptor::{Interceptor, Interceptors};
use crate::pipeline::Pipeline;
use crate::transport::{self, Transport};
use crate::{ClientConfig, RequestOptions, TransportConfig};

/// HTTP client bound to a base URL and a set of defaults.
///
/// Cheap to clone. Clones share configuration, transport and interceptor
/// registry; every [`Client::builder`] call starts a fresh registry.
///
/// # Example
///
/// ```no_run
/// use tongs::{Client, RequestOptions};
///
/// # async fn run() -> tongs::Result<()> {
/// let client = Client::builder()
///     .base_url("https://petstore.example.com/v1")
///     .header("accept", "application/json")
///     .build();
///
/// let pet = client
///     .get("/pets/{petId}", RequestOptions::new().path_param("petId", 42))
///     .await?;
/// match pet.data() {
///     Some(data) => println!("{data}"),
///     None => println!("status {}: {:?}", pet.status(), pet.error()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    pipeline: Arc<Pipeline>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.pipeline.config)
            .field("interceptors", &self.pipeline.interceptors)
            .finish_non_exhaustive()
    }
}

macro_rules! verb {
    ($(#[$doc:meta])* $name:ident => $method:ident) => {
        $(#[$doc])*
        ///
        /// # Errors
        ///
        /// Fails on invalid input, interceptor failure or transport failure;
        /// an HTTP error status is reported through [`FetchResponse::error`].
        pub async fn $name(
            &self,
            path: impl Into<PathTemplate>,
            options: RequestOptions,
        ) -> Result<FetchResponse> {
            self.request(Method::$method, path, options).await
        }
    };
}

impl Client {
    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client defaults.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.pipeline.config
    }

    /// Run one call with an arbitrary method.
    ///
    /// # Errors
    ///
    /// Fails on invalid input, interceptor failure or transport failure;
    /// an HTTP error status is reported through [`FetchResponse::error`].
    pub async fn request(
        &self,
        method: Method,
        path: impl Into<PathTemplate>,
        options: RequestOptions,
    ) -> Result<FetchResponse> {
        self.pipeline.execute(method, path.into(), options).await
    }

    verb!(
        /// Send a `GET` request.
        get => Get
    );
    verb!(
        /// Send a `PUT` request.
        put => Put
    );
    verb!(
        /// Send a `POST` request.
        post => Post
    );
    verb!(
        /// Send a `DELETE` request.
        delete => Delete
    );
    verb!(
        /// Send an `OPTIONS` request.
        options => Options
    );
    verb!(
        /// Send a `HEAD` request.
        head => Head
    );
    verb!(
        /// Send a `PATCH` request.
        patch => Patch
    );
    verb!(
        /// Send a `TRACE` request.
        trace => Trace
    );

    /// Register an interceptor after the existing ones.
    pub fn use_interceptor(&self, interceptor: Arc<dyn Interceptor>) {
        self.pipeline.interceptors.push(interceptor);
    }

    /// Register several interceptors, in order.
    pub fn use_interceptors<I>(&self, interceptors: I)
    where
        I: IntoIterator<Item = Arc<dyn Interceptor>>,
    {
        self.pipeline.interceptors.extend(interceptors);
    }

    /// Remove an interceptor by identity. Returns `false` if it was not registered.
    pub fn eject<I>(&self, interceptor: &Arc<I>) -> bool
    where
        I: Interceptor + ?Sized,
    {
        self.pipeline.interceptors.eject(interceptor)
    }

    /// Snapshot of the registered interceptors, in order.
    #[must_use]
    pub fn interceptors(&self) -> Vec<Arc<dyn Interceptor>> {
        self.pipeline.interceptors.snapshot()
    }
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    headers: Map<String, Value>,
    query_serializer: Option<QuerySerializer>,
    body_serializer: Option<BodySerializer>,
    parse_as: Option<ParseAs>,
    path_encoding: Option<Encoding>,
    transport: Option<Arc<dyn Transport>>,
    transport_config: Option<TransportConfig>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("query_serializer", &self.query_serializer)
            .field("body_serializer", &self.body_serializer)
            .field("parse_as", &self.parse_as)
            .field("path_encoding", &self.path_encoding)
            .field("transport_config", &self.transport_config)
            .field("interceptors_count", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Prefix every path with this URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header. Arrays are comma-joined.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add several default headers.
    #[must_use]
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.headers
            .extend(headers.into_iter().map(|(name, value)| (name.into(), value.into())));
        self
    }

    /// Default query serializer.
    #[must_use]
    pub fn query_serializer(mut self, serializer: impl Into<QuerySerializer>) -> Self {
        self.query_serializer = Some(serializer.into());
        self
    }

    /// Default body serializer.
    #[must_use]
    pub fn body_serializer(mut self, serializer: BodySerializer) -> Self {
        self.body_serializer = Some(serializer);
        self
    }

    /// Default response body interpretation.
    #[must_use]
    pub fn parse_as(mut self, parse_as: ParseAs) -> Self {
        self.parse_as = Some(parse_as);
        self
    }

    /// Percent-encoding for path parameter values.
    #[must_use]
    pub fn path_encoding(mut self, encoding: Encoding) -> Self {
        self.path_encoding = Some(encoding);
        self
    }

    /// Use this transport instead of the default one.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Configure the default transport. Ignored when a transport is set.
    #[must_use]
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = Some(config);
        self
    }

    /// Register an interceptor.
    #[must_use]
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> Client {
        let defaults = ClientConfig::default();
        let config = ClientConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            headers: self.headers,
            query_serializer: self.query_serializer.unwrap_or(defaults.query_serializer),
            body_serializer: self.body_serializer.unwrap_or(defaults.body_serializer),
            parse_as: self.parse_as.unwrap_or(defaults.parse_as),
            path_encoding: self.path_encoding.unwrap_or(defaults.path_encoding),
        };

        let transport_config = self.transport_config.unwrap_or_default();
        let transport = self
            .transport
            .unwrap_or_else(|| transport::default_transport(transport_config));

        let interceptors = Interceptors::new();
        interceptors.extend(self.interceptors);

        Client {
            pipeline: Arc::new(Pipeline::new(config, transport, interceptors)),
        }
    }
}
