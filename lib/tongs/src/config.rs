//! Client configuration types.

use std::time::Duration;

use serde_json::{Map, Value};
use tongs_core::{BodySerializer, Encoding, ParseAs, QuerySerializer};

/// Defaults a client applies to every call.
///
/// Per-request [`RequestOptions`](crate::RequestOptions) override them.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Prefix for every path; may be empty when paths are absolute URLs.
    pub base_url: String,
    /// Default headers; a `null` value removes the header.
    pub headers: Map<String, Value>,
    /// Default query serialization.
    pub query_serializer: QuerySerializer,
    /// Default body serialization.
    pub body_serializer: BodySerializer,
    /// Default response body interpretation.
    pub parse_as: ParseAs,
    /// Percent-encoding for path parameter values.
    pub path_encoding: Encoding,
}

/// Settings for [`HyperTransport`](crate::HyperTransport).
///
/// The pipeline itself never times out; these bound each network exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound for one exchange, headers and body included.
    pub timeout: Duration,
    /// Upper bound for establishing a TCP connection.
    pub connect_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_idle_per_host: usize,
    /// How long an idle connection stays in the pool.
    pub pool_idle_timeout: Duration,
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Start from the defaults.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for [`TransportConfig`]; unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl TransportConfigBuilder {
    /// Bound each exchange.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bound connection setup.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Idle connections kept per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Idle connection lifetime.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_per_host: self.pool_idle_per_host.unwrap_or(DEFAULT_POOL_IDLE_PER_HOST),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(DEFAULT_POOL_IDLE_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_overrides_is_default() {
        assert_eq!(TransportConfig::builder().build(), TransportConfig::default());
        assert_eq!(TransportConfig::default().timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_overrides() {
        let config = TransportConfig::builder()
            .timeout(Duration::from_millis(1500))
            .connect_timeout(Duration::from_millis(250))
            .pool_idle_per_host(4)
            .build();

        assert_eq!(
            config,
            TransportConfig {
                timeout: Duration::from_millis(1500),
                connect_timeout: Duration::from_millis(250),
                pool_idle_per_host: 4,
                ..TransportConfig::default()
            }
        );
    }

    #[test]
    fn client_config_defaults() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_empty());
        assert!(config.headers.is_empty());
        assert_eq!(config.parse_as, ParseAs::Json);
        assert_eq!(config.path_encoding, Encoding::Component);
    }
}
