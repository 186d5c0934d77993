//! One call from path template to discriminated result.
//!
//! The stages are linear: building, request interceptors, transport,
//! response interceptors, discrimination. A failure in the interceptors or
//! the transport ends the call with an [`Error`](tongs_core::Error); an HTTP
//! error status never does.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tongs_core::{FetchResponse, Method, PathTemplate, Request, Result};
use tracing::{Instrument, Level, debug, span};

use crate::ClientConfig;
use crate::interceptor::{Interceptors, RequestContext};
use crate::options::{Merged, RequestOptions, join_url, merge_headers};
use crate::transport::Transport;

/// Everything a client shares with its clones.
pub(crate) struct Pipeline {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) interceptors: Interceptors,
    next_id: AtomicU64,
}

impl Pipeline {
    pub(crate) fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        interceptors: Interceptors,
    ) -> Self {
        Self {
            config,
            transport,
            interceptors,
            next_id: AtomicU64::new(1),
        }
    }

    pub(crate) async fn execute(
        &self,
        method: Method,
        schema_path: PathTemplate,
        options: RequestOptions,
    ) -> Result<FetchResponse> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let span = span!(Level::DEBUG, "http_request", id, %method, %schema_path);
        self.run(id, method, schema_path, options)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        id: u64,
        method: Method,
        schema_path: PathTemplate,
        options: RequestOptions,
    ) -> Result<FetchResponse> {
        let request = self.build(method, &schema_path, &options)?;
        debug!(url = %request.url(), "request built");

        let merged = Merged::new(&self.config, &options);
        let parse_as = merged.parse_as;
        let RequestOptions {
            params,
            transport,
            responses,
            ..
        } = options;
        let ctx = RequestContext::new(id, schema_path, params);

        let request = self.interceptors.run_request(&ctx, request).await?;
        debug!(url = %request.url(), "request intercepted");

        let transport = transport.as_ref().unwrap_or(&self.transport);
        let response = match transport.send(request.clone()).await {
            Ok(response) => response,
            Err(error) => {
                debug!(%error, "transport failed");
                self.interceptors.run_error(&ctx, &request, error).await?
            }
        };
        debug!(status = response.status(), "response received");

        let response = self
            .interceptors
            .run_response(&ctx, &request, response)
            .await?;

        let result = FetchResponse::discriminate(response, parse_as, responses.as_ref());
        debug!(
            status = result.status(),
            is_data = result.is_data(),
            "response discriminated"
        );
        Ok(result)
    }

    /// Resolve path, query, headers and body into a request.
    fn build(
        &self,
        method: Method,
        schema_path: &PathTemplate,
        options: &RequestOptions,
    ) -> Result<Request> {
        let merged = Merged::new(&self.config, options);
        let params = &options.params;

        let path = schema_path.expand(&params.path, self.config.path_encoding)?;
        let mut target = join_url(&self.config.base_url, &path);
        let query = merged.query_serializer.serialize(&params.query);
        if !query.is_empty() {
            target.push(if target.contains('?') { '&' } else { '?' });
            target.push_str(&query);
        }
        let url = url::Url::parse(&target)?;

        let body = options
            .body
            .as_ref()
            .map(|body| merged.body_serializer.serialize(body))
            .transpose()?;
        let content_type = body
            .as_ref()
            .and_then(|_| merged.body_serializer.content_type());
        let headers = merge_headers(
            content_type,
            [&self.config.headers, &options.headers, &params.header],
        )?;

        let builder = Request::builder(method, url).headers(headers);
        Ok(match body {
            Some(body) => builder.body(body).build(),
            None => builder.build(),
        })
    }
}
