use std::{collections::HashMap, fmt, future::Future, pin::Pin, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Method,
};
use tracing::{debug, error, span, Instrument, Level, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::services::burrito::models::errors::BurritoError;

/// Options handed to the transport alongside a request.
///
/// Client-wide defaults are merged beneath per-call options. Method, content type
/// and authorization are never taken from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub extra_headers: HashMap<String, String>,
}

impl RequestOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Header names are case-insensitive and stored lowercased.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Layers `self` over `defaults`, values set on `self` win.
    pub fn merged_over(&self, defaults: &RequestOptions) -> RequestOptions {
        let mut extra_headers = lowercased(&defaults.extra_headers);
        extra_headers.extend(lowercased(&self.extra_headers));
        RequestOptions {
            timeout: self.timeout.or(defaults.timeout),
            extra_headers,
        }
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap, BurritoError> {
        let mut headers = HeaderMap::new();
        for (k, v) in self.extra_headers.iter() {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| BurritoError::Config(format!("Invalid header name: {k}")))?;
            let value = HeaderValue::from_str(v)
                .map_err(|_| BurritoError::Config(format!("Invalid header value for {k}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

fn lowercased(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
        .collect()
}

/// A fully shaped outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Serialized JSON body, `None` for GET.
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TransportResponse, BurritoError>> + Send + 'a>>;

/// Issues one HTTP round trip. Swap it out to point the client at a test double.
pub trait Transport: Send + Sync + fmt::Debug {
    fn send(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Default [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub(crate) fn build_request(
        &self,
        request: TransportRequest,
    ) -> Result<reqwest::Request, BurritoError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        Ok(builder.build()?)
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> TransportFuture<'_> {
        let span = span!(
            Level::INFO,
            "Burrito HTTP Request",
            "langfuse.observation.name" = format!("{} {}", request.method, request.url).as_str(),
            "langfuse.observation.type" = "span",
            "http.request.method" = request.method.as_str(),
            "url.full" = request.url.as_str(),
        );

        if let Some(body) = &request.body {
            span.set_attribute("langfuse.observation.input", body.clone());
        }

        Box::pin(
            async move {
                let request = self.build_request(request)?;
                let response = self.client.execute(request).await.map_err(|e| {
                    Span::current().set_status(opentelemetry::trace::Status::Error {
                        description: e.to_string().into(),
                    });
                    BurritoError::Transport(e.to_string())
                })?;

                let status = response.status();
                Span::current()
                    .set_attribute("http.response.status_code", status.as_u16() as i64);
                debug!(%status, "received response");

                let body = response.text().await.map_err(|e| {
                    error!(%e, "failed to read response body");
                    BurritoError::Transport(format!("Failed to read response text: {e}"))
                })?;
                Span::current().set_attribute("langfuse.observation.output", body.clone());

                Ok(TransportResponse {
                    status: status.as_u16(),
                    body,
                })
            }
            .instrument(span),
        )
    }
}
