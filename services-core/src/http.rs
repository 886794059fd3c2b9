//! Module contains the implementation for a shared HTTP client used by the
//! price oracle clients.

pub use crate::metrics::HttpLabel;
use crate::metrics::HttpMetrics;
use anyhow::{anyhow, Context, Result};
use isahc::http::{Error as HttpError, StatusCode, Uri};
use isahc::prelude::Configurable;
use isahc::{HttpClientBuilder, ResponseExt};
use serde::de::DeserializeOwned;
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A factory type for creating HTTP clients.
#[derive(Debug)]
pub struct HttpFactory {
    /// Requests never time out when this is `None`.
    default_timeout: Option<Duration>,
    metrics: Arc<HttpMetrics>,
}

impl HttpFactory {
    /// Creates a new HTTP client factory.
    pub fn new(default_timeout: Option<Duration>, metrics: HttpMetrics) -> Self {
        HttpFactory {
            default_timeout,
            metrics: Arc::new(metrics),
        }
    }

    /// Creates a new HTTP client with the default configuration.
    pub fn create(&self) -> Result<HttpClient> {
        self.with_config(|builder| match self.default_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        })
    }

    /// Creates a new HTTP Client with the given configuration.
    pub fn with_config(
        &self,
        configure: impl FnOnce(HttpClientBuilder) -> HttpClientBuilder,
    ) -> Result<HttpClient> {
        let inner = configure(isahc::HttpClient::builder()).build()?;
        let metrics = self.metrics.clone();

        Ok(HttpClient { inner, metrics })
    }

    /// The metrics shared by all clients created by this factory.
    pub fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }
}

impl Default for HttpFactory {
    fn default() -> Self {
        HttpFactory::new(Some(Duration::from_secs(10)), HttpMetrics::default())
    }
}

/// An HTTP client instance with metrics.
#[derive(Debug)]
pub struct HttpClient {
    inner: isahc::HttpClient,
    metrics: Arc<HttpMetrics>,
}

impl HttpClient {
    /// Standard HTTP GET request that parses the result as JSON.
    pub async fn get_json_async<U, T>(&self, url: U, label: HttpLabel) -> Result<T>
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<HttpError>,
        T: DeserializeOwned,
    {
        let start = Instant::now();

        let mut response = self.inner.get_async(url).await?;
        let json = response.text()?;
        self.metrics.request(label, start.elapsed(), json.len());

        parse_json_response(response.status(), &json)
    }
}

/// Only successful responses are parsed; any other status is an error carrying
/// the response body.
fn parse_json_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(anyhow!("HTTP error status {}: '{}'", status, body.trim()));
    }

    let result = serde_json::from_str(body)
        .with_context(|| format!("failed to parse JSON '{}'", body))?;
    Ok(result)
}
