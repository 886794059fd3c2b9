use crate::http::{HttpClient, HttpFactory, HttpLabel};
use anyhow::{Context, Result};
use gas_estimation::Transport;
use serde::de::DeserializeOwned;

/// JSON transport for the gas estimators backed by the shared HTTP client, so
/// their requests are recorded in the HTTP metrics.
#[derive(Debug)]
pub struct HttpTransport {
    client: HttpClient,
    label: HttpLabel,
}

impl HttpTransport {
    pub fn new(http_factory: &HttpFactory, label: HttpLabel) -> Result<Self> {
        let client = http_factory
            .create()
            .context("failed to initialize HTTP client")?;
        Ok(HttpTransport { client, label })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get_json<'a, T: DeserializeOwned>(&self, url: &'a str) -> Result<T> {
        self.client.get_json_async(url, self.label).await
    }
}
