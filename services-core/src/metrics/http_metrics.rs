use anyhow::Result;
use prometheus::{Encoder as _, HistogramOpts, HistogramVec, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Duration;

/// A registry for all HTTP related metrics.
#[derive(Debug)]
pub struct HttpMetrics {
    registry: Arc<Registry>,
    latency: HistogramVec,
    size: HistogramVec,
}

impl HttpMetrics {
    /// Create a new HTTP metrics registry.
    pub fn new(registry: &Arc<Registry>) -> Result<Self> {
        let latency = HttpMetrics::initialize_histogram(
            registry,
            "gas_savings_http_latency",
            "Latency in seconds for HTTP request",
            vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0],
        )?;
        let size = HttpMetrics::initialize_histogram(
            registry,
            "gas_savings_http_size",
            "Size in bytes for HTTP response bodies",
            vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0],
        )?;

        Ok(HttpMetrics {
            registry: registry.clone(),
            latency,
            size,
        })
    }

    /// Initializes a histogram with for all the labels.
    fn initialize_histogram(
        registry: &Arc<Registry>,
        name: &str,
        description: &str,
        buckets: Vec<f64>,
    ) -> Result<HistogramVec> {
        let options = HistogramOpts::new(name, description).buckets(buckets);
        let histogram = HistogramVec::new(options, &["client"])?;

        for label in HttpLabel::ALL {
            histogram.with_label_values(&[label.as_str()]);
        }

        registry.register(Box::new(histogram.clone()))?;

        Ok(histogram)
    }

    /// Add a request latency and size measurement to the current HTTP metrics
    /// registry for the specified label.
    pub fn request(&self, label: HttpLabel, latency: Duration, size: usize) {
        self.latency
            .with_label_values(&[label.as_str()])
            .observe(latency.as_secs_f64());
        self.size
            .with_label_values(&[label.as_str()])
            .observe(size as _);
    }

    /// Renders all registered metrics in the prometheus text format.
    pub fn encode(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for HttpMetrics {
    fn default() -> Self {
        HttpMetrics::new(&Default::default()).unwrap()
    }
}

/// The external service an HTTP request is sent to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HttpLabel {
    Etherscan,
    CoinGecko,
}

impl HttpLabel {
    const ALL: &'static [HttpLabel] = &[HttpLabel::Etherscan, HttpLabel::CoinGecko];

    fn as_str(self) -> &'static str {
        match self {
            HttpLabel::Etherscan => "etherscan",
            HttpLabel::CoinGecko => "coingecko",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_observed_requests() {
        let metrics = HttpMetrics::default();
        metrics.request(HttpLabel::CoinGecko, Duration::from_millis(120), 42);

        let text = metrics.encode().unwrap();
        assert!(text.contains("gas_savings_http_latency_count{client=\"coingecko\"} 1"));
        assert!(text.contains("gas_savings_http_size_count{client=\"etherscan\"} 0"));
    }
}
