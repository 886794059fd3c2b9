mod http_metrics;

pub use http_metrics::{HttpLabel, HttpMetrics};
