mod etherscan;

pub use etherscan::{EtherscanGasOracle, GasPrices, DEFAULT_API_URL};

use anyhow::Result;
use serde::de::DeserializeOwned;

#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
#[async_trait::async_trait]
pub trait GasPriceEstimating: Send + Sync {
    /// Estimate the gas price in Gwei for a transaction to be mined "fast".
    async fn estimate(&self) -> Result<f64>;
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get_json<'a, T: DeserializeOwned>(&self, url: &'a str) -> Result<T>;
}
