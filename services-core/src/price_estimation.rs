//! Module responsible for retrieving the USD exchange rate of the native
//! token.

mod coingecko;

pub use self::coingecko::{CoinGeckoClient, DEFAULT_BASE_URL, DEFAULT_COIN, DEFAULT_CURRENCY};
use anyhow::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ExchangeRateFetching: Send + Sync {
    /// Retrieves the price of one unit of the native token in the quote
    /// currency.
    async fn exchange_rate(&self) -> Result<f64>;
}
