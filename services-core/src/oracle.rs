//! The price oracle gathering the market data savings are computed from.
//!
//! Each source is queried exactly once. A failure is logged and leaves the
//! corresponding value absent; it is never retried.

use crate::models::{EthUsdRate, GasPrice, MarketData};
use crate::price_estimation::ExchangeRateFetching;
use anyhow::{anyhow, Result};
use gas_estimation::GasPriceEstimating;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// The external data sources of the oracle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    GasPrice,
    ExchangeRate,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Source::GasPrice => write!(f, "gas price"),
            Source::ExchangeRate => write!(f, "exchange rate"),
        }
    }
}

/// A network error or an unexpected response from one of the sources.
#[derive(Debug, Error)]
#[error("{source_kind} fetch failed")]
pub struct FetchError {
    pub source_kind: Source,
    #[source]
    pub cause: anyhow::Error,
}

pub struct PriceOracle {
    gas_price: Box<dyn GasPriceEstimating>,
    exchange_rate: Box<dyn ExchangeRateFetching>,
}

impl PriceOracle {
    pub fn new(
        gas_price: Box<dyn GasPriceEstimating>,
        exchange_rate: Box<dyn ExchangeRateFetching>,
    ) -> Self {
        PriceOracle {
            gas_price,
            exchange_rate,
        }
    }

    pub async fn fetch_gas_price(&self) -> Result<GasPrice, FetchError> {
        let result = self.gas_price.estimate().await.and_then(positive);
        wrap(Source::GasPrice, result).map(GasPrice)
    }

    pub async fn fetch_eth_usd_rate(&self) -> Result<EthUsdRate, FetchError> {
        let result = self.exchange_rate.exchange_rate().await.and_then(positive);
        wrap(Source::ExchangeRate, result).map(EthUsdRate)
    }

    /// Fetches both values concurrently. Neither fetch waits for the other
    /// and the failure of one does not affect the other.
    pub async fn fetch(&self) -> MarketData {
        let (gas_price, eth_usd_rate) =
            futures::join!(self.fetch_gas_price(), self.fetch_eth_usd_rate());
        MarketData {
            gas_price: log_failure(gas_price),
            eth_usd_rate: log_failure(eth_usd_rate),
        }
    }
}

fn positive(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(anyhow!("expected a positive number but got {}", value))
    }
}

fn wrap(source_kind: Source, result: Result<f64>) -> Result<f64, FetchError> {
    result.map_err(|cause| FetchError { source_kind, cause })
}

fn log_failure<T>(result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{}: {:#}", err, err.cause);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_estimation::MockExchangeRateFetching;
    use crate::util::FutureWaitExt as _;
    use gas_estimation::MockGasPriceEstimating;

    fn oracle(
        gas_price: impl Fn() -> Result<f64> + Send + 'static,
        exchange_rate: impl Fn() -> Result<f64> + Send + 'static,
    ) -> PriceOracle {
        let mut gas_estimator = MockGasPriceEstimating::new();
        gas_estimator
            .expect_estimate()
            .times(1)
            .returning(gas_price);
        let mut rate_fetcher = MockExchangeRateFetching::new();
        rate_fetcher
            .expect_exchange_rate()
            .times(1)
            .returning(exchange_rate);
        PriceOracle::new(Box::new(gas_estimator), Box::new(rate_fetcher))
    }

    #[test]
    fn fetches_both_values() {
        let market = oracle(|| Ok(30.0), || Ok(2000.0)).fetch().wait();
        assert_eq!(
            market,
            MarketData {
                gas_price: Some(GasPrice(30.0)),
                eth_usd_rate: Some(EthUsdRate(2000.0)),
            }
        );
    }

    #[test]
    fn failed_gas_price_does_not_affect_exchange_rate() {
        let market = oracle(|| Err(anyhow!("connection refused")), || Ok(2000.0))
            .fetch()
            .wait();
        assert_eq!(market.gas_price, None);
        assert_eq!(market.eth_usd_rate, Some(EthUsdRate(2000.0)));
    }

    #[test]
    fn failed_exchange_rate_does_not_affect_gas_price() {
        let market = oracle(|| Ok(30.0), || Err(anyhow!("bad json"))).fetch().wait();
        assert_eq!(market.gas_price, Some(GasPrice(30.0)));
        assert_eq!(market.eth_usd_rate, None);
    }

    #[test]
    fn non_positive_values_are_malformed() {
        let market = oracle(|| Ok(0.0), || Ok(-1.0)).fetch().wait();
        assert_eq!(market, MarketData::default());

        let market = oracle(|| Ok(f64::NAN), || Ok(f64::INFINITY)).fetch().wait();
        assert_eq!(market, MarketData::default());
    }

    #[test]
    fn fetch_error_names_its_source() {
        let mut gas_estimator = MockGasPriceEstimating::new();
        gas_estimator
            .expect_estimate()
            .times(1)
            .returning(|| Err(anyhow!("timeout")));
        let mut rate_fetcher = MockExchangeRateFetching::new();
        rate_fetcher.expect_exchange_rate().times(0);
        let oracle = PriceOracle::new(Box::new(gas_estimator), Box::new(rate_fetcher));

        let err = oracle
            .fetch_gas_price()
            .wait()
            .unwrap_err();
        assert_eq!(err.source_kind, Source::GasPrice);
        assert_eq!(err.to_string(), "gas price fetch failed");
        assert_eq!(
            std::error::Error::source(&err).unwrap().to_string(),
            "timeout"
        );
    }
}
