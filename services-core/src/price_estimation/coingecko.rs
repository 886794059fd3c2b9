//! CoinGecko `ExchangeRateFetching` implementation.
//! Api documentation at https://docs.coingecko.com/reference/simple-price .

use super::ExchangeRateFetching;
use crate::http::{HttpClient, HttpFactory, HttpLabel};
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_COIN: &str = "ethereum";
pub const DEFAULT_CURRENCY: &str = "usd";

/// Prices keyed by coin id and then by quote currency, for example
/// `{"ethereum":{"usd":2000.5}}`.
type SimplePrice = HashMap<String, HashMap<String, f64>>;

#[derive(Debug)]
pub struct CoinGeckoClient {
    url: Url,
    coin: String,
    currency: String,
    client: HttpClient,
}

impl CoinGeckoClient {
    /// Creates a client for the price of `coin` in `currency`.
    pub fn new(
        http_factory: &HttpFactory,
        base_url: &str,
        coin: &str,
        currency: &str,
    ) -> Result<Self> {
        let client = http_factory
            .create()
            .context("failed to initialize HTTP client")?;
        // CoinGecko only knows lowercase ids and answers with them.
        let coin = coin.to_lowercase();
        let currency = currency.to_lowercase();
        let url = simple_price_url(base_url, &coin, &currency)?;
        Ok(CoinGeckoClient {
            url,
            coin,
            currency,
            client,
        })
    }
}

#[async_trait::async_trait]
impl ExchangeRateFetching for CoinGeckoClient {
    async fn exchange_rate(&self) -> Result<f64> {
        let prices: SimplePrice = self
            .client
            .get_json_async(self.url.as_str(), HttpLabel::CoinGecko)
            .await
            .context("failed to get price from CoinGecko")?;
        extract_rate(&prices, &self.coin, &self.currency)
    }
}

fn simple_price_url(base_url: &str, coin: &str, currency: &str) -> Result<Url> {
    let mut url: Url = base_url
        .parse()
        .with_context(|| format!("failed to parse url {}", base_url))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("url {} cannot be a base", base_url))?
        .pop_if_empty()
        .extend(&["simple", "price"]);
    url.query_pairs_mut()
        .append_pair("ids", coin)
        .append_pair("vs_currencies", currency);
    Ok(url)
}

fn extract_rate(prices: &SimplePrice, coin: &str, currency: &str) -> Result<f64> {
    prices
        .get(coin)
        .ok_or_else(|| anyhow!("CoinGecko response has no price for {}", coin))?
        .get(currency)
        .copied()
        .ok_or_else(|| anyhow!("CoinGecko response has no {} price for {}", currency, coin))
}
