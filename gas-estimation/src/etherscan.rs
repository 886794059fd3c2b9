//! Etherscan gas tracker `GasPriceEstimating` implementation.
//! Api documentation at https://docs.etherscan.io/api-endpoints/gas-tracker .

use super::{GasPriceEstimating, Transport};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_with::rust::display_fromstr;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.etherscan.io/api";

/// Gas prices in Gwei as reported by the gas oracle. Etherscan transmits them
/// as decimal strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GasPrices {
    #[serde(with = "display_fromstr")]
    pub safe_gas_price: f64,
    #[serde(with = "display_fromstr")]
    pub propose_gas_price: f64,
    #[serde(with = "display_fromstr")]
    pub fast_gas_price: f64,
}

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    message: String,
    result: ResponseResult,
}

// On failure Etherscan replaces the result object with a plain message, for
// example "Invalid API Key".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseResult {
    Prices(GasPrices),
    Error(String),
}

impl Response {
    fn into_result(self) -> Result<GasPrices> {
        match (self.status.as_str(), self.result) {
            ("1", ResponseResult::Prices(prices)) => Ok(prices),
            (_, ResponseResult::Error(reason)) => Err(anyhow!(
                "Etherscan API error '{}': {}",
                self.message,
                reason
            )),
            (status, _) => Err(anyhow!(
                "Etherscan API returned status {}: {}",
                status,
                self.message
            )),
        }
    }
}

/// Retrieve gas prices from the Etherscan gas oracle.
#[derive(Debug)]
pub struct EtherscanGasOracle<T> {
    transport: T,
    url: Url,
}

impl<T: Transport> EtherscanGasOracle<T> {
    pub fn new(transport: T, base_url: &str, api_key: Option<&str>) -> Result<Self> {
        let mut url: Url = base_url
            .parse()
            .with_context(|| format!("failed to parse url {}", base_url))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("module", "gastracker")
                .append_pair("action", "gasoracle");
            if let Some(api_key) = api_key {
                query.append_pair("apikey", api_key);
            }
        }
        Ok(Self { transport, url })
    }

    /// Retrieves the current gas prices from the gas oracle.
    pub async fn gas_prices(&self) -> Result<GasPrices> {
        self.transport
            .get_json::<Response>(self.url.as_str())
            .await
            .context("failed to get gas oracle response from Etherscan")?
            .into_result()
    }
}

#[async_trait::async_trait]
impl<T: Transport> GasPriceEstimating for EtherscanGasOracle<T> {
    async fn estimate(&self) -> Result<f64> {
        let prices = self.gas_prices().await?;
        log::debug!("Etherscan gas prices: {:?}", prices);
        Ok(prices.fast_gas_price)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{FakeTransport, FutureWaitExt as _, TestTransport};
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const OK_RESPONSE: &str = r#"
    {
        "status": "1",
        "message": "OK",
        "result": {
            "LastBlock": "19633296",
            "SafeGasPrice": "12",
            "ProposeGasPrice": "13.5",
            "FastGasPrice": "30",
            "suggestBaseFee": "11.626587093",
            "gasUsedRatio": "0.4979,0.5217,0.4155"
        }
    }"#;

    #[test]
    fn deserialize() {
        let response = serde_json::from_str::<Response>(OK_RESPONSE).unwrap();
        let prices = response.into_result().unwrap();
        assert_approx_eq!(prices.safe_gas_price, 12.0);
        assert_approx_eq!(prices.propose_gas_price, 13.5);
        assert_approx_eq!(prices.fast_gas_price, 30.0);
    }

    #[test]
    fn api_error_message_is_an_error() {
        let json = r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#;
        let response = serde_json::from_str::<Response>(json).unwrap();
        let err = response.into_result().unwrap_err();
        assert!(err.to_string().contains("Invalid API Key"));
    }

    #[test]
    fn malformed_price_fails_to_parse() {
        let json = r#"
        {
            "status": "1",
            "message": "OK",
            "result": {"SafeGasPrice": "low", "ProposeGasPrice": "1", "FastGasPrice": "2"}
        }"#;
        assert!(serde_json::from_str::<Response>(json).is_err());
    }

    #[test]
    fn estimate_uses_fast_gas_price() {
        let oracle = EtherscanGasOracle::new(FakeTransport::new(OK_RESPONSE), DEFAULT_API_URL, None)
            .unwrap();
        assert_approx_eq!(oracle.estimate().wait().unwrap(), 30.0);
    }

    #[test]
    fn request_selects_gas_oracle_action() {
        let oracle = EtherscanGasOracle::new(
            FakeTransport::new(OK_RESPONSE),
            "https://api.example.com/api",
            Some("KEY"),
        )
        .unwrap();
        oracle.estimate().wait().unwrap();
        assert_eq!(
            *oracle.transport.requests.lock().unwrap(),
            vec!["https://api.example.com/api?module=gastracker&action=gasoracle&apikey=KEY"]
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(EtherscanGasOracle::new(FakeTransport::new(OK_RESPONSE), "not a url", None).is_err());
    }

    // cargo test -p gas-estimation etherscan -- --ignored --nocapture
    #[test]
    #[ignore]
    fn real_request() {
        let oracle = EtherscanGasOracle::new(TestTransport::default(), DEFAULT_API_URL, None).unwrap();
        let response = oracle.gas_prices().wait();
        println!("{:?}", response);
    }
}
