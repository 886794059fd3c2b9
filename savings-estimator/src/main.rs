mod app;

use anyhow::{Context, Result};
use app::App;
use gas_estimation::EtherscanGasOracle;
use services_core::{
    http::{HttpFactory, HttpLabel},
    inputs::{GasAmount, HourlySalary, Inputs},
    logging,
    metrics::HttpMetrics,
    oracle::PriceOracle,
    price_estimation::CoinGeckoClient,
    transport::HttpTransport,
    util::FutureWaitExt as _,
};
use std::{
    convert::Infallible,
    fmt::{self, Debug, Formatter},
    io::{self, Write as _},
    num::ParseIntError,
    process,
    str::FromStr,
    time::Duration,
};
use structopt::StructOpt;
use url::Url;

#[derive(Debug, StructOpt)]
#[structopt(name = "savings estimator", rename_all = "kebab")]
struct Options {
    /// The amount of gas saved by every call. Values below 1 are raised to 1.
    #[structopt(
        long,
        env = "GAS_AMOUNT",
        default_value = "1",
        parse(from_str = GasAmount::from_raw),
    )]
    gas_amount: GasAmount,

    /// The hourly salary in USD. Values below 1 are raised to 1.
    #[structopt(
        long,
        env = "HOURLY_SALARY",
        default_value = "50",
        parse(from_str = HourlySalary::from_raw),
    )]
    hourly_salary: HourlySalary,

    /// The Etherscan API endpoint queried for the gas oracle.
    #[structopt(long, env = "ETHERSCAN_URL", default_value = "https://api.etherscan.io/api")]
    etherscan_url: Url,

    /// Optional Etherscan API key. Requests without a key are rate limited.
    #[structopt(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    etherscan_api_key: Option<ApiKey>,

    /// The CoinGecko API base URL.
    #[structopt(
        long,
        env = "COINGECKO_URL",
        default_value = "https://api.coingecko.com/api/v3"
    )]
    coingecko_url: Url,

    /// The CoinGecko id of the native token.
    #[structopt(long, env = "COIN", default_value = "ethereum")]
    coin: String,

    /// The currency savings are expressed in.
    #[structopt(long, env = "CURRENCY", default_value = "usd")]
    currency: String,

    /// Timeout in seconds for each price request. Requests never time out
    /// when this is not set.
    #[structopt(long, env = "TIMEOUT", parse(try_from_str = duration_secs))]
    timeout: Option<Duration>,

    /// The log filter, for example `info` or `warn,services_core=debug`.
    #[structopt(long, env = "LOG_FILTER", default_value = "warn")]
    log_filter: String,

    /// Read `gas <amount>` and `salary <amount>` edits from stdin after the
    /// first report.
    #[structopt(short, long)]
    interactive: bool,

    /// Print the HTTP metrics in the prometheus text format before exiting.
    #[structopt(long)]
    print_metrics: bool,
}

/// An API key that is never printed.
struct ApiKey(String);

impl FromStr for ApiKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ApiKey(s.to_owned()))
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

fn main() {
    let options = Options::from_args();
    let succeeded = {
        let (_logger, _guard) = logging::init(&options.log_filter);
        log::debug!(
            "starting savings estimator with runtime options: {:#?}",
            options
        );
        match run(&options) {
            Ok(()) => true,
            Err(err) => {
                log::error!("{:?}", err);
                false
            }
        }
    };
    if !succeeded {
        process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    let http_factory = HttpFactory::new(options.timeout, HttpMetrics::default());
    let oracle = create_oracle(options, &http_factory)?;
    let inputs = Inputs {
        gas_amount: options.gas_amount,
        hourly_salary: options.hourly_salary,
    };
    let mut app = App::start(&oracle, inputs).wait();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.render(&mut out).context("failed to write report")?;

    if options.interactive {
        let stdin = io::stdin();
        app.run_interactive(stdin.lock(), &mut out)
            .context("interactive session failed")?;
        log::debug!("final inputs: {:?}", app.state().inputs);
    }

    if options.print_metrics {
        write!(out, "{}", http_factory.metrics().encode()?)?;
    }
    Ok(())
}

fn create_oracle(options: &Options, http_factory: &HttpFactory) -> Result<PriceOracle> {
    let gas_price = EtherscanGasOracle::new(
        HttpTransport::new(http_factory, HttpLabel::Etherscan)?,
        options.etherscan_url.as_str(),
        options.etherscan_api_key.as_ref().map(|key| key.0.as_str()),
    )?;
    let exchange_rate = CoinGeckoClient::new(
        http_factory,
        options.coingecko_url.as_str(),
        &options.coin,
        &options.currency,
    )?;
    Ok(PriceOracle::new(Box::new(gas_price), Box::new(exchange_rate)))
}

fn duration_secs(s: &str) -> Result<Duration, ParseIntError> {
    Ok(Duration::from_secs(s.parse()?))
}
