//! Value types shared by the price oracle, the savings calculator and the
//! scenario views.

use crate::inputs::Inputs;
use std::fmt::{self, Display, Formatter};

/// A gas price in Gwei.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasPrice(pub f64);

impl Display for GasPrice {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} Gwei", self.0)
    }
}

/// The price of one ETH in USD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EthUsdRate(pub f64);

/// Market data fetched once at startup. A value stays `None` for the rest of
/// the session when its fetch failed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarketData {
    pub gas_price: Option<GasPrice>,
    pub eth_usd_rate: Option<EthUsdRate>,
}

/// Everything the scenarios are derived from. There is exactly one of these
/// per application and views only ever borrow it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct State {
    pub market: MarketData,
    pub inputs: Inputs,
}
