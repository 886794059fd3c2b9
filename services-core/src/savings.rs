//! Conversion of saved gas into dollars and hours of work.
//!
//! Missing market data is propagated: if any required value is absent, zero
//! or NaN the result is `None` rather than a number.

use crate::inputs::{GasAmount, HourlySalary};
use crate::models::{EthUsdRate, GasPrice};

pub const WEI_PER_GWEI: f64 = 1e9;
pub const WEI_PER_ETH: f64 = 1e18;

// Gwei -> wei -> ETH as a single exact division, so that whole dollar amounts
// survive the floor applied for display.
const GWEI_PER_ETH: f64 = WEI_PER_ETH / WEI_PER_GWEI;

fn known(value: f64) -> Option<f64> {
    if value == 0.0 || value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Total USD saved when `calls` calls each use `gas_amount` less gas.
pub fn total_usd_saved(
    gas_price: Option<GasPrice>,
    eth_usd_rate: Option<EthUsdRate>,
    gas_amount: GasAmount,
    calls: u64,
) -> Option<f64> {
    let gas_price = known(gas_price?.0)?;
    let eth_usd_rate = known(eth_usd_rate?.0)?;
    let gas = calls as f64 * gas_amount.get() as f64;
    Some(gas * gas_price * eth_usd_rate / GWEI_PER_ETH)
}

/// Hours someone earning `hourly_salary` has to work to earn `usd_saved`.
pub fn hours_of_work_saved(usd_saved: Option<f64>, hourly_salary: HourlySalary) -> Option<f64> {
    let usd_saved = known(usd_saved?)?;
    let hourly_salary = known(hourly_salary.get())?;
    Some(usd_saved / hourly_salary)
}
