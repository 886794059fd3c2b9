//! Fixed call count scenarios and their text rendering.

use crate::models::State;
use crate::savings;
use std::fmt::{self, Display, Formatter};

/// The call counts savings are estimated for.
pub const SCENARIOS: [u64; 3] = [100_000, 5_000_000, 100_000_000];

/// Savings for one call count, derived from the shared state on every
/// construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scenario {
    pub calls: u64,
    pub usd_saved: Option<f64>,
    pub hours_of_work: Option<f64>,
}

impl Scenario {
    pub fn new(calls: u64, state: &State) -> Self {
        let usd_saved = savings::total_usd_saved(
            state.market.gas_price,
            state.market.eth_usd_rate,
            state.inputs.gas_amount,
            calls,
        );
        let hours_of_work = savings::hours_of_work_saved(usd_saved, state.inputs.hourly_salary);
        Scenario {
            calls,
            usd_saved,
            hours_of_work,
        }
    }

    /// One scenario per entry of `SCENARIOS`.
    pub fn all(state: &State) -> Vec<Scenario> {
        SCENARIOS
            .iter()
            .map(|calls| Scenario::new(*calls, state))
            .collect()
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "For {} calls", format_number(self.calls as f64))?;
        if let Some(usd_saved) = self.usd_saved {
            writeln!(f, "${} saved", format_number(usd_saved))?;
        }
        if let Some(hours_of_work) = self.hours_of_work {
            writeln!(f, "under {}h of work", format_number(hours_of_work))?;
        }
        Ok(())
    }
}

/// Floors the number and groups the digits of the integer part by thousands.
pub fn format_number(value: f64) -> String {
    // Saturates for values outside of the `i128` range, NaN becomes 0.
    let floored = value.floor() as i128;
    let digits = floored.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if floored < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{GasAmount, HourlySalary, Inputs};
    use crate::models::{EthUsdRate, GasPrice, MarketData};

    fn state(gas_price: Option<f64>, eth_usd_rate: Option<f64>) -> State {
        State {
            market: MarketData {
                gas_price: gas_price.map(GasPrice),
                eth_usd_rate: eth_usd_rate.map(EthUsdRate),
            },
            inputs: Inputs::default(),
        }
    }

    #[test]
    fn formats_numbers_with_thousands_separators() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(6.0), "6");
        assert_eq!(format_number(999.99), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(5_999.999), "5,999");
        assert_eq!(format_number(100_000.0), "100,000");
        assert_eq!(format_number(5_000_000.0), "5,000,000");
        assert_eq!(format_number(123_456_789.5), "123,456,789");
        assert_eq!(format_number(-1234.5), "-1,235");
    }

    #[test]
    fn renders_small_scenario() {
        let scenario = Scenario::new(100_000, &state(Some(30.0), Some(2000.0)));
        assert_eq!(
            scenario.to_string(),
            "For 100,000 calls\n$6 saved\nunder 0h of work\n"
        );
    }

    #[test]
    fn renders_large_scenario() {
        let scenario = Scenario::new(100_000_000, &state(Some(30.0), Some(2000.0)));
        assert_eq!(
            scenario.to_string(),
            "For 100,000,000 calls\n$6,000 saved\nunder 120h of work\n"
        );
    }

    #[test]
    fn renders_only_the_heading_without_gas_price() {
        let state = state(None, Some(2000.0));
        for scenario in Scenario::all(&state) {
            assert_eq!(scenario.usd_saved, None);
            assert_eq!(scenario.hours_of_work, None);
        }
        let rendered: Vec<_> = Scenario::all(&state)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "For 100,000 calls\n",
                "For 5,000,000 calls\n",
                "For 100,000,000 calls\n",
            ]
        );
    }

    #[test]
    fn input_changes_reach_every_scenario() {
        let mut state = state(Some(30.0), Some(2000.0));
        state.inputs.set_gas_amount("-5");
        state.inputs.hourly_salary = HourlySalary::new(25.0);
        assert_eq!(state.inputs.gas_amount, GasAmount::new(1));

        let scenarios = Scenario::all(&state);
        assert_eq!(
            scenarios.iter().map(|s| s.calls).collect::<Vec<_>>(),
            SCENARIOS.to_vec()
        );
        assert_eq!(scenarios[2].usd_saved, Some(6000.0));
        assert_eq!(scenarios[2].hours_of_work, Some(240.0));

        state.inputs.set_gas_amount("2");
        let doubled = Scenario::all(&state);
        for (before, after) in scenarios.iter().zip(&doubled) {
            assert_eq!(after.usd_saved, before.usd_saved.map(|usd| usd * 2.0));
        }
    }
}
