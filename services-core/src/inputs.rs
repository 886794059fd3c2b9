//! User adjustable parameters of the calculator.
//!
//! Raw user input is never rejected. Anything that is not a number reads as
//! zero and every value is raised to a minimum of one.

use std::fmt::{self, Display, Formatter};

pub const DEFAULT_GAS_AMOUNT: u64 = 1;
pub const DEFAULT_HOURLY_SALARY: f64 = 50.0;

const MINIMUM: f64 = 1.0;

/// Parses raw user input as a number and clamps it to at least one.
///
/// Infinite and NaN values count as non-numeric input and also become one.
pub fn parse_clamped(raw: &str) -> f64 {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0);
    value.max(MINIMUM)
}

/// Amount of gas saved by every call. Always at least one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GasAmount(u64);

impl GasAmount {
    pub fn new(value: u64) -> Self {
        GasAmount(value.max(DEFAULT_GAS_AMOUNT))
    }

    /// Fractional amounts are truncated after clamping.
    pub fn from_raw(raw: &str) -> Self {
        GasAmount::new(parse_clamped(raw) as u64)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for GasAmount {
    fn default() -> Self {
        GasAmount(DEFAULT_GAS_AMOUNT)
    }
}

impl Display for GasAmount {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hourly salary in USD. Always at least one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HourlySalary(f64);

impl HourlySalary {
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            HourlySalary(value.max(MINIMUM))
        } else {
            HourlySalary(MINIMUM)
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        HourlySalary(parse_clamped(raw))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for HourlySalary {
    fn default() -> Self {
        HourlySalary(DEFAULT_HOURLY_SALARY)
    }
}

impl Display for HourlySalary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Inputs {
    pub gas_amount: GasAmount,
    pub hourly_salary: HourlySalary,
}

impl Inputs {
    /// Replaces the gas amount with the clamped raw value and returns it.
    pub fn set_gas_amount(&mut self, raw: &str) -> GasAmount {
        self.gas_amount = GasAmount::from_raw(raw);
        self.gas_amount
    }

    /// Replaces the hourly salary with the clamped raw value and returns it.
    pub fn set_hourly_salary(&mut self, raw: &str) -> HourlySalary {
        self.hourly_salary = HourlySalary::from_raw(raw);
        self.hourly_salary
    }
}
