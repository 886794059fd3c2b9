//! The application shell: owns the single state, fetches the market data once
//! and renders every scenario from it.

use services_core::{
    inputs::Inputs,
    models::State,
    oracle::PriceOracle,
    scenario::Scenario,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  gas <amount>      set the amount of gas saved per call
  salary <amount>   set the hourly salary
  show              print the savings again
  help              print this message
  quit              exit";

/// A line of user input in interactive mode.
#[derive(Debug, PartialEq)]
pub enum Command {
    GasAmount(String),
    HourlySalary(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let argument = parts.next().unwrap_or_default().trim().to_owned();
        match name {
            "gas" => Ok(Command::GasAmount(argument)),
            "salary" => Ok(Command::HourlySalary(argument)),
            "show" => Ok(Command::Show),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(UnknownCommand(name.to_owned())),
        }
    }
}

pub struct App {
    state: State,
}

impl App {
    /// Fetches the market data exactly once and takes ownership of the
    /// initial inputs.
    pub async fn start(oracle: &PriceOracle, inputs: Inputs) -> Self {
        let market = oracle.fetch().await;
        log::info!(
            "market data: gas price {:?}, ETH/USD {:?}",
            market.gas_price,
            market.eth_usd_rate
        );
        App {
            state: State { market, inputs },
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn set_gas_amount(&mut self, raw: &str) {
        let gas_amount = self.state.inputs.set_gas_amount(raw);
        log::debug!("gas amount set to {} from '{}'", gas_amount, raw);
    }

    pub fn set_hourly_salary(&mut self, raw: &str) {
        let hourly_salary = self.state.inputs.set_hourly_salary(raw);
        log::debug!("hourly salary set to {} from '{}'", hourly_salary, raw);
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let State { market, inputs } = &self.state;
        match market.gas_price {
            Some(gas_price) => writeln!(out, "Current Gas Price: {}", gas_price)?,
            None => writeln!(out, "Current Gas Price:")?,
        }
        writeln!(out, "Amount of Gas saved per call: {}", inputs.gas_amount)?;
        writeln!(out, "Hourly salary: {}", inputs.hourly_salary)?;
        for scenario in Scenario::all(&self.state) {
            writeln!(out)?;
            write!(out, "{}", scenario)?;
        }
        writeln!(out)?;
        writeln!(out, "Market data provided by CoinGecko")?;
        out.flush()
    }

    /// Applies commands read line by line until `quit` or end of input. Every
    /// edit re-renders all scenarios.
    pub fn run_interactive(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", HELP)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse() {
                Ok(Command::GasAmount(raw)) => {
                    self.set_gas_amount(&raw);
                    self.render(out)?;
                }
                Ok(Command::HourlySalary(raw)) => {
                    self.set_hourly_salary(&raw);
                    self.render(out)?;
                }
                Ok(Command::Show) => self.render(out)?,
                Ok(Command::Help) => writeln!(out, "{}", HELP)?,
                Ok(Command::Quit) => break,
                Err(err) => writeln!(out, "{}\n{}", err, HELP)?,
            }
        }
        Ok(())
    }
}
