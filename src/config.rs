//! Simulation settings.

use log::warn;
use std::env;

/// Environment variable overriding [`SimulationConfig::max_months`].
pub const MAX_MONTHS_ENV: &str = "DEBT_PAYOFF_MAX_MONTHS";

/// Tunables for a payoff simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Longest schedule the engine will produce before giving up with
    /// `NonAmortizing`. Defaults to 1200 months (100 years).
    pub max_months: u32,
}

impl SimulationConfig {
    pub const DEFAULT_MAX_MONTHS: u32 = 1200;

    /// Reads overrides from the environment, falling back to defaults.
    ///
    /// Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = SimulationConfig::default();

        if let Ok(raw) = env::var(MAX_MONTHS_ENV) {
            match parse_max_months(&raw) {
                Some(max_months) => config.max_months = max_months,
                None => warn!(
                    "Ignoring {}={:?}: expected a positive integer",
                    MAX_MONTHS_ENV, raw
                ),
            }
        }

        config
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_months: Self::DEFAULT_MAX_MONTHS,
        }
    }
}

fn parse_max_months(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&months| months > 0)
}
