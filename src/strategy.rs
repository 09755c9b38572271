//! Payment allocation strategies.

use crate::account::Account;
use crate::error::EngineError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Decides which active account receives the budget left after minimums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first.
    Avalanche,

    /// Lowest balance first.
    Snowball,
}

impl Strategy {
    /// Compares two accounts; the smaller one is paid first.
    ///
    /// Accounts are identified by `(position, account)` so that ties on every
    /// field fall back to input order and the ordering stays total.
    pub fn compare(&self, a: (usize, &Account), b: (usize, &Account)) -> Ordering {
        let (a_pos, a) = a;
        let (b_pos, b) = b;

        let primary = match self {
            Strategy::Avalanche => b
                .annual_rate
                .cmp(&a.annual_rate)
                .then_with(|| b.balance.cmp(&a.balance)),
            Strategy::Snowball => a
                .balance
                .cmp(&b.balance)
                .then_with(|| b.annual_rate.cmp(&a.annual_rate)),
        };

        primary
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a_pos.cmp(&b_pos))
    }

    /// Orders the given account positions, target first.
    pub fn order(&self, accounts: &[Account], active: &[usize]) -> Vec<usize> {
        let mut ordered = active.to_vec();
        ordered.sort_by(|&a, &b| self.compare((a, &accounts[a]), (b, &accounts[b])));
        ordered
    }

    /// The account that receives this month's extra payment.
    ///
    /// Returns `None` if `active` is empty.
    pub fn target(&self, accounts: &[Account], active: &[usize]) -> Option<usize> {
        active
            .iter()
            .copied()
            .min_by(|&a, &b| self.compare((a, &accounts[a]), (b, &accounts[b])))
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            other => Err(EngineError::InvalidInput(format!(
                "unknown strategy '{}', expected 'avalanche' or 'snowball'",
                other
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Avalanche => f.write_str("avalanche"),
            Strategy::Snowball => f.write_str("snowball"),
        }
    }
}
