//! Payoff request models for JSON and CSV input.

use crate::account::Account;
use crate::error::{AmountError, EngineError, Result};
use crate::money::{Money, Rate};
use crate::strategy::Strategy;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// Raw credit card snapshot as supplied by the caller.
///
/// Amounts are kept as strings until [`parse`](Self::parse) so they never
/// pass through binary floating point.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditCardRecord {
    /// Optional identifier; empty strings are treated as absent.
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    pub balance: String,

    /// Annual percentage rate, e.g. "18.99".
    pub interest_rate: String,

    pub min_payment: String,
}

impl CreditCardRecord {
    /// Validates the record into an [`Account`].
    pub fn parse(&self) -> Result<Account> {
        let id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let balance = Money::parse_non_negative(&self.balance)
            .map_err(|e| self.invalid("balance", e))?;
        let annual_rate = Rate::parse_non_negative(&self.interest_rate)
            .map_err(|e| self.invalid("interest_rate", e))?;
        let min_payment = Money::parse_non_negative(&self.min_payment)
            .map_err(|e| self.invalid("min_payment", e))?;

        Account::new(id, self.name.trim(), balance, annual_rate, min_payment)
    }

    fn invalid(&self, field: &str, err: AmountError) -> EngineError {
        EngineError::InvalidInput(format!("card '{}' {}: {}", self.name.trim(), field, err))
    }
}

/// A debt payoff request: cards, strategy and monthly budget.
#[derive(Debug, Clone, Deserialize)]
pub struct DebtPayoffRequest {
    pub credit_cards: Vec<CreditCardRecord>,

    /// "avalanche" or "snowball", case-insensitive.
    pub strategy: String,

    pub monthly_payment: String,
}

/// A validated request, ready to simulate.
#[derive(Debug, Clone)]
pub struct PayoffInput {
    pub accounts: Vec<Account>,
    pub strategy: Strategy,
    pub monthly_payment: Money,
}

impl DebtPayoffRequest {
    /// Reads a request from JSON.
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Builds a request from a CSV card list with header
    /// `id,name,balance,interest_rate,min_payment`.
    ///
    /// Unlike a JSON request, any malformed row fails the whole load: a
    /// schedule computed over a partial card list would be misleading.
    pub fn from_csv<R: Read>(reader: R, strategy: &str, monthly_payment: &str) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut credit_cards = Vec::new();
        for (row_idx, result) in csv_reader.deserialize::<CreditCardRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row
            let record = result.map_err(|e| {
                EngineError::InvalidInput(format!("row {}: {}", row_num, e))
            })?;
            debug!("Row {}: loaded card '{}'", row_num, record.name);
            credit_cards.push(record);
        }

        Ok(DebtPayoffRequest {
            credit_cards,
            strategy: strategy.to_string(),
            monthly_payment: monthly_payment.to_string(),
        })
    }

    /// Validates every field of the request.
    pub fn parse(&self) -> Result<PayoffInput> {
        if self.credit_cards.is_empty() {
            return Err(EngineError::InvalidInput(
                "at least one credit card is required".to_string(),
            ));
        }

        let accounts = self
            .credit_cards
            .iter()
            .map(CreditCardRecord::parse)
            .collect::<Result<Vec<_>>>()?;
        let strategy = Strategy::from_str(&self.strategy)?;
        let monthly_payment = Money::parse_non_negative(&self.monthly_payment)
            .map_err(|e| EngineError::InvalidInput(format!("monthly_payment: {}", e)))?;

        Ok(PayoffInput {
            accounts,
            strategy,
            monthly_payment,
        })
    }
}
