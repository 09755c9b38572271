//! Fixed-point money and interest-rate types.
//!
//! Amounts are held as an integer number of cents. `rust_decimal` is used
//! only at the edges: parsing caller input and multiplying by a rate, both
//! of which round half-up to the nearest cent before the value re-enters
//! integer arithmetic.

use crate::error::AmountError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount in cents.
///
/// All values entering the engine are rounded to the nearest cent using
/// round-half-up, and all values leaving it are formatted with exactly two
/// decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use debt_payoff::Money;
///
/// let amount = Money::from_str("10.005").unwrap();
/// assert_eq!(amount.to_string(), "10.01");
/// assert_eq!(amount.cents(), 1001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// The number of decimal places kept.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(0);

    /// Largest amount accepted from callers: 100,000,000,000.00.
    pub const MAX_INPUT: Self = Money(10_000_000_000_000);

    /// Creates an amount from a whole number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Rounds a decimal to the nearest cent, half away from zero.
    ///
    /// Returns `None` if the value does not fit.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
    }

    /// Parses caller input, rejecting negative, malformed and oversized amounts.
    pub fn parse_non_negative(s: &str) -> std::result::Result<Self, AmountError> {
        let trimmed = s.trim();
        let decimal =
            Decimal::from_str(trimmed).map_err(|_| AmountError::Malformed(trimmed.to_string()))?;
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(AmountError::Negative(trimmed.to_string()));
        }
        match Money::from_decimal(decimal) {
            Some(money) if money <= Money::MAX_INPUT => Ok(money),
            _ => Err(AmountError::OutOfRange(trimmed.to_string())),
        }
    }

    /// Exact decimal value of this amount.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtracts `rhs`, flooring the result at zero.
    pub fn sub_clamped(self, rhs: Self) -> Self {
        Money((self.0 - rhs.0).max(0))
    }

    /// One month of interest on this amount at the given annual rate:
    /// `self × rate / 100 / 12`, rounded half-up to the cent.
    pub fn percent_of(self, rate: Rate) -> Self {
        if rate.is_zero() || self.is_zero() {
            return Money::ZERO;
        }
        let monthly = Decimal::from(self.0) * rate.as_decimal() / Decimal::from(1200);
        let cents = monthly.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        // Saturates; validated inputs stay many orders of magnitude below i64::MAX.
        Money(cents.to_i64().unwrap_or(i64::MAX))
    }
}

impl FromStr for Money {
    type Err = AmountError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal =
            Decimal::from_str(trimmed).map_err(|_| AmountError::Malformed(trimmed.to_string()))?;
        Money::from_decimal(decimal).ok_or_else(|| AmountError::OutOfRange(trimmed.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serializes as a JSON number that keeps both decimal places (`12.30`).
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_json::Number::from_str(&self.to_string())
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

/// Input amounts are accepted only as decimal strings, never as JSON numbers.

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// An annual percentage rate, e.g. `18.99` for 18.99% APR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Rate(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Rate {
    /// Zero rate.
    pub const ZERO: Self = Rate(Decimal::ZERO);

    /// Creates a rate from a percentage.
    pub fn new(percent: Decimal) -> Self {
        Rate(percent.normalize())
    }

    /// Largest rate accepted from callers, in percent.
    pub fn max_input() -> Self {
        Rate(Decimal::from(10_000))
    }

    /// Parses caller input, rejecting negative, malformed and oversized rates.
    pub fn parse_non_negative(s: &str) -> std::result::Result<Self, AmountError> {
        let trimmed = s.trim();
        let decimal =
            Decimal::from_str(trimmed).map_err(|_| AmountError::Malformed(trimmed.to_string()))?;
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(AmountError::Negative(trimmed.to_string()));
        }
        let rate = Rate::new(decimal);
        if rate > Rate::max_input() {
            return Err(AmountError::OutOfRange(trimmed.to_string()));
        }
        Ok(rate)
    }

    /// The rate as a percentage.
    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
