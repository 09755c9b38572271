//! Credit card account state during a simulation.
//!
//! Maintains the invariant: `balance >= 0` at all times.

use crate::error::{EngineError, Result};
use crate::money::{Money, Rate};

/// One credit card's mutable simulation state.
///
/// # Invariants
///
/// - `balance`, `annual_rate` and `min_payment` are never negative
/// - `balance` and `min_payment` start at or below [`Money::MAX_INPUT`]
/// - Once `balance` reaches zero the account is paid off and never
///   receives another payment
///
/// # Uncovered Interest
///
/// Interest accrued for a month is tracked separately in `interest_due` and
/// is paid before principal. If a payment does not cover all of it, the
/// remainder is simply not collected: it is not added to the balance.
#[derive(Debug, Clone)]
pub struct Account {
    /// Caller-supplied identifier. Absent for ad-hoc what-if calculations.
    pub id: Option<String>,

    /// Display label. Not used in computation.
    pub name: String,

    /// Outstanding principal.
    pub balance: Money,

    /// Annual percentage rate.
    pub annual_rate: Rate,

    /// Minimum monthly payment.
    pub min_payment: Money,

    /// Interest accrued this month and not yet paid.
    interest_due: Money,
}

/// How a single payment was split between interest and principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedPayment {
    /// Amount actually taken, after capping at what the account owed.
    pub amount: Money,

    /// Portion that covered this month's interest.
    pub interest: Money,

    /// Portion that reduced the balance.
    pub principal: Money,
}

impl Account {
    /// Creates an account from a caller snapshot.
    ///
    /// Returns [`EngineError::InvalidInput`] if any amount is negative or
    /// above [`Money::MAX_INPUT`] / [`Rate::max_input`].
    pub fn new(
        id: Option<String>,
        name: impl Into<String>,
        balance: Money,
        annual_rate: Rate,
        min_payment: Money,
    ) -> Result<Self> {
        let name = name.into();

        if balance < Money::ZERO {
            return Err(EngineError::InvalidInput(format!(
                "card '{}' has negative balance {}",
                name, balance
            )));
        }
        if annual_rate < Rate::ZERO {
            return Err(EngineError::InvalidInput(format!(
                "card '{}' has negative interest rate {}",
                name, annual_rate
            )));
        }
        if min_payment < Money::ZERO {
            return Err(EngineError::InvalidInput(format!(
                "card '{}' has negative minimum payment {}",
                name, min_payment
            )));
        }
        for (field, amount) in [("balance", balance), ("minimum payment", min_payment)] {
            if amount > Money::MAX_INPUT {
                return Err(EngineError::InvalidInput(format!(
                    "card '{}' {} {} exceeds the maximum of {}",
                    name,
                    field,
                    amount,
                    Money::MAX_INPUT
                )));
            }
        }
        if annual_rate > Rate::max_input() {
            return Err(EngineError::InvalidInput(format!(
                "card '{}' interest rate {} exceeds the maximum of {}",
                name,
                annual_rate,
                Rate::max_input()
            )));
        }

        Ok(Account {
            id,
            name,
            balance,
            annual_rate,
            min_payment,
            interest_due: Money::ZERO,
        })
    }

    /// Returns `true` once the balance has reached zero.
    pub fn is_paid_off(&self) -> bool {
        self.balance.is_zero()
    }

    /// Interest accrued this month and not yet paid.
    pub fn interest_due(&self) -> Money {
        self.interest_due
    }

    /// The most this account can accept this month: `balance + interest_due`.
    pub fn amount_owed(&self) -> Money {
        self.balance + self.interest_due
    }

    /// Accrues one month of interest on the current balance.
    ///
    /// Returns the interest accrued.
    pub fn accrue_interest(&mut self) -> Money {
        self.interest_due = self.balance.percent_of(self.annual_rate);
        self.interest_due
    }

    /// Applies a payment: interest first, then principal.
    ///
    /// The payment is capped at [`amount_owed`](Self::amount_owed); any excess
    /// is not taken. Interest left uncovered is dropped, not capitalised.
    pub fn apply_payment(&mut self, amount: Money) -> AppliedPayment {
        let amount = amount.max(Money::ZERO).min(self.amount_owed());
        let interest = amount.min(self.interest_due);
        let principal = amount - interest;

        self.balance = self.balance.sub_clamped(principal);
        self.interest_due = Money::ZERO;

        AppliedPayment {
            amount,
            interest,
            principal,
        }
    }
}
