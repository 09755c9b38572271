//! Payoff schedule records and their aggregation.

use crate::account::{Account, AppliedPayment};
use crate::money::Money;
use serde::Serialize;

/// One account's share of a simulated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPayment {
    pub card_id: Option<String>,
    pub card_name: String,
    pub payment: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub remaining_balance: Money,
}

impl CardPayment {
    /// Snapshots an account right after a payment was applied to it.
    pub fn record(account: &Account, applied: AppliedPayment) -> Self {
        CardPayment {
            card_id: account.id.clone(),
            card_name: account.name.clone(),
            payment: applied.amount,
            interest_paid: applied.interest,
            principal_paid: applied.principal,
            remaining_balance: account.balance,
        }
    }
}

/// The result of one simulated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentStep {
    /// 1-based month index.
    pub month: u32,

    /// Accounts active at the start of the month, in input order.
    pub card_payments: Vec<CardPayment>,

    pub total_payment: Money,

    /// Sum of all balances after this month's payments.
    pub remaining_debt: Money,
}

impl PaymentStep {
    /// Interest collected across all accounts this month.
    pub fn total_interest(&self) -> Money {
        self.card_payments.iter().map(|p| p.interest_paid).sum()
    }

    /// Principal retired across all accounts this month.
    pub fn total_principal(&self) -> Money {
        self.card_payments.iter().map(|p| p.principal_paid).sum()
    }
}

/// Lifetime totals for a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub card_id: Option<String>,
    pub card_name: String,

    /// Month in which the balance reached zero; `0` if it started at zero.
    pub payoff_month: u32,

    pub interest_paid: Money,
    pub total_paid: Money,
}

/// A completed payoff schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    pub total_months: u32,
    pub total_interest_paid: Money,
    pub total_amount_paid: Money,
    pub monthly_breakdown: Vec<PaymentStep>,

    /// One entry per input account, in input order.
    pub card_summaries: Vec<CardSummary>,
}

/// Both strategies simulated over the same accounts and budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyComparison {
    pub avalanche: ScheduleResult,
    pub snowball: ScheduleResult,

    /// Snowball interest minus avalanche interest.
    pub interest_saved: Money,

    /// Snowball months minus avalanche months.
    pub months_difference: i64,
}

impl StrategyComparison {
    pub fn new(avalanche: ScheduleResult, snowball: ScheduleResult) -> Self {
        let interest_saved = snowball.total_interest_paid - avalanche.total_interest_paid;
        let months_difference = i64::from(snowball.total_months) - i64::from(avalanche.total_months);
        StrategyComparison {
            avalanche,
            snowball,
            interest_saved,
            months_difference,
        }
    }
}

/// Accumulates monthly steps into a [`ScheduleResult`].
///
/// Totals are summed from the per-account cent amounts already recorded in
/// each step, so no rounding happens here.
#[derive(Debug)]
pub struct ScheduleBuilder {
    steps: Vec<PaymentStep>,
    summaries: Vec<CardSummary>,
    total_interest: Money,
    total_paid: Money,
}

impl ScheduleBuilder {
    /// Starts a schedule for the given accounts, indexed by input position.
    pub fn new(accounts: &[Account]) -> Self {
        let summaries = accounts
            .iter()
            .map(|account| CardSummary {
                card_id: account.id.clone(),
                card_name: account.name.clone(),
                payoff_month: 0,
                interest_paid: Money::ZERO,
                total_paid: Money::ZERO,
            })
            .collect();

        ScheduleBuilder {
            steps: Vec::new(),
            summaries,
            total_interest: Money::ZERO,
            total_paid: Money::ZERO,
        }
    }

    /// Number of months recorded so far.
    pub fn months(&self) -> u32 {
        self.steps.len() as u32
    }

    /// Records one month.
    ///
    /// `payments` pairs each account's input position with its payment.
    pub fn record(&mut self, month: u32, payments: Vec<(usize, CardPayment)>) -> &PaymentStep {
        let mut card_payments = Vec::with_capacity(payments.len());
        let mut total_payment = Money::ZERO;

        for (position, payment) in payments {
            let summary = &mut self.summaries[position];
            summary.interest_paid += payment.interest_paid;
            summary.total_paid += payment.payment;
            if payment.remaining_balance.is_zero() {
                summary.payoff_month = month;
            }

            self.total_interest += payment.interest_paid;
            total_payment += payment.payment;
            card_payments.push(payment);
        }

        self.total_paid += total_payment;

        // Accounts paid off before this month carry no balance.
        let remaining_debt = card_payments.iter().map(|p| p.remaining_balance).sum();
        self.steps.push(PaymentStep {
            month,
            card_payments,
            total_payment,
            remaining_debt,
        });

        &self.steps[self.steps.len() - 1]
    }

    /// Finishes a completed schedule.
    pub fn finish(self) -> ScheduleResult {
        ScheduleResult {
            total_months: self.months(),
            total_interest_paid: self.total_interest,
            total_amount_paid: self.total_paid,
            monthly_breakdown: self.steps,
            card_summaries: self.summaries,
        }
    }
}
