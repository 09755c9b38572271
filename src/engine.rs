//! Core debt payoff simulation engine.
//!
//! Simulates month by month: interest accrues on every active account, each
//! account receives its minimum payment, and whatever the budget has left
//! goes to the single account chosen by the allocation strategy. The run ends
//! when every balance is zero, or fails if the debt can never be repaid.

use crate::account::Account;
use crate::config::SimulationConfig;
use crate::error::{EngineError, Result};
use crate::money::Money;
use crate::request::DebtPayoffRequest;
use crate::schedule::{CardPayment, ScheduleBuilder, ScheduleResult, StrategyComparison};
use crate::strategy::Strategy;
use log::{debug, info, warn};

/// The debt payoff engine.
///
/// Holds only configuration; every run works on its own copy of the
/// accounts, so one engine can serve any number of concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct PayoffEngine {
    config: SimulationConfig,
}

impl PayoffEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: SimulationConfig) -> Self {
        PayoffEngine { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Validates a request and simulates it with the requested strategy.
    pub fn calculate(&self, request: &DebtPayoffRequest) -> Result<ScheduleResult> {
        let input = request.parse()?;
        self.simulate(&input.accounts, input.strategy, input.monthly_payment)
    }

    /// Validates a request and simulates it under both strategies.
    ///
    /// The strategy named in the request is ignored.
    pub fn compare(&self, request: &DebtPayoffRequest) -> Result<StrategyComparison> {
        let input = request.parse()?;
        let avalanche = self.simulate(&input.accounts, Strategy::Avalanche, input.monthly_payment)?;
        let snowball = self.simulate(&input.accounts, Strategy::Snowball, input.monthly_payment)?;
        Ok(StrategyComparison::new(avalanche, snowball))
    }

    /// Runs a payoff simulation over a snapshot of accounts.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInput`] if `accounts` is empty, or
    ///   `monthly_payment` is negative or above [`Money::MAX_INPUT`]
    /// - [`EngineError::InsufficientBudget`] if `monthly_payment` is below the
    ///   sum of minimum payments on accounts with a balance
    /// - [`EngineError::NonAmortizing`] if the debt is not repaid within
    ///   [`SimulationConfig::max_months`], or a month retires no principal
    pub fn simulate(
        &self,
        accounts: &[Account],
        strategy: Strategy,
        monthly_payment: Money,
    ) -> Result<ScheduleResult> {
        let simulation = Simulation::start(accounts, strategy, monthly_payment, self.config)?;
        match simulation.run() {
            Ok(result) => {
                info!(
                    "Debt repaid in {} months with {} strategy: interest {}, total paid {}",
                    result.total_months, strategy, result.total_interest_paid, result.total_amount_paid
                );
                Ok(result)
            }
            Err(e) => {
                warn!("Simulation failed with {} strategy: {}", strategy, e);
                Err(e)
            }
        }
    }
}

/// Outcome of a single simulated month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Running,
    Completed,
}

/// State of one simulation run.
struct Simulation {
    /// Private copy of the caller's accounts, indexed by input position.
    accounts: Vec<Account>,

    /// Positions of accounts with a balance, in input order.
    active: Vec<usize>,

    strategy: Strategy,
    monthly_payment: Money,
    config: SimulationConfig,
    schedule: ScheduleBuilder,
}

impl Simulation {
    /// Validates the input and prepares the first month.
    fn start(
        accounts: &[Account],
        strategy: Strategy,
        monthly_payment: Money,
        config: SimulationConfig,
    ) -> Result<Self> {
        if accounts.is_empty() {
            return Err(EngineError::InvalidInput(
                "at least one credit card is required".to_string(),
            ));
        }
        if monthly_payment < Money::ZERO || monthly_payment > Money::MAX_INPUT {
            return Err(EngineError::InvalidInput(format!(
                "monthly payment {} is outside 0.00..={}",
                monthly_payment,
                Money::MAX_INPUT
            )));
        }

        let accounts = accounts.to_vec();
        let active: Vec<usize> = (0..accounts.len())
            .filter(|&i| !accounts[i].is_paid_off())
            .collect();

        let required: Money = active.iter().map(|&i| accounts[i].min_payment).sum();
        if monthly_payment < required {
            return Err(EngineError::InsufficientBudget {
                required: required.to_string(),
                provided: monthly_payment.to_string(),
            });
        }

        debug!(
            "Starting {} simulation over {} active of {} accounts, budget {}, minimums {}",
            strategy,
            active.len(),
            accounts.len(),
            monthly_payment,
            required
        );

        let schedule = ScheduleBuilder::new(&accounts);
        Ok(Simulation {
            accounts,
            active,
            strategy,
            monthly_payment,
            config,
            schedule,
        })
    }

    /// Steps until every account is paid off.
    fn run(mut self) -> Result<ScheduleResult> {
        while self.step()? == Progress::Running {}
        Ok(self.schedule.finish())
    }

    fn remaining_debt(&self) -> Money {
        self.active.iter().map(|&i| self.accounts[i].balance).sum()
    }

    /// Simulates one month.
    fn step(&mut self) -> Result<Progress> {
        if self.active.is_empty() {
            return Ok(Progress::Completed);
        }

        if self.schedule.months() >= self.config.max_months {
            return Err(EngineError::NonAmortizing(format!(
                "{} still owed after {} months",
                self.remaining_debt(),
                self.config.max_months
            )));
        }

        let month = self.schedule.months() + 1;

        for &i in &self.active {
            self.accounts[i].accrue_interest();
        }

        let minimums: Money = self
            .active
            .iter()
            .map(|&i| self.accounts[i].min_payment)
            .sum();
        let extra = self.monthly_payment.sub_clamped(minimums);
        let target = self.strategy.target(&self.accounts, &self.active);

        if let Some(t) = target {
            debug!(
                "Month {}: extra {} goes to '{}'",
                month, extra, self.accounts[t].name
            );
        }

        let mut payments = Vec::with_capacity(self.active.len());
        for &i in &self.active {
            let account = &mut self.accounts[i];
            let mut amount = account.min_payment;
            if target == Some(i) {
                amount += extra;
            }

            let applied = account.apply_payment(amount);
            if account.is_paid_off() {
                debug!("Month {}: '{}' paid off", month, account.name);
            }
            payments.push((i, CardPayment::record(account, applied)));
        }

        let step = self.schedule.record(month, payments);

        // Balances are unchanged, so every later month would repeat this one.
        if step.total_principal().is_zero() {
            return Err(EngineError::NonAmortizing(format!(
                "month {} repaid no principal: interest absorbs the entire payment of {}",
                month, step.total_payment
            )));
        }

        let accounts = &self.accounts;
        self.active.retain(|&i| !accounts[i].is_paid_off());

        if self.active.is_empty() {
            Ok(Progress::Completed)
        } else {
            Ok(Progress::Running)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::money::Rate;
    use crate::request::CreditCardRecord;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn card(id: &str, balance: &str, apr: &str, min: &str) -> Account {
        Account::new(
            Some(id.to_string()),
            id,
            money(balance),
            Rate::parse_non_negative(apr).unwrap(),
            money(min),
        )
        .unwrap()
    }

    fn two_cards() -> Vec<Account> {
        vec![
            card("a", "500.00", "24.00", "25.00"),
            card("b", "2000.00", "12.00", "40.00"),
        ]
    }

    #[test]
    fn test_single_card_pays_down_to_zero() {
        let engine = PayoffEngine::new();
        let result = engine
            .simulate(
                &[card("a", "1000.00", "12.00", "50.00")],
                Strategy::Avalanche,
                money("50.00"),
            )
            .unwrap();

        assert!(result.total_months > 1);
        let first = &result.monthly_breakdown[0];
        assert_eq!(first.card_payments[0].interest_paid.to_string(), "10.00");
        assert_eq!(first.card_payments[0].principal_paid.to_string(), "40.00");
        assert_eq!(first.remaining_debt.to_string(), "960.00");

        let last = result.monthly_breakdown.last().unwrap();
        assert_eq!(last.month, result.total_months);
        assert_eq!(last.remaining_debt, Money::ZERO);
    }

    #[test]
    fn test_avalanche_month_one_targets_highest_rate() {
        let engine = PayoffEngine::new();
        let result = engine
            .simulate(&two_cards(), Strategy::Avalanche, money("100.00"))
            .unwrap();

        let first = &result.monthly_breakdown[0];
        let a = &first.card_payments[0];
        let b = &first.card_payments[1];

        // extra = 100.00 - 65.00 = 35.00, all of it to card a
        assert_eq!(a.payment.to_string(), "60.00");
        assert_eq!(a.interest_paid.to_string(), "10.00");
        assert_eq!(a.remaining_balance.to_string(), "450.00");
        assert_eq!(b.payment.to_string(), "40.00");
        assert_eq!(b.interest_paid.to_string(), "20.00");
        assert_eq!(b.remaining_balance.to_string(), "1980.00");
        assert_eq!(first.total_payment.to_string(), "100.00");
    }

    #[test]
    fn test_snowball_month_one_targets_lowest_balance() {
        let engine = PayoffEngine::new();
        let cards = vec![
            card("a", "2000.00", "24.00", "40.00"),
            card("b", "300.00", "12.00", "25.00"),
        ];
        let result = engine
            .simulate(&cards, Strategy::Snowball, money("100.00"))
            .unwrap();

        let b = &result.monthly_breakdown[0].card_payments[1];
        assert_eq!(b.payment.to_string(), "60.00");
    }

    #[test]
    fn test_insufficient_budget_is_rejected() {
        let err = PayoffEngine::new()
            .simulate(&two_cards(), Strategy::Avalanche, money("60.00"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InsufficientBudget);
        assert!(err.to_string().contains("65.00"));
    }

    #[test]
    fn test_paid_off_cards_do_not_count_toward_minimums() {
        let cards = vec![
            card("a", "0.00", "24.00", "500.00"),
            card("b", "100.00", "0", "10.00"),
        ];
        let result = PayoffEngine::new()
            .simulate(&cards, Strategy::Avalanche, money("10.00"))
            .unwrap();

        assert_eq!(result.total_months, 10);
        assert_eq!(result.monthly_breakdown[0].card_payments.len(), 1);
        assert_eq!(result.card_summaries[0].payoff_month, 0);
        assert_eq!(result.card_summaries[1].payoff_month, 10);
    }

    #[test]
    fn test_all_zero_balances_complete_immediately() {
        let result = PayoffEngine::new()
            .simulate(
                &[card("a", "0", "10", "0")],
                Strategy::Snowball,
                Money::ZERO,
            )
            .unwrap();

        assert_eq!(result.total_months, 0);
        assert!(result.monthly_breakdown.is_empty());
        assert_eq!(result.total_amount_paid, Money::ZERO);
    }

    #[test]
    fn test_empty_accounts_are_invalid() {
        let err = PayoffEngine::new()
            .simulate(&[], Strategy::Avalanche, money("100"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_interest_only_payment_fails_fast() {
        // 1000.00 at 24% accrues exactly 20.00 a month
        let err = PayoffEngine::new()
            .simulate(
                &[card("a", "1000.00", "24", "20.00")],
                Strategy::Avalanche,
                money("20.00"),
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NonAmortizing);
        assert!(err.to_string().contains("month 1"));
    }

    #[test]
    fn test_horizon_cap_fails_slow_schedules() {
        let engine = PayoffEngine::with_config(SimulationConfig::default().with_max_months(12));
        let err = engine
            .simulate(
                &[card("a", "1000.00", "0", "10.00")],
                Strategy::Avalanche,
                money("10.00"),
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NonAmortizing);
        assert!(err.to_string().contains("880.00 still owed after 12 months"));
    }

    #[test]
    fn test_capped_target_payment_is_not_redirected() {
        let cards = vec![
            card("a", "10.00", "0", "5.00"),
            card("b", "1000.00", "0", "5.00"),
        ];
        let result = PayoffEngine::new()
            .simulate(&cards, Strategy::Snowball, money("100.00"))
            .unwrap();

        let first = &result.monthly_breakdown[0];
        assert_eq!(first.card_payments[0].payment.to_string(), "10.00");
        assert_eq!(first.card_payments[1].payment.to_string(), "5.00");
        assert_eq!(first.total_payment.to_string(), "15.00");
    }

    #[test]
    fn test_out_of_range_budget_is_invalid() {
        let engine = PayoffEngine::new();
        for budget in [Money::from_cents(-1), Money::from_cents(i64::MAX)] {
            let err = engine
                .simulate(&two_cards(), Strategy::Avalanche, budget)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn test_largest_inputs_do_not_overflow() {
        let accounts = vec![card("a", "100000000000.00", "10000", "0")];
        let err = PayoffEngine::new()
            .simulate(&accounts, Strategy::Avalanche, Money::MAX_INPUT)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonAmortizing);
    }

    fn request(strategy: &str, budget: &str) -> DebtPayoffRequest {
        let record = |id: &str, balance: &str, apr: &str, min: &str| CreditCardRecord {
            id: Some(id.to_string()),
            name: id.to_string(),
            balance: balance.to_string(),
            interest_rate: apr.to_string(),
            min_payment: min.to_string(),
        };
        DebtPayoffRequest {
            credit_cards: vec![
                record("high", "3000.00", "25.00", "60.00"),
                record("low", "800.00", "10.00", "20.00"),
                record("mid", "1500.00", "18.00", "35.00"),
            ],
            strategy: strategy.to_string(),
            monthly_payment: budget.to_string(),
        }
    }

    #[test]
    fn test_compare_reports_interest_and_months_saved() {
        // The requested strategy does not affect a comparison.
        let comparison = PayoffEngine::new()
            .compare(&request("snowball", "300.00"))
            .unwrap();

        assert_eq!(comparison.avalanche.total_months, 22);
        assert_eq!(comparison.avalanche.total_interest_paid.to_string(), "990.71");
        assert_eq!(comparison.snowball.total_months, 23);
        assert_eq!(comparison.snowball.total_interest_paid.to_string(), "1246.83");
        assert_eq!(comparison.interest_saved.to_string(), "256.12");
        assert_eq!(comparison.months_difference, 1);
    }

    #[test]
    fn test_compare_propagates_simulation_errors() {
        let err = PayoffEngine::new()
            .compare(&request("avalanche", "114.99"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientBudget);

        let mut empty = request("avalanche", "100.00");
        empty.credit_cards.clear();
        let err = PayoffEngine::new().compare(&empty).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
