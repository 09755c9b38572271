//! # Debt Payoff Engine
//!
//! Simulates paying down a set of credit cards month by month under a fixed
//! budget, producing a full amortization schedule with interest and
//! principal totals.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Amounts are integer cents, rounded half-up
//!   wherever interest is computed
//! - **Pure simulation**: Each run works on its own copy of the accounts
//! - **Bounded runtime**: Schedules that never converge fail with
//!   `NonAmortizing` instead of looping
//! - **Deterministic output**: Strategy ties break on id, then input order
//!
//! ## Example
//!
//! ```no_run
//! use debt_payoff::{DebtPayoffRequest, PayoffEngine};
//! use std::io::Cursor;
//!
//! let json = r#"{
//!     "credit_cards": [
//!         {"id": "visa", "name": "Visa", "balance": "500.00",
//!          "interest_rate": "24.00", "min_payment": "25.00"}
//!     ],
//!     "strategy": "avalanche",
//!     "monthly_payment": "100.00"
//! }"#;
//! let request = DebtPayoffRequest::from_json(Cursor::new(json)).unwrap();
//! let schedule = PayoffEngine::new().calculate(&request).unwrap();
//! println!("{}", serde_json::to_string_pretty(&schedule).unwrap());
//! ```

pub mod account;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod request;
pub mod schedule;
pub mod strategy;

pub use account::{Account, AppliedPayment};
pub use config::SimulationConfig;
pub use engine::PayoffEngine;
pub use error::{AmountError, EngineError, ErrorKind, ErrorReport, Result};
pub use money::{Money, Rate};
pub use request::{CreditCardRecord, DebtPayoffRequest, PayoffInput};
pub use schedule::{
    CardPayment, CardSummary, PaymentStep, ScheduleBuilder, ScheduleResult, StrategyComparison,
};
pub use strategy::Strategy;
