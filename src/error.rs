//! Error types for the debt payoff engine.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while loading input or running a simulation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or out-of-range request data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The monthly budget does not cover the sum of minimum payments
    #[error("Monthly payment must be at least {required} (got {provided})")]
    InsufficientBudget { required: String, provided: String },

    /// The schedule never reaches a zero balance
    #[error("Payment insufficient to amortize debt: {0}")]
    NonAmortizing(String),

    /// Missing command-line arguments
    #[error(
        "Missing input argument. Usage: debt-payoff [--compare] <request.json> | <cards.csv> <avalanche|snowball> <monthly_payment>"
    )]
    MissingArgument,
}

impl EngineError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Io(_) => ErrorKind::Io,
            EngineError::Json(_)
            | EngineError::InvalidInput(_)
            | EngineError::MissingArgument => ErrorKind::InvalidInput,
            EngineError::InsufficientBudget { .. } => ErrorKind::InsufficientBudget,
            EngineError::NonAmortizing(_) => ErrorKind::NonAmortizing,
        }
    }

    /// Builds the structured report handed to callers.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    InsufficientBudget,
    NonAmortizing,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::InsufficientBudget => "insufficient_budget",
            ErrorKind::NonAmortizing => "non_amortizing",
            ErrorKind::Io => "io",
        };
        f.write_str(name)
    }
}

/// Serializable error body: a kind plus a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

/// Reasons a monetary amount fails to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("'{0}' is not a valid decimal amount")]
    Malformed(String),

    #[error("amount {0} must not be negative")]
    Negative(String),

    #[error("amount {0} is out of range")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = EngineError::InsufficientBudget {
            required: "65.00".to_string(),
            provided: "60.00".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InsufficientBudget);
        assert_eq!(
            err.to_string(),
            "Monthly payment must be at least 65.00 (got 60.00)"
        );

        let err = EngineError::NonAmortizing("horizon exceeded".to_string());
        assert_eq!(err.kind(), ErrorKind::NonAmortizing);

        assert_eq!(EngineError::MissingArgument.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_report_serializes_kind_in_snake_case() {
        let report = EngineError::InvalidInput("empty card list".to_string()).report();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"invalid_input","message":"Invalid input: empty card list"}"#
        );
    }
}
