//! Debt Payoff CLI
//!
//! Reads a payoff request and writes the resulting schedule as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- request.json > schedule.json
//! cargo run -- cards.csv avalanche 450.00 > schedule.json
//! cargo run -- --compare request.json > comparison.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `DEBT_PAYOFF_MAX_MONTHS`: Longest schedule to simulate (default 1200)

use debt_payoff::{DebtPayoffRequest, EngineError, PayoffEngine, Result, SimulationConfig};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error ({}): {}", e.kind(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let compare = match args.iter().position(|a| a == "--compare") {
        Some(idx) => {
            args.remove(idx);
            true
        }
        None => false,
    };

    let request = load_request(&args)?;
    let engine = PayoffEngine::with_config(SimulationConfig::from_env());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if compare {
        serde_json::to_writer_pretty(&mut handle, &engine.compare(&request)?)?;
    } else {
        serde_json::to_writer_pretty(&mut handle, &engine.calculate(&request)?)?;
    }
    writeln!(handle)?;

    Ok(())
}

/// Loads a JSON request, or a CSV card list followed by strategy and budget.
fn load_request(args: &[String]) -> Result<DebtPayoffRequest> {
    let input_path = args.first().ok_or(EngineError::MissingArgument)?;
    let reader = BufReader::new(File::open(input_path)?);

    let is_csv = Path::new(input_path)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        match (args.get(1), args.get(2)) {
            (Some(strategy), Some(monthly_payment)) => {
                DebtPayoffRequest::from_csv(reader, strategy, monthly_payment)
            }
            _ => Err(EngineError::MissingArgument),
        }
    } else {
        DebtPayoffRequest::from_json(reader)
    }
}
