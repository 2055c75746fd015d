//! Settlement engine CLI
//!
//! Command-line interface for recording group expenses and settling them.
//!
//! # Usage
//!
//! ```bash
//! settlement-engine add-member dinner.json Hào
//! settlement-engine add-expense dinner.json --name Dinner --amount 100000 --payer Hào --participant Hào --participant Minh
//! settlement-engine settle dinner.json > transfers.csv
//! settlement-engine settle --report balances --strategy async --max-concurrent 4 groups/*.json
//! ```
//!
//! Reports go to stdout; logs go to stderr and are filtered by `RUST_LOG`
//! (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed snapshot, rejected expense, etc.)

use settlement_engine::cli;
use settlement_engine::types::SplitError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(args.command, &mut output) {
        match e {
            SplitError::Rejected { issues } => {
                eprintln!("Error: expense rejected");
                for issue in issues {
                    eprintln!("  - {}", issue);
                }
            }
            other => eprintln!("Error: {}", other),
        }
        process::exit(1);
    }
}
