//! I/O module
//!
//! Handles snapshot persistence and report output.
//!
//! # Components
//!
//! - `snapshot` - JSON snapshot reading and writing
//! - `csv_format` - CSV balance and transaction reports
//! - `export` - Plain-text settlement summary
//! - `report` - Report format selection

pub mod csv_format;
pub mod export;
pub mod report;
pub mod snapshot;

pub use csv_format::{write_balances_csv, write_transactions_csv};
pub use export::{format_settlement, write_summary};
pub use report::{write_report, ReportKind};
pub use snapshot::{parse_snapshot, read_snapshot, read_snapshot_or_default, save_snapshot, write_snapshot};
