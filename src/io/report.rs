//! Report selection
//!
//! Routes settled groups to one of the output formats.

use crate::io::csv_format::{write_balances_csv, write_transactions_csv};
use crate::io::export::write_summary;
use crate::types::{GroupSettlement, SplitError};
use clap::ValueEnum;
use std::io::Write;

/// Available report formats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Settlement transfers as CSV
    #[default]
    Transactions,
    /// Per-member totals as CSV
    Balances,
    /// Plain-text summary for sharing
    Summary,
}

/// Write the selected report for every group
pub fn write_report(
    groups: &[GroupSettlement],
    kind: ReportKind,
    output: &mut dyn Write,
) -> Result<(), SplitError> {
    match kind {
        ReportKind::Transactions => write_transactions_csv(groups, output),
        ReportKind::Balances => write_balances_csv(groups, output),
        ReportKind::Summary => write_summary(groups, output),
    }
}
