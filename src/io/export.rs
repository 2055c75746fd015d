//! Plain-text settlement summary
//!
//! A shareable text block per group: the total spent, then who pays whom.
//! This is a projection of a [`Settlement`]; nothing is recomputed here.
//!
//! ```text
//! Group: dinner
//! Total expense: 100000
//! B -> A: 50000
//! ```

use crate::io::csv_format::units;
use crate::types::{GroupSettlement, Settlement, SplitError};
use std::fmt::Write as _;
use std::io::Write;

/// Line emitted when a group needs no transfers
pub const SETTLED_LINE: &str = "Everyone is settled up";

/// Render one settlement as text, without a group header
pub fn format_settlement(settlement: &Settlement) -> String {
    let mut text = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(text, "Total expense: {}", units(settlement.total_expense));

    if settlement.transactions.is_empty() {
        let _ = writeln!(text, "{}", SETTLED_LINE);
    }
    for tx in &settlement.transactions {
        let _ = writeln!(text, "{} -> {}: {}", tx.from, tx.to, units(tx.amount));
    }

    text
}

/// Write the summary of every group, separated by blank lines
///
/// # Errors
///
/// Returns [`SplitError::OutputError`] if a write fails.
pub fn write_summary(groups: &[GroupSettlement], output: &mut dyn Write) -> Result<(), SplitError> {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            writeln!(output).map_err(|e| SplitError::output(e.to_string()))?;
        }
        write!(
            output,
            "Group: {}\n{}",
            group.group,
            format_settlement(&group.settlement)
        )
        .map_err(|e| SplitError::output(e.to_string()))?;
    }

    output
        .flush()
        .map_err(|e| SplitError::output(format!("Failed to flush output: {}", e)))
}
