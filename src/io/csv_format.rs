//! CSV report output
//!
//! This module centralizes the CSV report formats:
//! - Balances: one row per group member (`group,member,paid,share,balance`)
//! - Transactions: one row per settlement transfer (`group,from,to,amount`)
//!
//! Rows follow group order, then member order (or transfer order), so the
//! output is byte-for-byte deterministic. Amounts are whole units.
//!
//! All functions write to a caller-supplied writer for easy testing.

use crate::types::{GroupSettlement, SplitError};
use csv::Writer;
use rust_decimal::Decimal;
use std::io::Write;

/// Whole units, with negative zero printed as `0`
pub(crate) fn units(amount: Decimal) -> String {
    format!("{:.0}", amount.normalize())
}

/// Write every member's totals as CSV
///
/// # Arguments
///
/// * `groups` - Settled groups, in output order
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Errors
///
/// Returns [`SplitError::OutputError`] if a write fails.
pub fn write_balances_csv(
    groups: &[GroupSettlement],
    output: &mut dyn Write,
) -> Result<(), SplitError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["group", "member", "paid", "share", "balance"])?;

    for group in groups {
        for summary in &group.settlement.summaries {
            writer.write_record(&[
                group.group.clone(),
                summary.name.clone(),
                units(summary.total_paid),
                units(summary.total_share),
                units(summary.balance),
            ])?;
        }
    }

    writer
        .flush()
        .map_err(|e| SplitError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

/// Write every settlement transfer as CSV
///
/// A group that is already settled contributes no rows.
///
/// # Errors
///
/// Returns [`SplitError::OutputError`] if a write fails.
pub fn write_transactions_csv(
    groups: &[GroupSettlement],
    output: &mut dyn Write,
) -> Result<(), SplitError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["group", "from", "to", "amount"])?;

    for group in groups {
        for tx in &group.settlement.transactions {
            writer.write_record(&[
                group.group.clone(),
                tx.from.clone(),
                tx.to.clone(),
                units(tx.amount),
            ])?;
        }
    }

    writer
        .flush()
        .map_err(|e| SplitError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PersonSummary, Settlement, Transaction};
    use rstest::rstest;

    fn person(name: &str, paid: i64, share: i64, balance: i64) -> PersonSummary {
        PersonSummary {
            name: name.to_string(),
            total_paid: Decimal::from(paid),
            total_share: Decimal::from(share),
            balance: Decimal::from(balance),
        }
    }

    fn group(name: &str, summaries: Vec<PersonSummary>, transactions: Vec<Transaction>) -> GroupSettlement {
        let total_expense = summaries.iter().map(|s| s.total_paid).sum();
        GroupSettlement {
            group: name.to_string(),
            settlement: Settlement {
                total_expense,
                summaries,
                transactions,
            },
        }
    }

    fn dinner() -> GroupSettlement {
        group(
            "dinner",
            vec![person("A", 100_000, 50_000, 50_000), person("B", 0, 50_000, -50_000)],
            vec![Transaction {
                from: "B".to_string(),
                to: "A".to_string(),
                amount: Decimal::from(50_000),
            }],
        )
    }

    #[rstest]
    #[case::single_group(
        vec![dinner()],
        "group,member,paid,share,balance\ndinner,A,100000,50000,50000\ndinner,B,0,50000,-50000\n"
    )]
    #[case::keeps_group_order(
        vec![group("z", vec![person("C", 0, 0, 0)], vec![]), dinner()],
        "group,member,paid,share,balance\nz,C,0,0,0\ndinner,A,100000,50000,50000\ndinner,B,0,50000,-50000\n"
    )]
    #[case::empty(vec![], "group,member,paid,share,balance\n")]
    fn test_write_balances_csv(#[case] groups: Vec<GroupSettlement>, #[case] expected: &str) {
        let mut output = Vec::new();
        write_balances_csv(&groups, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[rstest]
    #[case::single_transfer(vec![dinner()], "group,from,to,amount\ndinner,B,A,50000\n")]
    #[case::settled_group(
        vec![group("even", vec![person("A", 10, 10, 0)], vec![])],
        "group,from,to,amount\n"
    )]
    fn test_write_transactions_csv(#[case] groups: Vec<GroupSettlement>, #[case] expected: &str) {
        let mut output = Vec::new();
        write_transactions_csv(&groups, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let groups = vec![group("trip", vec![person("Lan, Jr", 0, 0, 0)], vec![])];
        let mut output = Vec::new();
        write_balances_csv(&groups, &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("trip,\"Lan, Jr\",0,0,0"));
    }
}
