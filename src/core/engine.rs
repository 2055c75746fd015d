//! Settlement engine
//!
//! This module provides the SettlementEngine that turns a group's members and
//! expenses into a complete [`Settlement`] by coordinating the aggregator and
//! the simplifier.
//!
//! The engine is stateless: every call recomputes from the records it is
//! given, so the result is a pure function of the snapshot.

use crate::core::aggregator::aggregate;
use crate::core::simplifier::simplify;
use crate::types::{ExpenseRecord, MemberName, Settlement, Snapshot};
use rust_decimal::Decimal;
use tracing::debug;

/// Settlement engine
///
/// Runs aggregation then simplification and adds the group's total expense.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementEngine;

impl SettlementEngine {
    /// Create a new SettlementEngine
    pub fn new() -> Self {
        SettlementEngine
    }

    /// Settle a group
    ///
    /// # Arguments
    ///
    /// * `members` - Group members; their order fixes summary order and the
    ///   simplifier's pairing order
    /// * `expenses` - Expense records in sequence order
    ///
    /// # Returns
    ///
    /// The per-member summaries, the transfers that settle them, and the sum
    /// of all expense amounts.
    pub fn settle(&self, members: &[MemberName], expenses: &[ExpenseRecord]) -> Settlement {
        let sheet = aggregate(members, expenses);
        let transactions = simplify(sheet.as_slice());
        let total_expense: Decimal = expenses.iter().map(ExpenseRecord::amount).sum();

        debug!(
            expenses = expenses.len(),
            %total_expense,
            transactions = transactions.len(),
            "settled group"
        );

        Settlement {
            total_expense,
            summaries: sheet.into_vec(),
            transactions,
        }
    }

    /// Settle a whole snapshot
    pub fn settle_snapshot(&self, snapshot: &Snapshot) -> Settlement {
        self.settle(&snapshot.members, &snapshot.expenses)
    }
}
