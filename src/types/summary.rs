//! Settlement output types
//!
//! Per-member summaries and the transfers that settle them. These values are
//! recomputed on every query and never persisted.

use crate::types::expense::MemberName;
use rust_decimal::Decimal;
use serde::Serialize;

/// A member's settled position across all expenses
///
/// All fields are whole currency units. `balance` is positive when the
/// member is owed money and negative when the member owes money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub name: MemberName,
    pub total_paid: Decimal,
    pub total_share: Decimal,
    pub balance: Decimal,
}

impl PersonSummary {
    /// Create a summary with zero totals
    pub fn new(name: impl Into<MemberName>) -> Self {
        PersonSummary {
            name: name.into(),
            total_paid: Decimal::ZERO,
            total_share: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}

/// A single transfer in a settlement plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// The debtor
    pub from: MemberName,

    /// The creditor
    pub to: MemberName,

    /// Whole units to transfer (always positive)
    pub amount: Decimal,
}

/// Complete result of settling a group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Sum of all expense amounts
    pub total_expense: Decimal,

    /// One summary per member, in member order
    pub summaries: Vec<PersonSummary>,

    /// Transfers that bring every balance to zero
    pub transactions: Vec<Transaction>,
}

/// A settlement tagged with the group it belongs to
///
/// Used by the batch strategies, where a group is one snapshot file.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSettlement {
    pub group: String,
    pub settlement: Settlement,
}
