//! Balance aggregation
//!
//! Computes, for every member, how much they paid and how much they owe
//! across all expense records, and the resulting net balance.
//!
//! # Precision
//!
//! Equal splits are accumulated as exact `Decimal` quotients and are never
//! rounded per expense. Rounding happens once per output column in
//! [`round_column`], and each balance is derived from the unrounded totals
//! before that rounding. Rounding each expense's per-head amount first and
//! summing afterwards accumulates error over many small expenses.
//!
//! # Dangling references
//!
//! A record may still name a member who has since been removed. Such names
//! are skipped silently; the record's other contributions still count.

use crate::core::rounding::round_column;
use crate::types::{ExpenseId, ExpenseRecord, MemberName, ParticipantSplit, PayerSplit, PersonSummary};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Per-member summaries in member order
///
/// Behaves as a name-keyed mapping while keeping the member order stable,
/// which the simplifier relies on for deterministic output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BalanceSheet {
    summaries: Vec<PersonSummary>,
}

impl BalanceSheet {
    /// Look up a member's summary by exact name
    pub fn get(&self, name: &str) -> Option<&PersonSummary> {
        self.summaries.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonSummary> {
        self.summaries.iter()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn as_slice(&self) -> &[PersonSummary] {
        &self.summaries
    }

    pub fn into_vec(self) -> Vec<PersonSummary> {
        self.summaries
    }
}

/// Unrounded running totals for one member
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    paid: Decimal,
    share: Decimal,
}

/// Aggregate paid and owed totals for every member
///
/// Produces one summary per entry in `members`, in the same order. Names
/// listed twice are summarized once, at their first position. Expenses are
/// applied in sequence order; the totals do not depend on that order.
///
/// # Panics
///
/// In debug builds, panics if an expense has no payers or no participants.
/// [`ExpenseRecord::new`] makes such records unconstructible.
pub fn aggregate(members: &[MemberName], expenses: &[ExpenseRecord]) -> BalanceSheet {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(members.len());
    let mut names: Vec<&str> = Vec::with_capacity(members.len());
    for member in members {
        if !index.contains_key(member.as_str()) {
            index.insert(member.as_str(), names.len());
            names.push(member.as_str());
        }
    }

    let mut totals = vec![Accumulator::default(); names.len()];

    for expense in expenses {
        apply_expense(expense, &index, &mut totals);
    }

    let paid = round_column(&totals.iter().map(|t| t.paid).collect::<Vec<_>>());
    let share = round_column(&totals.iter().map(|t| t.share).collect::<Vec<_>>());
    let balance = round_column(&totals.iter().map(|t| t.paid - t.share).collect::<Vec<_>>());

    let summaries = names
        .iter()
        .enumerate()
        .map(|(i, name)| PersonSummary {
            name: name.to_string(),
            total_paid: paid[i],
            total_share: share[i],
            balance: balance[i],
        })
        .collect();

    debug!(
        members = names.len(),
        expenses = expenses.len(),
        "aggregated balances"
    );

    BalanceSheet { summaries }
}

/// Credit one expense's payer and participant amounts
///
/// Plain addition is safe: records bound every amount by [`crate::types::MAX_AMOUNT`].
fn apply_expense(expense: &ExpenseRecord, index: &HashMap<&str, usize>, totals: &mut [Accumulator]) {
    let amount = expense.amount();
    let payers = expense.payers();

    debug_assert!(!payers.is_empty(), "expense {} has no payers", expense.id());
    debug_assert!(
        !expense.participants().is_empty(),
        "expense {} has no participants",
        expense.id()
    );

    match expense.payer_split() {
        PayerSplit::Custom(amounts) if payers.len() > 1 => {
            for payer in payers {
                let paid = amounts.get(payer).copied().unwrap_or(Decimal::ZERO);
                if let Some(acc) = member_slot(index, totals, payer, expense.id()) {
                    acc.paid += paid;
                }
            }
        }
        PayerSplit::Custom(_) | PayerSplit::Equal => {
            if !payers.is_empty() {
                let per_payer = amount / Decimal::from(payers.len());
                for payer in payers {
                    if let Some(acc) = member_slot(index, totals, payer, expense.id()) {
                        acc.paid += per_payer;
                    }
                }
            }
        }
    }

    match expense.participants() {
        ParticipantSplit::Equal(names) => {
            if !names.is_empty() {
                let per_participant = amount / Decimal::from(names.len());
                for name in names {
                    if let Some(acc) = member_slot(index, totals, name, expense.id()) {
                        acc.share += per_participant;
                    }
                }
            }
        }
        ParticipantSplit::Custom(shares) => {
            for share in shares {
                if let Some(acc) = member_slot(index, totals, &share.name, expense.id()) {
                    acc.share += share.amount;
                }
            }
        }
    }
}

fn member_slot<'a>(
    index: &HashMap<&str, usize>,
    totals: &'a mut [Accumulator],
    name: &str,
    expense: ExpenseId,
) -> Option<&'a mut Accumulator> {
    match index.get(name) {
        Some(&i) => Some(&mut totals[i]),
        None => {
            debug!(expense, member = name, "skipping unknown member");
            None
        }
    }
}
