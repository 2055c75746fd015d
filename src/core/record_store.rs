//! In-memory expense record store
//!
//! This module provides the `MemoryStore`, the default [`RecordStore`]
//! implementation. It owns a group's members and expense records and is the
//! only place they are mutated; the settlement core receives snapshots.
//!
//! # Member removal
//!
//! Removing a member deletes the name from every record's payers and
//! participants. Amounts are not redistributed, so a custom split may no
//! longer add up afterwards; aggregation simply ignores the missing name.
//! A record left with no payers or no participants cannot be settled and
//! is dropped.
//!
//! # Expense names
//!
//! Payers and participants of a new or updated expense must be members.
//! They are stored with the member's own spelling, so a name typed in a
//! different case still counts towards that member's balance.

use crate::core::traits::RecordStore;
use crate::core::validator::ExpenseDraft;
use crate::types::{
    ExpenseId, ExpenseRecord, MemberName, ParticipantSplit, PayerSplit, Share, Snapshot, SplitError,
};
use chrono::{Local, Utc};
use tracing::{info, warn};

/// Display format for expense creation dates
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// In-memory record store
///
/// Keeps members and expenses in insertion order, which is also the order
/// the settlement core uses for tie-breaks.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    members: Vec<MemberName>,
    expenses: Vec<ExpenseRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an existing snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        MemoryStore {
            members: snapshot.members,
            expenses: snapshot.expenses,
        }
    }

    /// Find the stored spelling of a member name, ignoring case
    pub fn find_member(&self, name: &str) -> Option<&MemberName> {
        let wanted = name.trim().to_lowercase();
        self.members.iter().find(|m| m.to_lowercase() == wanted)
    }

    fn resolve(&self, name: &str) -> Result<MemberName, SplitError> {
        self.find_member(name)
            .cloned()
            .ok_or_else(|| SplitError::member_not_found(name.trim()))
    }

    /// Resolve a list of names, dropping repeats of the same member
    fn resolve_all(&self, names: &[MemberName]) -> Result<Vec<MemberName>, SplitError> {
        let mut resolved: Vec<MemberName> = Vec::with_capacity(names.len());
        for name in names {
            let member = self.resolve(name)?;
            if !resolved.contains(&member) {
                resolved.push(member);
            }
        }
        Ok(resolved)
    }

    /// Rewrite every payer and participant of a draft to the stored member
    /// spelling
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::MemberNotFound`] for the first name that is not
    /// a member.
    fn resolve_draft(&self, draft: ExpenseDraft) -> Result<ExpenseDraft, SplitError> {
        let payers = self.resolve_all(&draft.payers)?;

        let payer_split = match draft.payer_split {
            PayerSplit::Equal => PayerSplit::Equal,
            PayerSplit::Custom(amounts) => PayerSplit::Custom(
                amounts
                    .into_iter()
                    .map(|(name, amount)| self.resolve(&name).map(|member| (member, amount)))
                    .collect::<Result<_, SplitError>>()?,
            ),
        };

        let participants = match draft.participants {
            ParticipantSplit::Equal(names) => ParticipantSplit::Equal(self.resolve_all(&names)?),
            ParticipantSplit::Custom(shares) => ParticipantSplit::Custom(
                shares
                    .into_iter()
                    .map(|share| {
                        self.resolve(&share.name)
                            .map(|member| Share::new(member, share.amount))
                    })
                    .collect::<Result<_, SplitError>>()?,
            ),
        };

        Ok(ExpenseDraft {
            payers,
            payer_split,
            participants,
            ..draft
        })
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id() == id)
    }

    /// Next free expense id: the current epoch milliseconds, or one past
    /// the largest id already stored if that is later
    fn next_id(&self) -> ExpenseId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        match self.expenses.iter().map(ExpenseRecord::id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }
}

impl RecordStore for MemoryStore {
    fn members(&self) -> &[MemberName] {
        &self.members
    }

    fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    fn add_member(&mut self, name: &str) -> Result<(), SplitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SplitError::EmptyMemberName);
        }
        if self.find_member(name).is_some() {
            return Err(SplitError::duplicate_member(name));
        }

        self.members.push(name.to_string());
        info!(member = name, "added member");
        Ok(())
    }

    fn remove_member(&mut self, name: &str) -> Result<Vec<ExpenseId>, SplitError> {
        let stored = self
            .find_member(name)
            .cloned()
            .ok_or_else(|| SplitError::member_not_found(name))?;

        self.members.retain(|m| *m != stored);

        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(self.expenses.len());
        for expense in self.expenses.drain(..) {
            if !expense.references(&stored) {
                kept.push(expense);
                continue;
            }
            match expense.without_member(&stored) {
                Some(trimmed) => kept.push(trimmed),
                None => {
                    warn!(
                        expense = expense.id(),
                        member = %stored,
                        "dropping expense left without payers or participants"
                    );
                    dropped.push(expense.id());
                }
            }
        }
        self.expenses = kept;

        info!(member = %stored, dropped = dropped.len(), "removed member");
        Ok(dropped)
    }

    fn add_expense(&mut self, draft: ExpenseDraft) -> Result<ExpenseId, SplitError> {
        let id = self.next_id();
        let date = Local::now().format(DATE_FORMAT).to_string();
        let record = self.resolve_draft(draft)?.into_record(id, &date)?;

        self.append(record)?;
        Ok(id)
    }

    fn update_expense(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<(), SplitError> {
        let index = self
            .position(id)
            .ok_or_else(|| SplitError::expense_not_found(id))?;
        let record = self
            .resolve_draft(draft)?
            .into_record(id, self.expenses[index].date())?;

        self.expenses[index] = record;
        info!(expense = id, "updated expense");
        Ok(())
    }

    fn append(&mut self, expense: ExpenseRecord) -> Result<(), SplitError> {
        if self.position(expense.id()).is_some() {
            return Err(SplitError::duplicate_expense(expense.id()));
        }

        info!(expense = expense.id(), amount = %expense.amount(), "added expense");
        self.expenses.push(expense);
        Ok(())
    }

    fn replace(&mut self, expense: ExpenseRecord) -> Result<(), SplitError> {
        let index = self
            .position(expense.id())
            .ok_or_else(|| SplitError::expense_not_found(expense.id()))?;

        self.expenses[index] = expense;
        Ok(())
    }

    fn remove_by_id(&mut self, id: ExpenseId) -> Result<ExpenseRecord, SplitError> {
        let index = self
            .position(id)
            .ok_or_else(|| SplitError::expense_not_found(id))?;

        info!(expense = id, "removed expense");
        Ok(self.expenses.remove(index))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.members.clone(), self.expenses.clone())
    }
}
