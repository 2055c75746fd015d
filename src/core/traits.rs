//! Core traits for the expense record store
//!
//! The settlement core only ever reads an immutable snapshot; all mutation
//! goes through this narrow interface, so the store can be swapped for a
//! persistent implementation without touching aggregation or simplification.

use crate::core::validator::ExpenseDraft;
use crate::types::{ExpenseId, ExpenseRecord, MemberName, Snapshot, SplitError};

/// Trait for owning and mutating a group's members and expenses
///
/// Records are append/remove only, apart from whole-record replacement by id.
pub trait RecordStore {
    /// Members in insertion order
    fn members(&self) -> &[MemberName];

    /// Expenses in insertion order
    fn expenses(&self) -> &[ExpenseRecord];

    /// Add a member; names are unique ignoring case
    fn add_member(&mut self, name: &str) -> Result<(), SplitError>;

    /// Remove a member and cascade into every expense
    ///
    /// Returns the ids of expenses dropped because they lost their last
    /// payer or last participant.
    fn remove_member(&mut self, name: &str) -> Result<Vec<ExpenseId>, SplitError>;

    /// Validate a draft and store it under a freshly assigned id
    ///
    /// Every payer and participant must name a member (ignoring case); the
    /// record stores the member's own spelling.
    fn add_expense(&mut self, draft: ExpenseDraft) -> Result<ExpenseId, SplitError>;

    /// Validate a draft and replace an existing expense, keeping its id and date
    ///
    /// Names are resolved the same way as in [`RecordStore::add_expense`].
    fn update_expense(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<(), SplitError>;

    /// Store an already-built record
    fn append(&mut self, expense: ExpenseRecord) -> Result<(), SplitError>;

    /// Replace the record with the same id
    fn replace(&mut self, expense: ExpenseRecord) -> Result<(), SplitError>;

    /// Remove and return the record with this id
    fn remove_by_id(&mut self, id: ExpenseId) -> Result<ExpenseRecord, SplitError>;

    /// Copy of the current state for the settlement core
    fn snapshot(&self) -> Snapshot;
}
