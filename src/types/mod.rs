//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `expense`: Expense records, split variants and identifiers
//! - `summary`: Per-member summaries and settlement transfers
//! - `snapshot`: The full state of one group
//! - `error`: Error types for the settlement engine

pub mod error;
pub mod expense;
pub mod snapshot;
pub mod summary;

pub use error::SplitError;
pub use expense::{ExpenseId, MAX_AMOUNT, ExpenseRecord, MemberName, ParticipantSplit, PayerSplit, Share};
pub use snapshot::Snapshot;
pub use summary::{GroupSettlement, PersonSummary, Settlement, Transaction};
