//! Group Expense Settlement Library
//! # Overview
//!
//! This library records shared expenses for a group of people and works out
//! who owes whom, with both a sequential and a concurrent strategy for
//! settling many groups at once.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (ExpenseRecord, PersonSummary, Transaction, etc.)
//! - [`cli`] - CLI arguments parsing and subcommand dispatch
//! - [`core`] - Business logic components:
//!   - [`core::validator`] - Expense input validation
//!   - [`core::record_store`] - Member and expense storage
//!   - [`core::aggregator`] - Per-member paid/share/balance totals
//!   - [`core::simplifier`] - Greedy debt simplification
//!   - [`core::engine`] - Settlement orchestration
//! - [`io`] - JSON snapshots and CSV/text reports
//! - [`strategy`] - Sequential and concurrent batch settlement
//!
//! # Splits
//!
//! - **Payers**: the amount is divided equally between payers, or by custom
//!   per-payer amounts when there are several payers
//! - **Participants**: the amount is divided equally between participants,
//!   or by custom per-participant shares
//!
//! # Member Summaries
//!
//! Each member's summary holds:
//! - `total_paid`: What the member paid across all expenses
//! - `total_share`: What the member consumed across all expenses
//! - `balance`: `total_paid - total_share`; positive means the member is owed
//!
//! All three are whole currency units and each column sums exactly to its
//! unrounded total.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{ExpenseDraft, MemoryStore, RecordStore, SettlementEngine, ValidationIssue};
pub use crate::io::{read_snapshot, save_snapshot, write_report, ReportKind};
pub use crate::types::{
    ExpenseId, ExpenseRecord, MemberName, ParticipantSplit, PayerSplit, PersonSummary, Settlement,
    Share, Snapshot, SplitError, Transaction,
};
