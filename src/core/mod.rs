//! Core business logic module
//!
//! This module contains the settlement components:
//! - `traits` - The record store abstraction
//! - `record_store` - In-memory record store with member cascade
//! - `validator` - Expense input validation
//! - `aggregator` - Per-member paid/share/balance totals
//! - `rounding` - Whole-unit rounding of aggregated columns
//! - `simplifier` - Greedy debt simplification
//! - `engine` - Settlement orchestration

pub mod aggregator;
pub mod engine;
pub mod record_store;
pub mod rounding;
pub mod simplifier;
pub mod traits;
pub mod validator;

#[cfg(test)]
mod settlement_props;

pub use aggregator::{aggregate, BalanceSheet};
pub use engine::SettlementEngine;
pub use record_store::MemoryStore;
pub use rounding::{round_column, round_unit};
pub use simplifier::{simplify, SETTLEMENT_THRESHOLD};
pub use traits::RecordStore;
pub use validator::{validate, ExpenseDraft, ValidationIssue};
