//! Error types for the settlement engine
//!
//! This module defines all error types that can occur while loading, editing
//! and settling group expenses. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Snapshot Errors**: Malformed JSON, records violating their invariants
//! - **Record Store Errors**: Duplicate or unknown members and expenses
//! - **Validation Errors**: An expense draft rejected by the validator
//!
//! Validation descriptors themselves live in [`crate::core::validator`]; the
//! [`SplitError::Rejected`] variant only carries them to the caller.

use crate::core::validator::ValidationIssue;
use crate::types::expense::ExpenseId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the settlement engine
///
/// Each variant includes the context needed to diagnose the problem
/// without re-reading the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The snapshot document could not be parsed
    #[error("Snapshot parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Description of the parsing error
        message: String,
    },

    /// Report output could not be written
    #[error("Output error: {message}")]
    OutputError {
        /// Description of the write failure
        message: String,
    },

    /// Expense amount is zero or negative
    #[error("Expense {id} has invalid amount {amount}")]
    NonPositiveAmount {
        /// Expense identifier
        id: ExpenseId,
        /// The rejected amount
        amount: Decimal,
    },

    /// An amount, payer amount or share exceeds the supported magnitude
    #[error("Expense {id} has out-of-range amount {amount}")]
    AmountOutOfRange {
        /// Expense identifier
        id: ExpenseId,
        /// The first rejected value
        amount: Decimal,
    },

    /// Expense has nobody paying for it
    #[error("Expense {id} has no payers")]
    EmptyPayers {
        /// Expense identifier
        id: ExpenseId,
    },

    /// Expense has nobody sharing its cost
    #[error("Expense {id} has no participants")]
    EmptyParticipants {
        /// Expense identifier
        id: ExpenseId,
    },

    /// Member name is blank after trimming
    #[error("Member name must not be empty")]
    EmptyMemberName,

    /// A member with the same name (ignoring case) already exists
    #[error("Member '{name}' already exists")]
    DuplicateMember {
        /// The rejected name
        name: String,
    },

    /// No member with this name exists
    #[error("Member '{name}' not found")]
    MemberNotFound {
        /// The name that was looked up
        name: String,
    },

    /// No expense with this id exists
    #[error("Expense {id} not found")]
    ExpenseNotFound {
        /// The id that was looked up
        id: ExpenseId,
    },

    /// An expense with this id is already stored
    #[error("Duplicate expense id {id}")]
    DuplicateExpense {
        /// The clashing id
        id: ExpenseId,
    },

    /// The validator rejected an expense draft
    ///
    /// Carries every descriptor so the caller can report all problems at once.
    #[error("Expense rejected: {}", issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Rejected {
        /// Every validation problem found in the draft
        issues: Vec<ValidationIssue>,
    },

    /// A batch worker task failed to complete
    #[error("Worker task failed: {message}")]
    TaskFailed {
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to SplitError
impl From<std::io::Error> for SplitError {
    fn from(error: std::io::Error) -> Self {
        SplitError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to SplitError
impl From<serde_json::Error> for SplitError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            return SplitError::IoError {
                message: error.to_string(),
            };
        }

        SplitError::ParseError {
            line: Some(error.line()).filter(|&l| l > 0),
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SplitError
impl From<csv::Error> for SplitError {
    fn from(error: csv::Error) -> Self {
        SplitError::OutputError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SplitError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        SplitError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a DuplicateMember error
    pub fn duplicate_member(name: &str) -> Self {
        SplitError::DuplicateMember {
            name: name.to_string(),
        }
    }

    /// Create a MemberNotFound error
    pub fn member_not_found(name: &str) -> Self {
        SplitError::MemberNotFound {
            name: name.to_string(),
        }
    }

    /// Create an ExpenseNotFound error
    pub fn expense_not_found(id: ExpenseId) -> Self {
        SplitError::ExpenseNotFound { id }
    }

    /// Create a DuplicateExpense error
    pub fn duplicate_expense(id: ExpenseId) -> Self {
        SplitError::DuplicateExpense { id }
    }

    /// Create a Rejected error from validator output
    pub fn rejected(issues: Vec<ValidationIssue>) -> Self {
        SplitError::Rejected { issues }
    }

    /// Create an OutputError
    pub fn output(message: impl Into<String>) -> Self {
        SplitError::OutputError {
            message: message.into(),
        }
    }
}
