//! Expense input validation
//!
//! Checks a submitted expense for completeness and arithmetic consistency
//! before it is turned into an [`ExpenseRecord`]. Every check runs
//! independently so a caller can report all problems at once; an empty
//! list is the only "valid" signal. Validation never mutates anything and
//! never fails.

use crate::core::rounding::round_unit;
use crate::types::{
    ExpenseId, ExpenseRecord, MemberName, ParticipantSplit, PayerSplit, Share, SplitError,
    MAX_AMOUNT,
};
use rust_decimal::Decimal;
use thiserror::Error;

/// A single problem found in an expense draft
///
/// The `Display` text is a default English message; presentation layers
/// that localize should key off [`ValidationIssue::code`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("expense name is required")]
    MissingName,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("at least one payer is required")]
    NoPayers,

    #[error("at least one participant is required")]
    NoParticipants,

    /// Custom payer amounts do not add up to the expense amount
    #[error("payer amounts must add up to {expected}, got {actual}")]
    PayerTotalMismatch { expected: Decimal, actual: Decimal },

    /// Custom participant shares do not add up to the expense amount
    #[error("participant shares must add up to {expected}, got {actual}")]
    ShareTotalMismatch { expected: Decimal, actual: Decimal },

    /// The amount, a payer amount or a share is larger than [`MAX_AMOUNT`]
    #[error("amounts must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
}

impl ValidationIssue {
    /// Stable identifier for message lookup
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::MissingName => "missing_name",
            ValidationIssue::InvalidAmount => "invalid_amount",
            ValidationIssue::NoPayers => "no_payers",
            ValidationIssue::NoParticipants => "no_participants",
            ValidationIssue::PayerTotalMismatch { .. } => "payer_total_mismatch",
            ValidationIssue::ShareTotalMismatch { .. } => "share_total_mismatch",
            ValidationIssue::AmountTooLarge => "amount_too_large",
        }
    }
}

/// Expense fields as submitted, before rounding
///
/// Amounts may carry fractions; they are rounded to whole units only when
/// the draft becomes a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: Option<Decimal>,
    pub payers: Vec<MemberName>,
    pub payer_split: PayerSplit<Decimal>,
    pub participants: ParticipantSplit<Decimal>,
}

impl ExpenseDraft {
    /// Validate the draft and build a record from it
    ///
    /// Rounds the amount, custom payer amounts and custom shares to whole
    /// units.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Rejected`] carrying every validation issue if
    /// the draft is invalid.
    pub fn into_record(self, id: ExpenseId, date: &str) -> Result<ExpenseRecord, SplitError> {
        let issues = validate(&self);
        if !issues.is_empty() {
            return Err(SplitError::rejected(issues));
        }

        let amount = round_unit(self.amount.unwrap_or(Decimal::ZERO));

        let payer_split = match self.payer_split {
            PayerSplit::Equal => PayerSplit::Equal,
            PayerSplit::Custom(amounts) => PayerSplit::Custom(
                amounts
                    .into_iter()
                    .map(|(name, paid)| (name, round_unit(paid)))
                    .collect(),
            ),
        };

        let participants = match self.participants {
            ParticipantSplit::Equal(names) => ParticipantSplit::Equal(names),
            ParticipantSplit::Custom(shares) => ParticipantSplit::Custom(
                shares
                    .into_iter()
                    .map(|share| Share::new(share.name, round_unit(share.amount)))
                    .collect(),
            ),
        };

        ExpenseRecord::new(
            id,
            self.name.trim(),
            amount,
            self.payers,
            payer_split,
            participants,
            date,
        )
    }
}

/// Validate an expense draft
///
/// Returns every issue found, in a fixed order. An empty vector means the
/// draft is valid.
pub fn validate(draft: &ExpenseDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if draft.name.trim().is_empty() {
        issues.push(ValidationIssue::MissingName);
    }

    // Amounts are stored in whole units, so anything that rounds to zero is invalid
    let expected = round_unit(draft.amount.unwrap_or(Decimal::ZERO));
    if draft.amount.is_none() || expected <= Decimal::ZERO {
        issues.push(ValidationIssue::InvalidAmount);
    }

    if draft.payers.is_empty() {
        issues.push(ValidationIssue::NoPayers);
    }

    if draft.participants.is_empty() {
        issues.push(ValidationIssue::NoParticipants);
    }

    let mut too_large = expected.abs() > MAX_AMOUNT;

    if let PayerSplit::Custom(amounts) = &draft.payer_split {
        too_large |= amounts.values().copied().any(out_of_range);
        if draft.payers.len() > 1 {
            match checked_total(draft.payers.iter().filter_map(|payer| amounts.get(payer))) {
                Some(actual) if actual != expected => {
                    issues.push(ValidationIssue::PayerTotalMismatch { expected, actual });
                }
                Some(_) => {}
                None => too_large = true,
            }
        }
    }

    if let ParticipantSplit::Custom(shares) = &draft.participants {
        too_large |= shares.iter().map(|share| share.amount).any(out_of_range);
        match checked_total(shares.iter().map(|share| &share.amount)) {
            Some(actual) if actual != expected => {
                issues.push(ValidationIssue::ShareTotalMismatch { expected, actual });
            }
            Some(_) => {}
            None => too_large = true,
        }
    }

    if too_large {
        issues.push(ValidationIssue::AmountTooLarge);
    }

    issues
}

fn out_of_range(amount: Decimal) -> bool {
    round_unit(amount).abs() > MAX_AMOUNT
}

/// Rounded sum of custom parts, or `None` if the sum overflows
fn checked_total<'a>(parts: impl IntoIterator<Item = &'a Decimal>) -> Option<Decimal> {
    parts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, part| total.checked_add(*part))
        .map(round_unit)
}
