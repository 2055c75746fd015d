//! Expense-related types for the settlement engine
//!
//! This module defines expense records, the payer and participant split
//! variants, and the identifiers used throughout the system.

use crate::types::error::SplitError;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Member identity: a unique display name
pub type MemberName = String;

/// Expense identifier (epoch milliseconds at creation)
pub type ExpenseId = u64;

/// Largest magnitude any stored amount may have, in whole units (10^15)
///
/// A group's running totals stay far below the `Decimal` range while every
/// amount, payer amount and share is bounded by this.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// How an expense's amount is attributed to its payers
///
/// Generic over the amount type so that unrounded form input
/// ([`crate::core::validator::ExpenseDraft`]) and stored records share
/// the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PayerSplit<A = Decimal> {
    /// The amount is divided evenly across all payers
    #[default]
    Equal,

    /// Each payer contributed an explicit amount
    ///
    /// Only honoured when the expense has more than one payer. A payer
    /// missing from the map contributed nothing.
    Custom(BTreeMap<MemberName, A>),
}

/// One participant's explicit portion of an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share<A = Decimal> {
    /// The participant
    pub name: MemberName,

    /// The portion of the expense this participant owes
    pub amount: A,
}

impl<A> Share<A> {
    pub fn new(name: impl Into<MemberName>, amount: A) -> Self {
        Share {
            name: name.into(),
            amount,
        }
    }
}

/// Who owes a portion of an expense, and how much
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantSplit<A = Decimal> {
    /// The amount is divided evenly across these participants
    Equal(Vec<MemberName>),

    /// Each participant owes an explicit share; shares sum to the amount
    Custom(Vec<Share<A>>),
}

impl<A> ParticipantSplit<A> {
    /// Number of participants regardless of split mode
    pub fn len(&self) -> usize {
        match self {
            ParticipantSplit::Equal(names) => names.len(),
            ParticipantSplit::Custom(shares) => shares.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Participant names in their stored order
    pub fn names(&self) -> Vec<&str> {
        match self {
            ParticipantSplit::Equal(names) => names.iter().map(String::as_str).collect(),
            ParticipantSplit::Custom(shares) => shares.iter().map(|s| s.name.as_str()).collect(),
        }
    }

    /// Whether the participant amounts are derived by equal division
    pub fn is_equal(&self) -> bool {
        matches!(self, ParticipantSplit::Equal(_))
    }

    fn without(&self, name: &str) -> Self
    where
        A: Clone,
    {
        match self {
            ParticipantSplit::Equal(names) => {
                ParticipantSplit::Equal(names.iter().filter(|n| *n != name).cloned().collect())
            }
            ParticipantSplit::Custom(shares) => ParticipantSplit::Custom(
                shares.iter().filter(|s| s.name != name).cloned().collect(),
            ),
        }
    }
}

/// A stored expense record
///
/// Construction goes through [`ExpenseRecord::new`], which enforces the
/// structural invariants the aggregator relies on: a positive amount, at
/// least one payer and at least one participant. The arithmetic invariants
/// of custom splits are the validator's concern and are not re-checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    id: ExpenseId,
    name: String,
    amount: Decimal,
    payers: Vec<MemberName>,
    payer_split: PayerSplit,
    participants: ParticipantSplit,
    date: String,
}

impl ExpenseRecord {
    /// Create a new expense record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - `amount`, a custom payer amount or a custom share exceeds
    ///   [`MAX_AMOUNT`] in magnitude
    /// - `payers` is empty
    /// - `participants` is empty
    pub fn new(
        id: ExpenseId,
        name: impl Into<String>,
        amount: Decimal,
        payers: Vec<MemberName>,
        payer_split: PayerSplit,
        participants: ParticipantSplit,
        date: impl Into<String>,
    ) -> Result<Self, SplitError> {
        if amount <= Decimal::ZERO {
            return Err(SplitError::NonPositiveAmount { id, amount });
        }
        let custom_parts: Vec<Decimal> = match &payer_split {
            PayerSplit::Custom(amounts) => amounts.values().copied().collect(),
            PayerSplit::Equal => Vec::new(),
        };
        let shares: Vec<Decimal> = match &participants {
            ParticipantSplit::Custom(shares) => shares.iter().map(|s| s.amount).collect(),
            ParticipantSplit::Equal(_) => Vec::new(),
        };
        if let Some(&amount) = std::iter::once(&amount)
            .chain(&custom_parts)
            .chain(&shares)
            .find(|value| value.abs() > MAX_AMOUNT)
        {
            return Err(SplitError::AmountOutOfRange { id, amount });
        }
        if payers.is_empty() {
            return Err(SplitError::EmptyPayers { id });
        }
        if participants.is_empty() {
            return Err(SplitError::EmptyParticipants { id });
        }

        Ok(ExpenseRecord {
            id,
            name: name.into(),
            amount,
            payers,
            payer_split,
            participants,
            date: date.into(),
        })
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payers(&self) -> &[MemberName] {
        &self.payers
    }

    pub fn payer_split(&self) -> &PayerSplit {
        &self.payer_split
    }

    pub fn participants(&self) -> &ParticipantSplit {
        &self.participants
    }

    /// Creation date, display only
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Whether `name` appears as a payer or participant
    pub fn references(&self, name: &str) -> bool {
        self.payers.iter().any(|p| p == name) || self.participants.names().contains(&name)
    }

    /// Copy of this record with `name` removed from payers and participants
    ///
    /// The amount is not redistributed and custom payer amounts are kept
    /// as they are. Returns `None` when the removal leaves the record with
    /// no payers or no participants.
    pub fn without_member(&self, name: &str) -> Option<Self> {
        let payers: Vec<MemberName> = self.payers.iter().filter(|p| *p != name).cloned().collect();
        let participants = self.participants.without(name);

        ExpenseRecord::new(
            self.id,
            self.name.clone(),
            self.amount,
            payers,
            self.payer_split.clone(),
            participants,
            self.date.clone(),
        )
        .ok()
    }
}
