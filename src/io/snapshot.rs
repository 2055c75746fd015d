//! JSON snapshot persistence
//!
//! A group is persisted as one JSON document holding its members and
//! expenses. The key layout is the one the browser version of the splitter
//! keeps in local storage, so existing exports load unchanged:
//!
//! ```json
//! {
//!   "members": ["Hào", "Minh"],
//!   "expenses": [{
//!     "id": 1718000000000,
//!     "name": "Dinner",
//!     "amount": 100000,
//!     "paidBy": ["Hào"],
//!     "paidBySplitMode": "equal",
//!     "paidByAmounts": {},
//!     "participants": [{ "name": "Hào", "share": 50000 }, { "name": "Minh", "share": 50000 }],
//!     "isEqualSplit": true,
//!     "date": "18/10/2026"
//!   }]
//! }
//! ```
//!
//! # Leniency
//!
//! Loading is strict about JSON syntax and lenient about content: optional
//! keys take their defaults, amounts are rounded to whole units, and a
//! record that cannot be settled (non-positive amount, no payers, no
//! participants) is skipped with a warning while the rest still load.
//! Blank and duplicate member names are skipped the same way. Every name,
//! in the member list or inside a record, is trimmed of surrounding
//! whitespace. Amounts beyond [`crate::types::MAX_AMOUNT`] make a record invalid.

use crate::core::rounding::round_unit;
use crate::types::{
    ExpenseId, ExpenseRecord, MemberName, ParticipantSplit, PayerSplit, Share, Snapshot,
    SplitError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// How the payers of an expense divide its amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredSplitMode {
    #[default]
    Equal,
    Custom,
}

/// A participant entry as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredParticipant {
    pub name: MemberName,
    #[serde(default)]
    pub share: Decimal,
}

/// An expense as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredExpense {
    pub id: ExpenseId,
    #[serde(default)]
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub paid_by: Vec<MemberName>,
    #[serde(default)]
    pub paid_by_split_mode: StoredSplitMode,
    #[serde(default)]
    pub paid_by_amounts: BTreeMap<MemberName, Decimal>,
    #[serde(default)]
    pub participants: Vec<StoredParticipant>,
    #[serde(default = "default_equal_split")]
    pub is_equal_split: bool,
    #[serde(default)]
    pub date: String,
}

fn default_equal_split() -> bool {
    true
}

fn trimmed(name: MemberName) -> MemberName {
    name.trim().to_string()
}

/// The whole document as stored on disk
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredSnapshot {
    #[serde(default)]
    pub members: Vec<MemberName>,
    #[serde(default)]
    pub expenses: Vec<StoredExpense>,
}

impl StoredExpense {
    /// Convert to a record, rounding every amount to whole units
    ///
    /// Names are trimmed the same way member names are, so padded entries
    /// still refer to their member.
    ///
    /// # Errors
    ///
    /// Returns the [`ExpenseRecord::new`] error if the record cannot be
    /// settled.
    pub fn into_record(self) -> Result<ExpenseRecord, SplitError> {
        let payer_split = match self.paid_by_split_mode {
            StoredSplitMode::Equal => PayerSplit::Equal,
            StoredSplitMode::Custom => PayerSplit::Custom(
                self.paid_by_amounts
                    .into_iter()
                    .map(|(name, amount)| (trimmed(name), round_unit(amount)))
                    .collect(),
            ),
        };

        let participants = if self.is_equal_split {
            ParticipantSplit::Equal(
                self.participants
                    .into_iter()
                    .map(|p| trimmed(p.name))
                    .collect(),
            )
        } else {
            ParticipantSplit::Custom(
                self.participants
                    .into_iter()
                    .map(|p| Share::new(trimmed(p.name), round_unit(p.share)))
                    .collect(),
            )
        };

        ExpenseRecord::new(
            self.id,
            self.name,
            round_unit(self.amount),
            self.paid_by.into_iter().map(trimmed).collect(),
            payer_split,
            participants,
            self.date,
        )
    }
}

impl From<&ExpenseRecord> for StoredExpense {
    fn from(record: &ExpenseRecord) -> Self {
        let (paid_by_split_mode, paid_by_amounts) = match record.payer_split() {
            PayerSplit::Equal => (StoredSplitMode::Equal, BTreeMap::new()),
            PayerSplit::Custom(amounts) => (StoredSplitMode::Custom, amounts.clone()),
        };

        // Equal shares are recomputed on load; the stored value is informational
        let participants = match record.participants() {
            ParticipantSplit::Equal(names) => {
                let share = round_unit(record.amount() / Decimal::from(names.len().max(1)));
                names
                    .iter()
                    .map(|name| StoredParticipant {
                        name: name.clone(),
                        share,
                    })
                    .collect()
            }
            ParticipantSplit::Custom(shares) => shares
                .iter()
                .map(|s| StoredParticipant {
                    name: s.name.clone(),
                    share: s.amount,
                })
                .collect(),
        };

        StoredExpense {
            id: record.id(),
            name: record.name().to_string(),
            amount: record.amount(),
            paid_by: record.payers().to_vec(),
            paid_by_split_mode,
            paid_by_amounts,
            participants,
            is_equal_split: record.participants().is_equal(),
            date: record.date().to_string(),
        }
    }
}

impl From<&Snapshot> for StoredSnapshot {
    fn from(snapshot: &Snapshot) -> Self {
        StoredSnapshot {
            members: snapshot.members.clone(),
            expenses: snapshot.expenses.iter().map(StoredExpense::from).collect(),
        }
    }
}

impl StoredSnapshot {
    /// Convert to a snapshot, skipping content that cannot be settled
    pub fn into_snapshot(self) -> Snapshot {
        let mut seen = HashSet::with_capacity(self.members.len());
        let members: Vec<MemberName> = self
            .members
            .into_iter()
            .filter_map(|raw| {
                let name = raw.trim().to_string();
                if name.is_empty() {
                    warn!("skipping blank member name");
                    return None;
                }
                if !seen.insert(name.to_lowercase()) {
                    warn!(member = %name, "skipping duplicate member");
                    return None;
                }
                Some(name)
            })
            .collect();

        let mut ids = HashSet::with_capacity(self.expenses.len());
        let expenses: Vec<ExpenseRecord> = self
            .expenses
            .into_iter()
            .filter_map(|stored| {
                let id = stored.id;
                if !ids.insert(id) {
                    warn!(expense = id, "skipping duplicate expense id");
                    return None;
                }
                match stored.into_record() {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(expense = id, error = %e, "skipping invalid expense");
                        None
                    }
                }
            })
            .collect();

        debug!(
            members = members.len(),
            expenses = expenses.len(),
            "loaded snapshot"
        );

        Snapshot::new(members, expenses)
    }
}

/// Parse a snapshot document
///
/// # Errors
///
/// Returns [`SplitError::ParseError`] if the text is not a valid snapshot
/// document. Individual invalid records are skipped, not reported.
pub fn parse_snapshot(json: &str) -> Result<Snapshot, SplitError> {
    let stored: StoredSnapshot = serde_json::from_str(json)?;
    Ok(stored.into_snapshot())
}

/// Read a snapshot file
///
/// # Errors
///
/// Returns an error if:
/// - The file doesn't exist
/// - The file cannot be read
/// - The file is not a valid snapshot document
pub fn read_snapshot(path: &Path) -> Result<Snapshot, SplitError> {
    if !path.exists() {
        return Err(SplitError::file_not_found(&path.display().to_string()));
    }

    let json = fs::read_to_string(path)?;
    parse_snapshot(&json)
}

/// Read a snapshot file, treating a missing file as an empty group
pub fn read_snapshot_or_default(path: &Path) -> Result<Snapshot, SplitError> {
    if !path.exists() {
        debug!(path = %path.display(), "snapshot file missing, starting empty");
        return Ok(Snapshot::default());
    }
    read_snapshot(path)
}

/// Serialize a snapshot as pretty-printed JSON
pub fn write_snapshot(snapshot: &Snapshot, output: &mut dyn Write) -> Result<(), SplitError> {
    serde_json::to_writer_pretty(&mut *output, &StoredSnapshot::from(snapshot))?;
    writeln!(output)?;
    Ok(())
}

/// Write a snapshot to a file, replacing its contents
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), SplitError> {
    let mut buffer = Vec::new();
    write_snapshot(snapshot, &mut buffer)?;
    fs::write(path, buffer)?;

    debug!(path = %path.display(), "saved snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    /// Helper to create a temporary snapshot file with given content
    fn create_snapshot_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const FULL_RECORD: &str = r#"{
        "members": ["Hào", "Minh", "Lan"],
        "expenses": [{
            "id": 1718000000000,
            "name": "Dinner",
            "amount": 90000,
            "paidBy": ["Hào", "Minh"],
            "paidBySplitMode": "custom",
            "paidByAmounts": {"Hào": 60000, "Minh": 30000},
            "participants": [{"name": "Hào", "share": 30000}, {"name": "Lan", "share": 60000}],
            "isEqualSplit": false,
            "date": "18/10/2026"
        }]
    }"#;

    #[test]
    fn test_parse_full_record() {
        let snapshot = parse_snapshot(FULL_RECORD).unwrap();

        assert_eq!(snapshot.members, vec!["Hào", "Minh", "Lan"]);
        let expense = &snapshot.expenses[0];
        assert_eq!(expense.id(), 1718000000000);
        assert_eq!(expense.amount(), Decimal::from(90_000));
        assert_eq!(
            expense.payer_split(),
            &PayerSplit::Custom(BTreeMap::from([
                ("Hào".to_string(), Decimal::from(60_000)),
                ("Minh".to_string(), Decimal::from(30_000)),
            ]))
        );
        assert_eq!(
            expense.participants(),
            &ParticipantSplit::Custom(vec![
                Share::new("Hào", Decimal::from(30_000)),
                Share::new("Lan", Decimal::from(60_000)),
            ])
        );
        assert_eq!(expense.date(), "18/10/2026");
    }

    #[test]
    fn test_parse_applies_defaults() {
        let json = r#"{
            "members": ["A", "B"],
            "expenses": [{
                "id": 1,
                "name": "Taxi",
                "amount": 100.4,
                "paidBy": ["A"],
                "participants": [{"name": "A", "share": 33.33}, {"name": "B"}]
            }]
        }"#;

        let snapshot = parse_snapshot(json).unwrap();
        let expense = &snapshot.expenses[0];

        assert_eq!(expense.amount(), Decimal::from(100));
        assert_eq!(expense.payer_split(), &PayerSplit::Equal);
        assert_eq!(
            expense.participants(),
            &ParticipantSplit::Equal(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(expense.date(), "");
    }

    #[rstest]
    #[case::zero_amount(r#"{"id": 2, "amount": 0, "paidBy": ["A"], "participants": [{"name": "A"}]}"#)]
    #[case::no_payers(r#"{"id": 2, "amount": 10, "paidBy": [], "participants": [{"name": "A"}]}"#)]
    #[case::no_participants(r#"{"id": 2, "amount": 10, "paidBy": ["A"], "participants": []}"#)]
    #[case::amount_too_large(r#"{"id": 2, "amount": 5e28, "paidBy": ["A"], "participants": [{"name": "A"}]}"#)]
    #[case::share_too_large(
        r#"{"id": 2, "amount": 10, "paidBy": ["A"], "isEqualSplit": false,
            "participants": [{"name": "A", "share": 5e28}, {"name": "A", "share": -5e28}]}"#
    )]
    #[case::duplicate_id(r#"{"id": 1, "amount": 10, "paidBy": ["A"], "participants": [{"name": "A"}]}"#)]
    fn test_invalid_records_are_skipped(#[case] bad: &str) {
        let json = format!(
            r#"{{"members": ["A"], "expenses": [
                {{"id": 1, "name": "ok", "amount": 10, "paidBy": ["A"], "participants": [{{"name": "A"}}]}},
                {}
            ]}}"#,
            bad
        );

        let snapshot = parse_snapshot(&json).unwrap();
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.expenses[0].id(), 1);
    }

    #[test]
    fn test_blank_and_duplicate_members_are_skipped() {
        let snapshot = parse_snapshot(r#"{"members": ["A", " ", "a", " B "]}"#).unwrap();
        assert_eq!(snapshot.members, vec!["A", "B"]);
    }

    #[test]
    fn test_names_inside_records_are_trimmed() {
        let json = r#"{
            "members": [" Minh", "Lan "],
            "expenses": [{
                "id": 1,
                "name": "Taxi",
                "amount": 100,
                "paidBy": [" Minh", "Lan"],
                "paidBySplitMode": "custom",
                "paidByAmounts": {" Minh": 70, "Lan ": 30},
                "participants": [{"name": "Lan ", "share": 100}],
                "isEqualSplit": false
            }]
        }"#;

        let snapshot = parse_snapshot(json).unwrap();
        let expense = &snapshot.expenses[0];

        assert_eq!(snapshot.members, vec!["Minh", "Lan"]);
        assert_eq!(expense.payers(), &["Minh".to_string(), "Lan".to_string()][..]);
        assert_eq!(
            expense.payer_split(),
            &PayerSplit::Custom(BTreeMap::from([
                ("Lan".to_string(), Decimal::from(30)),
                ("Minh".to_string(), Decimal::from(70)),
            ]))
        );
        assert_eq!(expense.participants().names(), vec!["Lan"]);
    }

    #[test]
    fn test_empty_document() {
        let snapshot = parse_snapshot("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[rstest]
    #[case::not_json("members: A")]
    #[case::wrong_type(r#"{"members": "A"}"#)]
    #[case::missing_amount(r#"{"expenses": [{"id": 1}]}"#)]
    fn test_malformed_document_is_an_error(#[case] json: &str) {
        assert!(matches!(
            parse_snapshot(json),
            Err(SplitError::ParseError { .. })
        ));
    }

    #[test]
    fn test_save_then_read() {
        let original = parse_snapshot(FULL_RECORD).unwrap();
        let file = NamedTempFile::new().unwrap();

        save_snapshot(file.path(), &original).unwrap();
        let loaded = read_snapshot(file.path()).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_written_document_uses_stored_keys() {
        let snapshot = parse_snapshot(FULL_RECORD).unwrap();
        let mut output = Vec::new();
        write_snapshot(&snapshot, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        for key in ["paidBy", "paidBySplitMode", "paidByAmounts", "isEqualSplit", "\"custom\""] {
            assert!(text.contains(key), "missing {} in {}", key, text);
        }
    }

    #[test]
    fn test_read_existing_file() {
        let file = create_snapshot_file(r#"{"members": ["A"]}"#);
        let snapshot = read_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.members, vec!["A"]);
    }

    #[test]
    fn test_read_missing_file() {
        let path = Path::new("nonexistent_group.json");
        assert!(matches!(
            read_snapshot(path),
            Err(SplitError::FileNotFound { .. })
        ));
        assert_eq!(read_snapshot_or_default(path).unwrap(), Snapshot::default());
    }
}
