//! Synchronous processing strategy
//!
//! Settles groups one after another on the calling thread. Each snapshot is
//! read with `io::snapshot::read_snapshot`, settled by the `SettlementEngine`,
//! and the combined report is written once every group has settled.

use crate::core::SettlementEngine;
use crate::io::{read_snapshot, write_report, ReportKind};
use crate::strategy::{group_name, ProcessingStrategy};
use crate::types::{GroupSettlement, SplitError};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use settlement_engine::io::ReportKind;
/// use settlement_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::PathBuf;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = std::io::stdout();
///
/// strategy
///     .process(&[PathBuf::from("dinner.json")], ReportKind::Transactions, &mut output)
///     .expect("Settlement failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        inputs: &[PathBuf],
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<(), SplitError> {
        let engine = SettlementEngine::new();
        let mut groups = Vec::with_capacity(inputs.len());

        for path in inputs {
            let snapshot = read_snapshot(path)?;
            let group = group_name(path);
            debug!(%group, "settling group");

            groups.push(GroupSettlement {
                group,
                settlement: engine.settle_snapshot(&snapshot),
            });
        }

        write_report(&groups, report, output)
    }
}
