//! Processing strategy module for batch settlement
//!
//! This module defines the Strategy pattern for settling one or more groups,
//! each stored as its own snapshot file. A strategy reads every snapshot,
//! settles it, and writes one combined report. Implementations (synchronous,
//! concurrent) can be selected at runtime and produce identical output.

use crate::cli::StrategyType;
use crate::io::ReportKind;
use crate::types::SplitError;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, ConcurrencyConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for batch settlement
///
/// Each strategy must read the given snapshot files, settle each group
/// independently, and write the selected report to output with groups in
/// input order.
pub trait ProcessingStrategy: Send + Sync {
    /// Settle every input group and write the report
    ///
    /// # Arguments
    ///
    /// * `inputs` - Snapshot file paths, one per group
    /// * `report` - Which report to write
    /// * `output` - Mutable reference to a writer for the report
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A snapshot file cannot be found or read
    /// - A snapshot file is not a valid snapshot document
    /// - Output cannot be written
    ///
    /// Any unreadable group fails the whole run and nothing is written.
    /// Invalid records inside a readable snapshot are skipped with a warning.
    fn process(
        &self,
        inputs: &[PathBuf],
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<(), SplitError>;
}

/// Name a group after its snapshot file stem
pub fn group_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional concurrency configuration (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ConcurrencyConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::json_file("groups/dinner.json", "dinner")]
    #[case::no_extension("trip", "trip")]
    #[case::dotted_name("team.offsite.json", "team.offsite")]
    fn test_group_name(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(group_name(Path::new(path)), expected);
    }
}
