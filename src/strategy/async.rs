//! Concurrent processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait that settles many groups at once.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── ConcurrencyConfig (max_concurrent)
//!     ├── tokio::fs (snapshot reads)
//!     ├── spawn_blocking (parse + settle, one snapshot per task)
//!     └── futures::StreamExt::buffered (bounded fan-out, input order kept)
//! ```
//!
//! # Isolation
//!
//! Every task owns the snapshot it parsed, and the settlement core holds no
//! state, so tasks share nothing and need no locking. `buffered` yields
//! results in input order, which makes the report identical to the one the
//! synchronous strategy writes.

use crate::core::SettlementEngine;
use crate::io::{parse_snapshot, write_report, ReportKind};
use crate::strategy::{group_name, ProcessingStrategy};
use crate::types::{GroupSettlement, SplitError};
use futures::stream::{self, StreamExt};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Configuration for concurrent settlement
#[derive(Clone, Debug)]
pub struct ConcurrencyConfig {
    /// Maximum number of groups being read or settled at once
    pub max_concurrent: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get(),
        }
    }
}

impl ConcurrencyConfig {
    /// Create a new ConcurrencyConfig, falling back to the default for zero
    pub fn new(max_concurrent: usize) -> Self {
        let default = Self::default();

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                requested = max_concurrent,
                fallback = default.max_concurrent,
                "invalid max_concurrent, using default"
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self { max_concurrent }
    }
}

/// Concurrent processing strategy
///
/// Reads and settles up to `max_concurrent` groups at a time on a tokio
/// multi-threaded runtime.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: ConcurrencyConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: ConcurrencyConfig) -> Self {
        Self { config }
    }
}

/// Read one snapshot file and settle it on the blocking pool
async fn settle_file(path: PathBuf) -> Result<GroupSettlement, SplitError> {
    let json = match tokio::fs::read_to_string(&path).await {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SplitError::file_not_found(&path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let group = group_name(&path);
    debug!(%group, "settling group");

    tokio::task::spawn_blocking(move || {
        let snapshot = parse_snapshot(&json)?;
        Ok(GroupSettlement {
            group,
            settlement: SettlementEngine::new().settle_snapshot(&snapshot),
        })
    })
    .await
    .map_err(|e| SplitError::TaskFailed {
        message: e.to_string(),
    })?
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Settle every input group concurrently and write the report
    ///
    /// All groups are settled before anything is written, so a failing
    /// group leaves the output untouched.
    fn process(
        &self,
        inputs: &[PathBuf],
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<(), SplitError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| SplitError::TaskFailed {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let groups = runtime.block_on(async {
            stream::iter(inputs.iter().cloned())
                .map(settle_file)
                .buffered(self.config.max_concurrent)
                .collect::<Vec<_>>()
                .await
                .into_iter()
                .collect::<Result<Vec<_>, _>>()
        })?;

        write_report(&groups, report, output)
    }
}
