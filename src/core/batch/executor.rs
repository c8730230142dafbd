//! Chunked, retrying execution of write batches
//!
//! The executor has no domain knowledge: it takes a flat list of operations,
//! partitions it into store-sized chunks, commits each chunk as one atomic
//! batch, and retries failed chunks with linear backoff. Success is tracked
//! per chunk; a chunk that committed on an earlier attempt is never retried.

use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::types::BatchOperation;
use crate::storage::{DocumentStore, MAX_BATCH_OPERATIONS};

/// Tuning knobs for one executor instance.
#[derive(Debug, Clone)]
pub struct BatchRunConfig {
    /// Maximum operations per atomic chunk
    pub chunk_size: usize,
    /// Total commit attempts per chunk, including the first
    pub max_retries: u32,
    /// Base delay for linear backoff between attempt rounds
    pub backoff_base: Duration,
}

impl Default for BatchRunConfig {
    fn default() -> Self {
        Self {
            chunk_size: MAX_BATCH_OPERATIONS,
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl BatchRunConfig {
    /// Config with store defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size (minimum 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the retry limit (minimum 1).
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the backoff base delay.
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }
}

/// Aggregate outcome of one [`BatchExecutor::run_with_retry`] call.
#[derive(Debug, Clone, Default)]
pub struct BatchRunReport {
    /// Operations whose chunk committed
    pub successful: usize,
    /// Operations whose chunk never committed
    pub failed: usize,
    /// Ids of committed operations
    pub successful_ops: Vec<Uuid>,
    /// Ids of permanently-failed operations
    pub failed_ops: Vec<Uuid>,
    /// Attempt rounds actually run
    pub total_attempts: u32,
}

impl BatchRunReport {
    /// True when every submitted operation committed.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Ids of permanently-failed operations, as a set for attribution.
    pub fn failed_op_set(&self) -> HashSet<Uuid> {
        self.failed_ops.iter().copied().collect()
    }
}

/// Generic chunking + bounded-size commit + retry engine.
pub struct BatchExecutor {
    store: Arc<dyn DocumentStore>,
    config: BatchRunConfig,
}

impl BatchExecutor {
    /// Build an executor over a store.
    pub fn new(store: Arc<dyn DocumentStore>, config: BatchRunConfig) -> Self {
        Self { store, config }
    }

    /// The executor's configuration.
    pub fn config(&self) -> &BatchRunConfig {
        &self.config
    }

    /// Commit `operations` in chunks, retrying failed chunks.
    ///
    /// Chunks within one attempt round are committed concurrently; the next
    /// round starts only after every chunk of the current round has been
    /// attempted. Rounds after the first are preceded by a linear backoff
    /// delay (`round × backoff_base`). An empty operation list returns an
    /// empty report without touching the store.
    pub async fn run_with_retry(&self, operations: Vec<BatchOperation>) -> BatchRunReport {
        let submitted = operations.len();
        if submitted == 0 {
            return BatchRunReport::default();
        }

        let mut remaining: Vec<Vec<BatchOperation>> = operations
            .chunks(self.config.chunk_size)
            .map(<[BatchOperation]>::to_vec)
            .collect();

        info!(
            operations = submitted,
            chunks = remaining.len(),
            chunk_size = self.config.chunk_size,
            "starting batch run"
        );

        let mut report = BatchRunReport::default();

        while report.total_attempts < self.config.max_retries && !remaining.is_empty() {
            report.total_attempts += 1;

            let commits = remaining
                .iter()
                .map(|chunk| self.store.commit(chunk))
                .collect::<Vec<_>>();
            let outcomes = join_all(commits).await;

            let mut still_failed = Vec::new();
            for (chunk, outcome) in remaining.into_iter().zip(outcomes) {
                match outcome {
                    Ok(()) => {
                        debug!(operations = chunk.len(), "chunk committed");
                        report.successful_ops.extend(chunk.iter().map(|op| op.id));
                    }
                    Err(e) => {
                        warn!(
                            attempt = report.total_attempts,
                            operations = chunk.len(),
                            error = %e,
                            "chunk commit failed"
                        );
                        still_failed.push(chunk);
                    }
                }
            }
            remaining = still_failed;

            if !remaining.is_empty() && report.total_attempts < self.config.max_retries {
                let delay = self.config.backoff_base * report.total_attempts;
                debug!(?delay, "backing off before retry round");
                tokio::time::sleep(delay).await;
            }
        }

        for chunk in &remaining {
            report.failed_ops.extend(chunk.iter().map(|op| op.id));
        }
        report.successful = report.successful_ops.len();
        report.failed = report.failed_ops.len();

        if report.failed > 0 {
            error!(
                failed = report.failed,
                attempts = report.total_attempts,
                "operations permanently failed"
            );
        } else {
            info!(
                successful = report.successful,
                attempts = report.total_attempts,
                "batch run complete"
            );
        }

        report
    }
}

/// One-off convenience over a fresh executor.
pub async fn run_batch(
    store: Arc<dyn DocumentStore>,
    operations: Vec<BatchOperation>,
    config: BatchRunConfig,
) -> BatchRunReport {
    BatchExecutor::new(store, config).run_with_retry(operations).await
}
