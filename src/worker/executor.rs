//! Worker execution loop

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{BenchError, BenchResult};
use crate::traits::{OpOutcome, Workload};

use super::stats::ThreadStats;

/// Worker drives one contiguous slice of a workload's operation indices
///
/// Each worker is a tokio task with exclusive ownership of its store handle.
/// Indices within the assigned range execute strictly in order; a retryable
/// conflict re-runs the same index immediately, with no backoff and no retry
/// limit, and is invisible to stats and progress.
pub struct Worker<H> {
    /// Unique worker identifier within the current workload
    id: usize,

    /// Workload being executed (shared across workers via Arc)
    workload: Arc<dyn Workload<H>>,

    /// Store handle, exclusively owned by this worker
    store: H,

    /// First operation index of the assigned range
    start_index: u64,

    /// Number of operations in the assigned range
    op_count: u64,

    /// Shared approximate progress counter (display only, not correctness)
    progress: Arc<AtomicU64>,
}

impl<H: Send + 'static> Worker<H> {
    /// Create a new worker
    pub fn new(
        id: usize,
        workload: Arc<dyn Workload<H>>,
        store: H,
        start_index: u64,
        op_count: u64,
        progress: Arc<AtomicU64>,
    ) -> Self {
        Self {
            id,
            workload,
            store,
            start_index,
            op_count,
            progress,
        }
    }

    /// Run the assigned operation range to completion
    ///
    /// Returns this worker's stats on success. A fatal operation failure
    /// returns immediately; the partially-filled stats are dropped with the
    /// worker.
    pub async fn run(mut self) -> BenchResult<ThreadStats> {
        let mut stats = ThreadStats::new();
        stats.start();

        tracing::debug!(
            worker_id = self.id,
            start_index = self.start_index,
            op_count = self.op_count,
            "worker started"
        );

        let end_index = self.start_index + self.op_count;
        let mut index = self.start_index;
        while index < end_index {
            let op_start = Instant::now();
            match self.workload.run_op(index, &mut self.store).await {
                OpOutcome::Success(op_stats) => {
                    index += 1;
                    let total_done = self.progress.fetch_add(1, Ordering::Relaxed) + 1;
                    stats.update(&op_stats, total_done);
                }
                OpOutcome::RetryableConflict => {
                    // Aborted by concurrent write contention: retry the same
                    // index in place. Starvation under sustained contention is
                    // a known liveness caveat of this policy.
                    tracing::trace!(
                        worker_id = self.id,
                        index,
                        elapsed_us = op_start.elapsed().as_micros() as u64,
                        "operation aborted, retrying"
                    );
                    continue;
                }
                OpOutcome::Fatal(err) => {
                    return Err(BenchError::op(self.workload.name(), index, err));
                }
            }
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            done = stats.done,
            bytes = stats.bytes,
            elapsed_ms = stats.elapsed().map(|d| d.as_millis() as u64),
            "worker finished"
        );

        Ok(stats)
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// First index of the assigned range
    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    /// Number of operations in the assigned range
    pub fn op_count(&self) -> u64 {
        self.op_count
    }
}

impl<H> std::fmt::Debug for Worker<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("workload", &self.workload.name())
            .field("start_index", &self.start_index)
            .field("op_count", &self.op_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::traits::StoreError;
    use crate::worker::OpStats;

    struct NoopStore;

    struct RangeWorkload {
        executed: Mutex<Vec<u64>>,
        conflicts_at: Option<u64>,
        conflicts_left: AtomicU64,
        conflict_delay: Duration,
        fatal_at: Option<u64>,
    }

    impl RangeWorkload {
        fn new() -> Self {
            Self {
                executed: Mutex::new(Vec::new()),
                conflicts_at: None,
                conflicts_left: AtomicU64::new(0),
                conflict_delay: Duration::ZERO,
                fatal_at: None,
            }
        }

        fn with_conflicts(index: u64, times: u64) -> Self {
            let mut w = Self::new();
            w.conflicts_at = Some(index);
            w.conflicts_left = AtomicU64::new(times);
            w
        }

        fn with_slow_conflicts(index: u64, times: u64, delay: Duration) -> Self {
            let mut w = Self::with_conflicts(index, times);
            w.conflict_delay = delay;
            w
        }

        fn with_fatal(index: u64) -> Self {
            let mut w = Self::new();
            w.fatal_at = Some(index);
            w
        }
    }

    #[async_trait]
    impl Workload<NoopStore> for RangeWorkload {
        fn name(&self) -> &str {
            "range"
        }

        fn num_operations(&self) -> u64 {
            100
        }

        async fn set_up(&self, _store: &mut NoopStore) -> Result<(), StoreError> {
            Ok(())
        }

        async fn run_op(&self, index: u64, _store: &mut NoopStore) -> OpOutcome {
            if self.fatal_at == Some(index) {
                return OpOutcome::Fatal(StoreError::Operation("boom".into()));
            }
            if self.conflicts_at == Some(index) {
                let left = self.conflicts_left.load(Ordering::SeqCst);
                if left > 0 {
                    self.conflicts_left.store(left - 1, Ordering::SeqCst);
                    if self.conflict_delay > Duration::ZERO {
                        tokio::time::sleep(self.conflict_delay).await;
                    }
                    return OpOutcome::RetryableConflict;
                }
            }
            self.executed.lock().unwrap().push(index);
            OpOutcome::Success(OpStats::new(Duration::from_micros(1), 8))
        }

        async fn tear_down(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_worker_runs_range_in_order() {
        let workload = Arc::new(RangeWorkload::new());
        let dyn_workload: Arc<dyn Workload<NoopStore>> = workload.clone();
        let progress = Arc::new(AtomicU64::new(0));
        let worker = Worker::new(0, dyn_workload, NoopStore, 25, 25, progress);

        let stats = worker.run().await.expect("worker failed");

        assert_eq!(stats.done, 25);
        assert_eq!(stats.bytes, 25 * 8);
        let executed = workload.executed.lock().unwrap();
        assert_eq!(*executed, (25..50).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_worker_retries_conflict_invisibly() {
        let workload = Arc::new(RangeWorkload::with_conflicts(3, 5));
        let dyn_workload: Arc<dyn Workload<NoopStore>> = workload.clone();
        let progress = Arc::new(AtomicU64::new(0));
        let worker = Worker::new(0, dyn_workload, NoopStore, 0, 10, Arc::clone(&progress));

        let stats = worker.run().await.expect("worker failed");

        // Retries leave no trace in stats or progress.
        assert_eq!(stats.done, 10);
        assert_eq!(progress.load(Ordering::Relaxed), 10);
        assert_eq!(workload.conflicts_left.load(Ordering::SeqCst), 0);
        let executed = workload.executed.lock().unwrap();
        assert_eq!(*executed, (0..10).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_conflict_retries_extend_wall_clock_time() {
        let delay = Duration::from_millis(5);
        let retries = 10u32;
        let workload = Arc::new(RangeWorkload::with_slow_conflicts(
            2,
            retries as u64,
            delay,
        ));
        let dyn_workload: Arc<dyn Workload<NoopStore>> = workload.clone();
        let progress = Arc::new(AtomicU64::new(0));
        let worker = Worker::new(0, dyn_workload, NoopStore, 0, 5, progress);

        let stats = worker.run().await.expect("worker failed");

        // Each of the m retries costs at least one conflict delay, so the
        // measurement window grows with m even though the executed count
        // does not.
        assert_eq!(stats.done, 5);
        assert!(stats.elapsed().unwrap() >= delay * retries);
    }

    #[tokio::test]
    async fn test_worker_fatal_stops_immediately() {
        let workload = Arc::new(RangeWorkload::with_fatal(4));
        let dyn_workload: Arc<dyn Workload<NoopStore>> = workload.clone();
        let progress = Arc::new(AtomicU64::new(0));
        let worker = Worker::new(1, dyn_workload, NoopStore, 0, 10, progress);

        let err = worker.run().await.expect_err("expected fatal error");
        match err {
            BenchError::Op {
                workload, index, ..
            } => {
                assert_eq!(workload, "range");
                assert_eq!(index, 4);
            }
            other => panic!("unexpected error: {other}"),
        }

        // Nothing past the failing index executed.
        let executed = workload.executed.lock().unwrap();
        assert_eq!(*executed, (0..4).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_worker_empty_range() {
        let workload = Arc::new(RangeWorkload::new());
        let dyn_workload: Arc<dyn Workload<NoopStore>> = workload.clone();
        let progress = Arc::new(AtomicU64::new(0));
        let worker = Worker::new(0, dyn_workload, NoopStore, 0, 0, progress);

        let stats = worker.run().await.expect("worker failed");
        assert_eq!(stats.done, 0);
        assert!(workload.executed.lock().unwrap().is_empty());
    }
}
