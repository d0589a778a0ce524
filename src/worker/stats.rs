//! Per-worker statistics tracking

use std::time::{Duration, Instant};

use crate::report::WorkloadResult;

/// How often coarse progress is logged, in completed operations
pub(crate) const PROGRESS_LOG_INTERVAL: u64 = 1000;

/// Measured cost of one completed operation
///
/// Produced by a workload's `run_op`, read once to update a `ThreadStats`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpStats {
    /// Wall time the operation took
    pub elapsed: Duration,

    /// Bytes transferred by the operation
    pub transferred_bytes: u64,
}

impl OpStats {
    /// Create stats for one operation
    pub fn new(elapsed: Duration, transferred_bytes: u64) -> Self {
        Self {
            elapsed,
            transferred_bytes,
        }
    }
}

/// Statistics accumulated by each worker
///
/// Mutated only by its owning worker between `start` and `stop`; merged
/// single-threaded after every worker has returned.
#[derive(Debug, Default, Clone)]
pub struct ThreadStats {
    /// Number of completed operations
    pub done: u64,

    /// Cumulative bytes transferred
    pub bytes: u64,

    /// Sum of per-operation wall times (not used for rate metrics)
    pub accumulated_op_time: Duration,

    /// Start of this worker's measurement window
    pub started_at: Option<Instant>,

    /// End of this worker's measurement window
    pub ended_at: Option<Instant>,
}

impl ThreadStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the beginning of the measurement window
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Record the end of the measurement window
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Fold one completed operation into the running totals
    ///
    /// `approx_total_done` is the shared, approximate count of operations
    /// completed by all workers of the current workload; it only drives
    /// coarse progress logging.
    pub fn update(&mut self, op_stats: &OpStats, approx_total_done: u64) {
        self.done += 1;
        self.bytes += op_stats.transferred_bytes;
        self.accumulated_op_time += op_stats.elapsed;

        if approx_total_done % PROGRESS_LOG_INTERVAL == 0 {
            tracing::debug!(approx_total_done, "progress");
        }
    }

    /// Elapsed measurement window
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }

    /// Merge another worker's fully-stopped statistics into this one
    ///
    /// Counters add; the window takes min(start) / max(stop), so the elapsed
    /// time used for rate computation is the wall-clock span of the slowest
    /// worker, not a sum (workers run concurrently). Commutative and
    /// associative, so merge order does not affect the reported metrics.
    pub fn merge(&mut self, other: &ThreadStats) {
        self.done += other.done;
        self.bytes += other.bytes;
        self.accumulated_op_time += other.accumulated_op_time;
        self.started_at = match (self.started_at, other.started_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.ended_at = match (self.ended_at, other.ended_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Compute the reported metrics for a workload
    ///
    /// bytes/s is total bytes over the elapsed window; µs/op is the elapsed
    /// window over the operation count. Zero operations or an empty window
    /// report 0.0 for both rather than dividing by zero.
    pub fn report(&self, workload_name: &str) -> WorkloadResult {
        let elapsed_secs = self.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.0);
        let (bytes_per_second, microseconds_per_operation) =
            if self.done == 0 || elapsed_secs <= 0.0 {
                (0.0, 0.0)
            } else {
                (
                    self.bytes as f64 / elapsed_secs,
                    elapsed_secs * 1_000_000.0 / self.done as f64,
                )
            };

        tracing::info!(
            workload = workload_name,
            done = self.done,
            bytes = self.bytes,
            elapsed_secs,
            bytes_per_second,
            microseconds_per_operation,
            "workload report"
        );

        WorkloadResult {
            workload_name: workload_name.to_string(),
            bytes_per_second,
            microseconds_per_operation,
        }
    }
}
