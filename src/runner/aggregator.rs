//! Merging per-worker statistics into one workload result

use crate::report::WorkloadResult;
use crate::worker::ThreadStats;

/// Merge all workers' statistics and compute the workload's result
///
/// Runs strictly after every worker has been joined, so no synchronization is
/// involved. `ThreadStats::merge` is commutative and associative; the fold
/// order does not affect the reported metrics.
pub fn merge_and_report(workload_name: &str, stats_list: Vec<ThreadStats>) -> WorkloadResult {
    let mut merged = ThreadStats::new();
    for stats in &stats_list {
        merged.merge(stats);
    }
    merged.report(workload_name)
}
