//! Run report: one result slot per workload

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};

/// Derived metrics for one completed workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadResult {
    /// Name of the workload this result belongs to
    pub workload_name: String,

    /// Total bytes transferred divided by the elapsed wall-clock window
    pub bytes_per_second: f64,

    /// Elapsed wall-clock microseconds divided by the total operation count
    pub microseconds_per_operation: f64,
}

/// Report sink for a benchmark run
///
/// Holds one slot per workload, in benchmark order. A slot is written exactly
/// once, after that workload's stats merge; on a fatal error the failed
/// workload's slot and every later slot stay unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchReport {
    results: Vec<Option<WorkloadResult>>,
}

impl BenchReport {
    /// Create a report with `n` empty slots
    pub fn with_slots(n: usize) -> Self {
        Self {
            results: vec![None; n],
        }
    }

    /// Number of slots
    pub fn num_slots(&self) -> usize {
        self.results.len()
    }

    /// Result for workload `i`, if that workload completed
    pub fn result(&self, i: usize) -> Option<&WorkloadResult> {
        self.results.get(i).and_then(|slot| slot.as_ref())
    }

    /// All slots, in benchmark order
    pub fn results(&self) -> &[Option<WorkloadResult>] {
        &self.results
    }

    /// Write the result for workload `i`
    ///
    /// # Errors
    /// Returns an error if `i` is out of bounds or the slot was already set.
    pub fn set(&mut self, i: usize, result: WorkloadResult) -> BenchResult<()> {
        let slot = self
            .results
            .get_mut(i)
            .ok_or_else(|| BenchError::config(format!("report slot {i} out of bounds")))?;
        if slot.is_some() {
            return Err(BenchError::config(format!(
                "report slot {i} written twice"
            )));
        }
        *slot = Some(result);
        Ok(())
    }
}
