//! Builder pattern for Worker construction

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::error::{BenchError, BenchResult};
use crate::traits::Workload;

use super::executor::Worker;

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(t)
///     .workload(Arc::clone(&workload))
///     .store(store)
///     .range(op_per_thread * t as u64, op_per_thread)
///     .progress(Arc::clone(&progress))
///     .build()?;
/// ```
pub struct WorkerBuilder<H> {
    id: usize,
    workload: Option<Arc<dyn Workload<H>>>,
    store: Option<H>,
    start_index: Option<u64>,
    op_count: Option<u64>,
    progress: Option<Arc<AtomicU64>>,
}

impl<H: Send + 'static> WorkerBuilder<H> {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            workload: None,
            store: None,
            start_index: None,
            op_count: None,
            progress: None,
        }
    }

    /// Set the workload to execute
    pub fn workload(mut self, workload: Arc<dyn Workload<H>>) -> Self {
        self.workload = Some(workload);
        self
    }

    /// Set the store handle (exclusively owned by this worker)
    pub fn store(mut self, store: H) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the assigned operation-index range as (start, count)
    pub fn range(mut self, start_index: u64, op_count: u64) -> Self {
        self.start_index = Some(start_index);
        self.op_count = Some(op_count);
        self
    }

    /// Set the shared progress counter
    pub fn progress(mut self, progress: Arc<AtomicU64>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> BenchResult<Worker<H>> {
        let workload = self
            .workload
            .ok_or_else(|| BenchError::missing_field("workload"))?;
        let store = self.store.ok_or_else(|| BenchError::missing_field("store"))?;
        let start_index = self
            .start_index
            .ok_or_else(|| BenchError::missing_field("range"))?;
        let op_count = self
            .op_count
            .ok_or_else(|| BenchError::missing_field("range"))?;
        let progress = self
            .progress
            .ok_or_else(|| BenchError::missing_field("progress"))?;

        Ok(Worker::new(
            self.id,
            workload,
            store,
            start_index,
            op_count,
            progress,
        ))
    }
}
