//! Benchmark, an ordered collection of workloads

use std::sync::Arc;

use crate::traits::Workload;

/// Ordered collection of workload instances to run
///
/// Workload `i` reports into slot `i` of the run's [`BenchReport`](crate::BenchReport).
pub struct Benchmark<H> {
    workloads: Vec<Arc<dyn Workload<H>>>,
}

impl<H> Benchmark<H> {
    /// Create an empty benchmark
    pub fn new() -> Self {
        Self {
            workloads: Vec::new(),
        }
    }

    /// Append a workload
    pub fn push(&mut self, workload: Arc<dyn Workload<H>>) {
        self.workloads.push(workload);
    }

    /// Number of workloads in this benchmark
    pub fn num_workloads(&self) -> usize {
        self.workloads.len()
    }

    /// Whether the benchmark has no workloads
    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    /// Workload at index `i`
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    pub fn workload(&self, i: usize) -> &Arc<dyn Workload<H>> {
        &self.workloads[i]
    }
}

impl<H> Default for Benchmark<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> From<Vec<Arc<dyn Workload<H>>>> for Benchmark<H> {
    fn from(workloads: Vec<Arc<dyn Workload<H>>>) -> Self {
        Self { workloads }
    }
}

impl<H> std::fmt::Debug for Benchmark<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.workloads.iter().map(|w| w.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::traits::{OpOutcome, StoreError};
    use crate::worker::OpStats;

    struct NamedWorkload(&'static str);

    #[async_trait]
    impl Workload<()> for NamedWorkload {
        fn name(&self) -> &str {
            self.0
        }

        fn num_operations(&self) -> u64 {
            1
        }

        async fn set_up(&self, _store: &mut ()) -> Result<(), StoreError> {
            Ok(())
        }

        async fn run_op(&self, _index: u64, _store: &mut ()) -> OpOutcome {
            OpOutcome::Success(OpStats::default())
        }

        async fn tear_down(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_benchmark_ordering() {
        let mut benchmark = Benchmark::<()>::new();
        assert!(benchmark.is_empty());

        benchmark.push(Arc::new(NamedWorkload("fill")));
        benchmark.push(Arc::new(NamedWorkload("read")));

        assert_eq!(benchmark.num_workloads(), 2);
        assert_eq!(benchmark.workload(0).name(), "fill");
        assert_eq!(benchmark.workload(1).name(), "read");
    }

    #[test]
    fn test_benchmark_from_vec() {
        let workloads: Vec<Arc<dyn Workload<()>>> = vec![Arc::new(NamedWorkload("only"))];
        let benchmark = Benchmark::from(workloads);
        assert_eq!(benchmark.num_workloads(), 1);
    }

    #[test]
    fn test_benchmark_debug_lists_names() {
        let mut benchmark = Benchmark::<()>::new();
        benchmark.push(Arc::new(NamedWorkload("fill")));
        let debug = format!("{:?}", benchmark);
        assert!(debug.contains("fill"));
    }
}
