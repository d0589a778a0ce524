//! Per-workload orchestration

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use crate::benchmark::Benchmark;
use crate::config::RunnerConfig;
use crate::error::{BenchError, BenchResult};
use crate::report::{BenchReport, WorkloadResult};
use crate::traits::{StoreFactory, Workload};
use crate::worker::{ThreadStats, WorkerBuilder};

use super::aggregator::merge_and_report;

/// ThreadRunner owns the full lifecycle of running a benchmark
///
/// For each workload in order: set up on a dedicated store handle, provision
/// one handle per worker, run the parallel phase, tear down, merge the
/// per-worker statistics, and write the workload's result slot. The first
/// fatal error aborts the entire run; later slots are left untouched.
pub struct ThreadRunner<H> {
    config: RunnerConfig,
    factory: Arc<dyn StoreFactory<Handle = H>>,
}

impl<H: Send + 'static> ThreadRunner<H> {
    /// Create a new runner
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: RunnerConfig,
        factory: Arc<dyn StoreFactory<Handle = H>>,
    ) -> BenchResult<Self> {
        config
            .validate()
            .map_err(|e| BenchError::config(e.to_string()))?;
        Ok(Self { config, factory })
    }

    /// Get the runner configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every workload in the benchmark, writing one result per workload
    ///
    /// `report` must have exactly one slot per workload. On success every
    /// slot is written; on a fatal error the run stops at the failing
    /// workload and its slot (and all later ones) remain unset.
    pub async fn run(&self, benchmark: &Benchmark<H>, report: &mut BenchReport) -> BenchResult<()> {
        if report.num_slots() != benchmark.num_workloads() {
            return Err(BenchError::config(format!(
                "report has {} slots for {} workloads",
                report.num_slots(),
                benchmark.num_workloads()
            )));
        }

        for i in 0..benchmark.num_workloads() {
            let workload = Arc::clone(benchmark.workload(i));
            let result = self.run_workload(workload).await?;
            report.set(i, result)?;
        }
        Ok(())
    }

    /// Run one workload through its full lifecycle and compute its result
    async fn run_workload(&self, workload: Arc<dyn Workload<H>>) -> BenchResult<WorkloadResult> {
        let name = workload.name().to_string();
        let num_threads = self.config.num_threads;
        // Truncating division: `num_operations % num_threads` trailing
        // indices are never executed. This is the intended boundary policy.
        let op_per_thread = workload.num_operations() / num_threads as u64;

        tracing::info!(
            workload = %name,
            num_threads,
            num_operations = workload.num_operations(),
            op_per_thread,
            "starting workload"
        );

        // Setup runs once, on its own handle, before any worker exists.
        let mut setup_store = self.connect(&name).await?;
        workload
            .set_up(&mut setup_store)
            .await
            .map_err(|e| BenchError::set_up(&name, e))?;
        drop(setup_store);

        // One handle per worker; any creation failure aborts before launch.
        let mut stores = Vec::with_capacity(num_threads);
        for _ in 0..num_threads {
            stores.push(self.connect(&name).await?);
        }

        let start = Instant::now();
        let progress = Arc::new(AtomicU64::new(0));
        let mut handles = Vec::with_capacity(num_threads);
        for (t, store) in stores.into_iter().enumerate() {
            let worker = WorkerBuilder::new(t)
                .workload(Arc::clone(&workload))
                .store(store)
                .range(op_per_thread * t as u64, op_per_thread)
                .progress(Arc::clone(&progress))
                .build()?;
            handles.push(tokio::spawn(worker.run()));
        }

        // Join every worker before deciding the outcome: in-flight workers
        // run their range to completion (or fail on their own) even after
        // another worker has already failed.
        let mut stats_list: Vec<ThreadStats> = Vec::with_capacity(num_threads);
        let mut first_error: Option<BenchError> = None;
        for (t, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(Ok(stats)) => stats_list.push(stats),
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    first_error
                        .get_or_insert_with(|| BenchError::worker(format!("worker {t}: {e}")));
                }
            }
        }

        // Teardown is skipped on worker failure; a store that needs explicit
        // release will leak its handles here.
        if let Some(err) = first_error {
            return Err(err);
        }

        workload
            .tear_down()
            .await
            .map_err(|e| BenchError::tear_down(&name, e))?;

        let result = merge_and_report(&name, stats_list);
        tracing::info!(
            workload = %name,
            elapsed_secs = start.elapsed().as_secs_f64(),
            bytes_per_second = result.bytes_per_second,
            microseconds_per_operation = result.microseconds_per_operation,
            "workload finished"
        );
        Ok(result)
    }

    /// Create one store handle, attributing failures to the current workload
    async fn connect(&self, workload_name: &str) -> BenchResult<H> {
        self.factory
            .connect(&self.config.connection)
            .await
            .map_err(|e| BenchError::connect(workload_name, e))
    }
}

impl<H> std::fmt::Debug for ThreadRunner<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadRunner")
            .field("config", &self.config)
            .finish()
    }
}
