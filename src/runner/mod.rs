//! Runner module: workload lifecycle orchestration
//!
//! The ThreadRunner executes every workload of a benchmark in order. For
//! each workload it:
//! - runs `set_up` once on a dedicated store handle
//! - provisions one store handle per worker (handles are never shared)
//! - launches the workers and waits for all of them to finish
//! - runs `tear_down`
//! - merges the per-worker statistics and writes the workload's result slot
//!
//! Any fatal error (setup, handle creation, a worker, teardown) aborts the
//! whole run; nothing is partially reported for the failed workload.
//!
//! # Example
//!
//! ```ignore
//! use storebench_core::{BenchReport, RunnerConfig, ThreadRunner};
//!
//! let runner = ThreadRunner::new(config, factory)?;
//! let mut report = BenchReport::with_slots(benchmark.num_workloads());
//! runner.run(&benchmark, &mut report).await?;
//! ```

mod aggregator;
mod executor;

pub use aggregator::merge_and_report;
pub use executor::ThreadRunner;
