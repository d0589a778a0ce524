//! storebench-core: concurrent benchmark-execution engine for stateful stores
//!
//! Given a sequence of configured workloads against a backing store, the
//! engine runs each workload under a fixed-size worker pool, measures
//! per-operation latency and throughput, and merges the per-worker
//! measurements into a single report record per workload. It provides:
//!
//! - Capability traits for store clients and workloads ([`StoreFactory`],
//!   [`Workload`])
//! - Per-worker statistics with a merge/report step ([`ThreadStats`])
//! - The retry-tolerant worker execution loop ([`Worker`])
//! - Workload lifecycle orchestration ([`ThreadRunner`])
//!
//! Workload definitions and concrete store clients are external: they plug in
//! through the traits and never share a store handle between workers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod benchmark;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod traits;
pub mod worker;

pub use benchmark::Benchmark;
pub use config::{ConnectionConfig, RunnerConfig};
pub use error::{BenchError, BenchResult};
pub use report::{BenchReport, WorkloadResult};
pub use runner::{merge_and_report, ThreadRunner};
pub use traits::{OpOutcome, StoreError, StoreFactory, Workload};
pub use worker::{OpStats, ThreadStats, Worker, WorkerBuilder};
