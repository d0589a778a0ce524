//! Worker module for executing workload operation ranges
//!
//! The Worker is the core execution unit of the engine. Each workload run
//! spawns one Worker per configured thread; worker `t` owns store handle `t`
//! and the contiguous operation-index range
//! `[op_per_thread * t, op_per_thread * (t + 1))`. The loop it runs is:
//!
//! 1. `run_op(index, own store handle)`
//! 2. On success: advance the index, bump the shared progress counter, fold
//!    the operation's cost into this worker's `ThreadStats`
//! 3. On a retryable conflict: retry the same index immediately, forever
//! 4. On any other failure: stop and propagate (the run aborts)
//!
//! # Example
//!
//! ```ignore
//! use storebench_core::{Worker, WorkerBuilder};
//!
//! let worker = WorkerBuilder::new(0)
//!     .workload(workload)
//!     .store(store)
//!     .range(0, 25)
//!     .progress(progress)
//!     .build()?;
//!
//! let stats = tokio::spawn(worker.run()).await??;
//! println!("done: {}", stats.done);
//! ```

mod builder;
mod executor;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use stats::{OpStats, ThreadStats};
