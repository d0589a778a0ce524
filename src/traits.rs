//! Core traits for store clients and workloads
//!
//! These capabilities are consumed, not implemented, by the engine:
//! concrete store clients and workload definitions live in their own crates
//! and plug in through the traits defined here.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ConnectionConfig;
use crate::worker::OpStats;

// ============================================================================
// Store handle factory
// ============================================================================

/// Factory for store handles
///
/// The engine creates one handle per worker per workload (plus a dedicated
/// setup handle) and never shares a handle between workers. Handles are
/// discarded after each workload; there is no pooling across workloads.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Concrete store handle type produced by this factory
    type Handle: Send + 'static;

    /// Create a new handle to the backing store
    async fn connect(&self, config: &ConnectionConfig) -> Result<Self::Handle, StoreError>;
}

/// Typed errors surfaced by store clients and workload lifecycle calls
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach or initialize the backing store
    #[error("connection failed: {0}")]
    Connection(String),

    /// A store operation failed
    #[error("operation failed: {0}")]
    Operation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Workload capability
// ============================================================================

/// Outcome of a single workload operation
///
/// The sole recognized transient condition is `RetryableConflict` (an
/// operation aborted by concurrent write contention); the execution loop
/// retries it in place, indefinitely, with no backoff. Everything else is
/// either success or fatal.
#[derive(Debug)]
pub enum OpOutcome {
    /// Operation completed; its measured cost
    Success(OpStats),

    /// Operation aborted by concurrent contention; retry the same index
    RetryableConflict,

    /// Non-retryable failure; aborts the run
    Fatal(StoreError),
}

/// A benchmark workload with lifecycle `set_up -> {run_op}* -> tear_down`
///
/// `set_up` runs exactly once per workload (on a dedicated handle, not a
/// worker's). `run_op` is the only method invoked from multiple worker tasks
/// concurrently; each call gets a distinct operation index and a distinct
/// store handle, and implementations must be safe under that concurrency.
#[async_trait]
pub trait Workload<H>: Send + Sync {
    /// Workload name for reporting
    fn name(&self) -> &str;

    /// Total number of operations this workload wants executed
    ///
    /// The engine truncates this to a multiple of the worker count; the
    /// remainder is never executed.
    fn num_operations(&self) -> u64;

    /// Prepare the store for the run (called once, before any worker starts)
    async fn set_up(&self, store: &mut H) -> Result<(), StoreError>;

    /// Execute the operation at `index` against `store`
    async fn run_op(&self, index: u64, store: &mut H) -> OpOutcome;

    /// Clean up after all workers have finished
    async fn tear_down(&self) -> Result<(), StoreError>;
}
