//! Error types for storebench-core

use thiserror::Error;

use crate::traits::StoreError;

/// Core error type for a benchmark run
///
/// Every fatal condition surfaces through this type; nothing at this layer is
/// logged and swallowed. The workload name is carried so a failed run reports
/// which workload caused the abort.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Store handle creation failed
    #[error("connecting store for workload `{workload}` failed: {source}")]
    Connect {
        /// Workload that needed the handle
        workload: String,
        /// Underlying store error
        source: StoreError,
    },

    /// Workload setup failed
    #[error("setup of workload `{workload}` failed: {source}")]
    SetUp {
        /// Workload being set up
        workload: String,
        /// Underlying store error
        source: StoreError,
    },

    /// Workload teardown failed
    #[error("teardown of workload `{workload}` failed: {source}")]
    TearDown {
        /// Workload being torn down
        workload: String,
        /// Underlying store error
        source: StoreError,
    },

    /// A non-retryable operation failure observed by a worker
    #[error("workload `{workload}` operation {index} failed: {source}")]
    Op {
        /// Workload whose operation failed
        workload: String,
        /// Operation index that failed
        index: u64,
        /// Underlying store error
        source: StoreError,
    },

    /// Worker task failure (join error / panic)
    #[error("worker error: {0}")]
    Worker(String),
}

impl BenchError {
    /// Configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        BenchError::Config(msg.into())
    }

    /// Missing required builder field
    pub fn missing_field(field: &str) -> Self {
        BenchError::Config(format!("missing required field: {field}"))
    }

    /// Handle creation failure for a workload
    pub fn connect(workload: impl Into<String>, source: StoreError) -> Self {
        BenchError::Connect {
            workload: workload.into(),
            source,
        }
    }

    /// Setup failure for a workload
    pub fn set_up(workload: impl Into<String>, source: StoreError) -> Self {
        BenchError::SetUp {
            workload: workload.into(),
            source,
        }
    }

    /// Teardown failure for a workload
    pub fn tear_down(workload: impl Into<String>, source: StoreError) -> Self {
        BenchError::TearDown {
            workload: workload.into(),
            source,
        }
    }

    /// Fatal operation failure at a specific index
    pub fn op(workload: impl Into<String>, index: u64, source: StoreError) -> Self {
        BenchError::Op {
            workload: workload.into(),
            index,
            source,
        }
    }

    /// Worker task failure
    pub fn worker(msg: impl Into<String>) -> Self {
        BenchError::Worker(msg.into())
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;
