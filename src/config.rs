//! Runner configuration types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Connection configuration for the backing store
///
/// Opaque to the engine: it is handed, unchanged, to the store factory for
/// every handle created during a run. One value is shared across the setup
/// handle and all per-worker handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Store endpoint (connection string, file path, or URL, factory-defined)
    pub uri: String,

    /// Backend-specific options passed through to the factory
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub options: HashMap<String, String>,
}

impl ConnectionConfig {
    /// Create a config pointing at the given endpoint
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            options: HashMap::new(),
        }
    }

    /// Add a backend-specific option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Configuration for a benchmark run
///
/// Defines how workloads are executed: how to reach the store and how many
/// concurrent workers drive each workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Store connection configuration, shared by all handle creations
    pub connection: ConnectionConfig,

    /// Number of concurrent worker tasks per workload
    pub num_threads: usize,
}

impl RunnerConfig {
    /// Create a new config with the given connection and worker count
    pub fn new(connection: ConnectionConfig, num_threads: usize) -> Self {
        Self {
            connection,
            num_threads,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_threads == 0 {
            return Err(ConfigError::InvalidNumThreads(
                "num_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid num_threads: {0}")]
    InvalidNumThreads(String),
}
