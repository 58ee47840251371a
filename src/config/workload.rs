//! Workload configuration module.
//!
//! Settings for the benchmark and demonstration programs that drive the
//! PH-Tree through its public API.

use super::{validate_max_depth, ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Benchmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Number of components per generated key
    pub dimensions: usize,

    /// Number of keys inserted and later removed
    pub points: usize,

    /// Number of random lookups
    pub queries: usize,

    /// Maximum descent depth of the benchmarked tree
    pub max_depth: usize,

    /// Seed for key generation (random when unset)
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dimensions: 4,
            points: 1_000_000,
            queries: 10_000,
            max_depth: 16,
            seed: None,
        }
    }
}

impl Validate for BenchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.dimensions == 0 {
            return Err(ConfigError::ValidationError(
                "bench.dimensions must be greater than 0".to_string(),
            ));
        }

        if self.points == 0 {
            return Err(ConfigError::ValidationError(
                "bench.points must be greater than 0".to_string(),
            ));
        }

        if self.queries == 0 {
            return Err(ConfigError::ValidationError(
                "bench.queries must be greater than 0".to_string(),
            ));
        }

        validate_max_depth("bench.max_depth", self.max_depth)
    }
}

/// Demonstration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Maximum descent depth of the demo tree
    pub max_depth: usize,

    /// Number of concurrent tasks in the second phase
    pub tasks: usize,

    /// Key components are drawn from `0..key_range`
    pub key_range: u64,

    /// Number of components per generated key
    pub key_len: usize,

    /// Upper bound of the pause between a task's insert and its search
    pub max_delay_ms: u64,

    /// Worker threads of the tokio runtime driving the tasks
    pub worker_threads: usize,

    /// Seed for key generation (random when unset)
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            tasks: 10,
            key_range: 5,
            key_len: 3,
            max_delay_ms: 100,
            worker_threads: num_cpus::get(),
            seed: None,
        }
    }
}

impl Validate for DemoConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.tasks == 0 {
            return Err(ConfigError::ValidationError(
                "demo.tasks must be greater than 0".to_string(),
            ));
        }

        if self.key_range == 0 {
            return Err(ConfigError::ValidationError(
                "demo.key_range must be greater than 0".to_string(),
            ));
        }

        if self.key_len == 0 {
            return Err(ConfigError::ValidationError(
                "demo.key_len must be greater than 0".to_string(),
            ));
        }

        if self.worker_threads == 0 {
            return Err(ConfigError::ValidationError(
                "demo.worker_threads must be greater than 0".to_string(),
            ));
        }

        validate_max_depth("demo.max_depth", self.max_depth)
    }
}
