//! PH-Tree Library
//!
//! A concurrent, depth-bounded index mapping vectors of `u64` components
//! to arbitrary values, together with the configuration, error reporting
//! and workload code used by the `phtree` binary.
//!
//! # Architecture
//!
//! - [`data_structures::ph_tree`]: the tree engine (nodes, entries, locking)
//! - [`config`]: layered configuration for the workloads and logging
//! - [`error`]: application errors and error reporting
//! - [`workload`]: benchmark and demonstration callers of the tree API

pub mod config;
pub mod data_structures;
pub mod error;
pub mod workload;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the PH-Tree crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing-backed error reporter.
pub fn init() {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
}
