//! Workloads that drive the PH-Tree through its public API.
//!
//! - [`bench`]: bulk insert, search and removal of random keys, timed.
//! - [`demo`]: a fixed lookup scenario followed by concurrent tasks.
//!
//! Both are plain callers of [`PhTree`](crate::data_structures::PhTree) and
//! are shared by the `phtree` binary, the integration tests and the benches.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod bench;
pub mod demo;

pub use bench::{run_benchmark, BenchReport};
pub use demo::{run_demo, DemoReport, Lookup, TaskOutcome};

/// Builds the workload RNG, deterministic when a seed is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generates a key of `dimensions` uniformly random components.
pub fn random_key<R: Rng + ?Sized>(rng: &mut R, dimensions: usize) -> Vec<u64> {
    (0..dimensions).map(|_| rng.gen()).collect()
}

/// Generates a key of `len` components drawn from `0..range`.
pub fn random_bounded_key<R: Rng + ?Sized>(rng: &mut R, len: usize, range: u64) -> Vec<u64> {
    (0..len).map(|_| rng.gen_range(0..range)).collect()
}

fn as_millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1_000.0
}
