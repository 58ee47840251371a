//! Bulk insert/search/remove benchmark over random keys.

use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::{as_millis, random_key, seeded_rng};
use crate::config::{BenchConfig, Validate};
use crate::data_structures::{PhTree, TreeStats};
use crate::error::AppResult;

/// Timings and counters from one benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// Number of keys inserted and removed
    pub points: usize,
    /// Number of random lookups performed
    pub queries: usize,
    /// Components per key
    pub dimensions: usize,
    /// Maximum descent depth of the tree
    pub max_depth: usize,
    /// Wall time of the insert phase in milliseconds
    pub insert_ms: f64,
    /// Wall time of the search phase in milliseconds
    pub search_ms: f64,
    /// Wall time of the remove phase in milliseconds
    pub remove_ms: f64,
    /// Lookups that found an entry
    pub hits: usize,
    /// Tree shape once every point was inserted
    pub loaded: TreeStats,
    /// Entries left after the remove phase
    pub remaining: usize,
}

/// Runs the benchmark described by `config`.
///
/// The tree is checked for structural consistency after the remove phase.
#[tracing::instrument(skip_all, fields(points = config.points, queries = config.queries))]
pub fn run_benchmark(config: &BenchConfig) -> AppResult<BenchReport> {
    config.validate()?;

    let mut rng = seeded_rng(config.seed);
    let data: Vec<Vec<u64>> = (0..config.points)
        .map(|_| random_key(&mut rng, config.dimensions))
        .collect();

    let tree = PhTree::<()>::with_max_depth(config.max_depth);

    let start = Instant::now();
    for point in &data {
        tree.insert(point.as_slice(), ());
    }
    let insert_ms = as_millis(start.elapsed());
    info!("Insertion of {} points took {:.3} ms", config.points, insert_ms);

    let loaded = tree.stats();

    let queries: Vec<Vec<u64>> = (0..config.queries)
        .map(|_| random_key(&mut rng, config.dimensions))
        .collect();

    let start = Instant::now();
    let hits = queries.iter().filter(|query| tree.contains(query)).count();
    let search_ms = as_millis(start.elapsed());
    info!("Search of {} queries took {:.3} ms", config.queries, search_ms);

    let start = Instant::now();
    for point in &data {
        tree.remove(point);
    }
    let remove_ms = as_millis(start.elapsed());
    info!("Removal of {} points took {:.3} ms", config.points, remove_ms);

    tree.validate()?;

    Ok(BenchReport {
        points: config.points,
        queries: config.queries,
        dimensions: config.dimensions,
        max_depth: config.max_depth,
        insert_ms,
        search_ms,
        remove_ms,
        hits,
        loaded,
        remaining: tree.len(),
    })
}
