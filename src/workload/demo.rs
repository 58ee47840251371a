//! Demonstration of the PH-Tree API.
//!
//! Phase one stores a few fixed keys, looks them up (plus one absent key),
//! removes one and looks it up again. Phase two runs concurrent tokio tasks
//! that each insert a random key, pause, search it and remove it.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::{random_bounded_key, seeded_rng};
use crate::config::{DemoConfig, Validate};
use crate::data_structures::PhTree;
use crate::error::{AppError, AppResult};

/// Keys and values stored by the fixed phase.
pub const FIXED_ENTRIES: [([u64; 3], &str); 4] = [
    ([0, 1, 2], "apple"),
    ([0, 1, 3], "banana"),
    ([1, 2, 3], "orange"),
    ([1, 2, 4], "grape"),
];

/// Keys looked up by the fixed phase. The last one is never stored.
pub const PROBE_KEYS: [[u64; 3]; 5] = [[0, 1, 2], [0, 1, 3], [1, 2, 3], [1, 2, 4], [1, 2, 5]];

/// Key removed by the fixed phase.
pub const REMOVED_KEY: [u64; 3] = [0, 1, 3];

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    /// Key searched for
    pub key: Vec<u64>,
    /// Value found, if any
    pub value: Option<String>,
}

/// What one concurrent task did.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOutcome {
    /// Task index
    pub task: usize,
    /// Randomly chosen key
    pub key: Vec<u64>,
    /// Value the task inserted
    pub inserted: String,
    /// Value seen by the task's search; another task may own it
    pub found: Option<String>,
    /// Value taken out by the task's remove
    pub removed: Option<String>,
}

/// Everything the demonstration observed.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Lookups of [`PROBE_KEYS`] after the fixed inserts
    pub lookups: Vec<Lookup>,
    /// Lookup of [`REMOVED_KEY`] after its removal
    pub after_removal: Lookup,
    /// One outcome per concurrent task, in task order
    pub tasks: Vec<TaskOutcome>,
    /// Entries left once every task finished
    pub remaining: usize,
}

fn lookup(tree: &PhTree<String>, key: &[u64]) -> Lookup {
    let value = tree.search(key);
    match &value {
        Some(value) => info!("Key {:?} found with value: {}", key, value),
        None => info!("Key {:?} not found", key),
    }
    Lookup {
        key: key.to_vec(),
        value,
    }
}

/// Runs the demonstration described by `config`.
///
/// Must be called from within a tokio runtime.
#[tracing::instrument(skip_all, fields(tasks = config.tasks))]
pub async fn run_demo(config: &DemoConfig) -> AppResult<DemoReport> {
    config.validate()?;

    let tree = Arc::new(PhTree::<String>::with_max_depth(config.max_depth));

    for (key, value) in FIXED_ENTRIES {
        tree.insert(key, value.to_string());
    }

    let lookups = PROBE_KEYS.iter().map(|key| lookup(&tree, key)).collect();

    tree.remove(REMOVED_KEY);
    info!("Removed key {:?}", REMOVED_KEY);
    let after_removal = lookup(&tree, &REMOVED_KEY);

    let mut rng = seeded_rng(config.seed);
    let handles: Vec<_> = (0..config.tasks)
        .map(|task| {
            let key = random_bounded_key(&mut rng, config.key_len, config.key_range);
            let inserted = format!("value-{}", rng.gen_range(0..100));
            let delay = Duration::from_millis(rng.gen_range(0..=config.max_delay_ms));
            let tree = Arc::clone(&tree);

            tokio::spawn(async move {
                tree.insert(key.as_slice(), inserted.clone());
                debug!(task, ?key, %inserted, "inserted");

                tokio::time::sleep(delay).await;

                let found = tree.search(&key);
                debug!(task, ?key, ?found, "searched");

                let removed = tree.remove(&key);
                debug!(task, ?key, "removed");

                TaskOutcome {
                    task,
                    key,
                    inserted,
                    found,
                    removed,
                }
            })
        })
        .collect();

    let tasks = futures::future::try_join_all(handles)
        .await
        .map_err(|e| AppError::Runtime(format!("demo task failed: {e}")))?;

    tree.validate()?;

    Ok(DemoReport {
        lookups,
        after_removal,
        tasks,
        remaining: tree.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_phase_lookups() {
        let config = DemoConfig {
            tasks: 1,
            max_delay_ms: 0,
            seed: Some(3),
            ..DemoConfig::default()
        };
        let report = run_demo(&config).await.unwrap();

        let values: Vec<_> = report.lookups.iter().map(|l| l.value.as_deref()).collect();
        assert_eq!(
            values,
            vec![
                Some("apple"),
                Some("banana"),
                Some("orange"),
                Some("grape"),
                None
            ]
        );
        assert_eq!(report.after_removal.value, None);
        // Only the three surviving fixed entries remain.
        assert_eq!(report.remaining, 3);
    }
}
