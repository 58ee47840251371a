// Copyright (c) 2025 PH-Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! PH-Tree Implementation
//!
//! A concurrent, depth-bounded index mapping vectors of `u64` components to
//! arbitrary values. Each level consumes one key component and branches on
//! its least-significant bit; descent stops when the key is exhausted or
//! the configured maximum depth is reached, and the entry is stored at that
//! node. Keys that share a truncated branch path are still told apart by
//! full-key equality.
//!
//! # Concurrency
//!
//! All operations go through a single reader/writer lock around the root.
//! Inserts and removals are fully serialized; searches share the lock and
//! never observe a half-mutated path.
//!
//! # Example
//!
//! ```
//! use phtree_lib::data_structures::ph_tree::PhTree;
//!
//! let tree = PhTree::with_max_depth(8);
//! tree.insert([0, 1, 2], "apple");
//! tree.insert([0, 1, 3], "banana");
//!
//! assert_eq!(tree.search([0, 1, 2]), Some("apple"));
//! assert_eq!(tree.search([1, 2, 5]), None);
//!
//! tree.remove([0, 1, 3]);
//! assert_eq!(tree.search([0, 1, 3]), None);
//! ```

mod config;
mod error;
mod key;
mod node;

use parking_lot::RwLock;
use serde::Serialize;

pub use config::{DuplicatePolicy, PhTreeConfig, DEFAULT_MAX_DEPTH};
pub use error::{PhTreeError, PhTreeResult};
use node::Node;

/// Shape of a PH-Tree at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Number of stored entries
    pub entries: usize,
    /// Number of nodes, root included
    pub nodes: usize,
    /// Depth of the deepest node
    pub deepest: usize,
}

/// PH-Tree is a binary key-vector trie safe for concurrent use.
///
/// # Type Parameters
///
/// * `V` - Type of the stored values. The tree never inspects them.
#[derive(Debug)]
pub struct PhTree<V> {
    /// The root node; created with the tree and never replaced
    root: RwLock<Node<V>>,

    /// Configuration options
    config: PhTreeConfig,
}

impl<V> PhTree<V> {
    /// Creates a new empty `PhTree` with default configuration.
    pub fn new() -> Self {
        Self::with_config(PhTreeConfig::default())
    }

    /// Creates a new empty `PhTree` that stops descending at `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::with_config(PhTreeConfig::new().with_max_depth(max_depth))
    }

    /// Creates a new empty `PhTree` with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the tree.
    pub fn with_config(config: PhTreeConfig) -> Self {
        tracing::debug!(
            max_depth = config.max_depth(),
            policy = ?config.duplicate_policy(),
            "creating PH-Tree"
        );
        Self {
            root: RwLock::new(Node::new()),
            config,
        }
    }

    /// Returns the configured maximum depth.
    pub fn max_depth(&self) -> usize {
        self.config.max_depth()
    }

    /// Returns the configuration the tree was built with.
    pub fn config(&self) -> &PhTreeConfig {
        &self.config
    }

    /// Inserts a key-value pair into the tree.
    ///
    /// Under [`DuplicatePolicy::Append`] an equal key is never overwritten; a
    /// second entry is stored behind the first.
    ///
    /// # Arguments
    ///
    /// * `key` - The key components.
    /// * `value` - The value to associate with the key.
    ///
    /// # Returns
    ///
    /// The displaced value under [`DuplicatePolicy::Replace`], `None` otherwise.
    pub fn insert<K>(&self, key: K, value: V) -> Option<V>
    where
        K: Into<Vec<u64>>,
    {
        let key = key.into().into_boxed_slice();
        let mut root = self.root.write();
        root.insert(
            key,
            value,
            self.config.max_depth(),
            self.config.duplicate_policy(),
        )
    }

    /// Looks up `key` and maps the first matching value through `f`.
    ///
    /// Useful when `V` is not `Clone`. `f` runs while the read lock is held.
    pub fn search_with<K, R, F>(&self, key: K, f: F) -> Option<R>
    where
        K: AsRef<[u64]>,
        F: FnOnce(&V) -> R,
    {
        let root = self.root.read();
        root.search(key.as_ref(), self.config.max_depth()).map(f)
    }

    /// Checks if a key exists in the tree.
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: AsRef<[u64]>,
    {
        self.search_with(key, |_| ()).is_some()
    }

    /// Removes the first entry whose key equals `key`.
    ///
    /// Absent keys are a no-op. Subtrees left empty are pruned.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if the key was not found.
    pub fn remove<K>(&self, key: K) -> Option<V>
    where
        K: AsRef<[u64]>,
    {
        let mut root = self.root.write();
        root.remove(key.as_ref(), self.config.max_depth())
    }

    /// Returns the number of stored entries.
    ///
    /// This walks the entire tree, so it's an O(n) operation.
    pub fn len(&self) -> usize {
        self.stats().entries
    }

    /// Checks if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.read().is_empty()
    }

    /// Drops every entry and child node. The root itself is kept.
    pub fn clear(&self) {
        self.root.write().clear();
        tracing::debug!("PH-Tree cleared");
    }

    /// Collects entry, node and depth counts in a single pass.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.root.read().collect_stats(&mut stats);
        stats
    }

    /// Scans the whole tree for structural consistency.
    ///
    /// Every non-root node must hold entries or children, every entry must
    /// sit at its termination node on its own branch path, and no node may
    /// lie deeper than the maximum depth.
    pub fn validate(&self) -> PhTreeResult<()> {
        let root = self.root.read();
        let result = root.validate(self.config.max_depth());
        if let Err(e) = &result {
            tracing::warn!(error = %e, "PH-Tree structure check failed");
        }
        result
    }
}

impl<V: Clone> PhTree<V> {
    /// Searches for a key and returns a clone of the associated value.
    ///
    /// With duplicate keys the first stored entry wins.
    ///
    /// # Returns
    ///
    /// The value, or `None` if no entry with an equal key exists.
    pub fn search<K>(&self, key: K) -> Option<V>
    where
        K: AsRef<[u64]>,
    {
        self.search_with(key, V::clone)
    }
}

impl<V> Default for PhTree<V> {
    fn default() -> Self {
        Self::new()
    }
}
