// Copyright (c) 2025 PH-Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the PH-Tree.
//!
//! A node is a binary branching unit. While a key is being descended the
//! node acts as a branch; at the key's termination depth it acts as an
//! entry bucket. Children are owned exclusively, so whoever holds `&mut`
//! access to a node holds it for the whole subtree below.

use super::config::DuplicatePolicy;
use super::error::{PhTreeError, PhTreeResult};
use super::key::{branch_index, is_terminal, FANOUT};
use super::TreeStats;

/// A stored `(key, value)` pair.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    key: Box<[u64]>,
    value: V,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: Box<[u64]>, value: V) -> Self {
        Self { key, value }
    }

    /// Full-key equality: same length and same components in order.
    #[inline]
    pub(crate) fn matches(&self, key: &[u64]) -> bool {
        *self.key == *key
    }
}

/// A node in the PH-Tree.
#[derive(Debug)]
pub(crate) struct Node<V> {
    /// Child slots selected by the low bit of the key component at this depth
    children: [Option<Box<Node<V>>>; FANOUT],

    /// Entries whose descent terminated at this node, in insertion order
    entries: Vec<Entry<V>>,
}

impl<V> Node<V> {
    /// Creates a node with no children and no entries.
    pub(crate) fn new() -> Self {
        Self {
            children: [None, None],
            entries: Vec::new(),
        }
    }

    /// A node is empty when it has neither entries nor children.
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.children.iter().all(Option::is_none)
    }

    /// Inserts `value` under `key`, creating nodes along the path as needed.
    ///
    /// Returns the displaced value when `policy` is [`DuplicatePolicy::Replace`]
    /// and an equal key was already stored at the termination node.
    pub(crate) fn insert(
        &mut self,
        key: Box<[u64]>,
        value: V,
        max_depth: usize,
        policy: DuplicatePolicy,
    ) -> Option<V> {
        let mut node = self;
        let mut depth = 0;

        while !is_terminal(key.len(), depth, max_depth) {
            let slot = &mut node.children[branch_index(&key, depth)];
            node = &mut **slot.get_or_insert_with(|| Box::new(Node::new()));
            depth += 1;
        }

        if policy == DuplicatePolicy::Replace {
            if let Some(entry) = node.entries.iter_mut().find(|e| e.matches(&key)) {
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }

        node.entries.push(Entry::new(key, value));
        None
    }

    /// Returns the value of the first entry equal to `key`.
    pub(crate) fn search(&self, key: &[u64], max_depth: usize) -> Option<&V> {
        let mut node = self;
        let mut depth = 0;

        while !is_terminal(key.len(), depth, max_depth) {
            node = node.children[branch_index(key, depth)].as_deref()?;
            depth += 1;
        }

        node.entries
            .iter()
            .find(|e| e.matches(key))
            .map(|e| &e.value)
    }

    /// Follows `key` for `levels` steps below this node.
    fn descend_mut(&mut self, key: &[u64], levels: usize) -> Option<&mut Node<V>> {
        let mut node = self;
        for depth in 0..levels {
            node = node.children[branch_index(key, depth)].as_deref_mut()?;
        }
        Some(node)
    }

    /// Removes the first entry equal to `key`.
    ///
    /// When the termination node is left without entries and without
    /// children, the whole chain of nodes that only led to it is detached
    /// from its deepest surviving ancestor. The root is never detached.
    pub(crate) fn remove(&mut self, key: &[u64], max_depth: usize) -> Option<V> {
        let mut node: &Node<V> = self;
        let mut depth = 0;
        // Depth of the deepest node on the path that must survive the removal.
        let mut cut = 0;

        while !is_terminal(key.len(), depth, max_depth) {
            let bit = branch_index(key, depth);
            if depth == 0 || !node.entries.is_empty() || node.children[bit ^ 1].is_some() {
                cut = depth;
            }
            node = node.children[bit].as_deref()?;
            depth += 1;
        }

        let pos = node.entries.iter().position(|e| e.matches(key))?;
        let prune =
            depth > 0 && node.entries.len() == 1 && node.children.iter().all(Option::is_none);

        let value = self.descend_mut(key, depth)?.entries.remove(pos).value;

        if prune {
            if let Some(survivor) = self.descend_mut(key, cut) {
                tracing::trace!(depth = cut + 1, "pruning empty subtree");
                survivor.children[branch_index(key, cut)] = None;
            }
        }

        Some(value)
    }

    /// Drops every child and entry.
    pub(crate) fn clear(&mut self) {
        let detached = std::mem::replace(&mut self.children, [None, None]);
        drop_iteratively(detached.into_iter().flatten().collect());
        self.entries.clear();
    }

    /// Accumulates entry and node counts for this subtree into `stats`.
    ///
    /// Depths are counted from this node.
    pub(crate) fn collect_stats(&self, stats: &mut TreeStats) {
        let mut stack = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            stats.nodes += 1;
            stats.entries += node.entries.len();
            stats.deepest = stats.deepest.max(depth);

            stack.extend(node.children.iter().flatten().map(|child| (&**child, depth + 1)));
        }
    }

    /// Checks the structural invariants of the subtree rooted at this node.
    pub(crate) fn validate(&self, max_depth: usize) -> PhTreeResult<()> {
        // Branch indices from this node down to the node being checked.
        let mut path: Vec<usize> = Vec::new();
        let mut stack = vec![(self, 0usize, 0usize)];

        while let Some((node, depth, bit)) = stack.pop() {
            // Every node visited since this one's parent lies below that parent.
            path.truncate(depth.saturating_sub(1));
            if depth > 0 {
                path.push(bit);
            }

            if depth > max_depth {
                return Err(PhTreeError::DepthExceeded { depth, max_depth });
            }

            if depth > 0 && node.is_empty() {
                return Err(PhTreeError::DanglingNode { depth });
            }

            for entry in &node.entries {
                let on_path = entry.key.len() >= depth
                    && path
                        .iter()
                        .enumerate()
                        .all(|(level, &bit)| branch_index(&entry.key, level) == bit);

                if !on_path || !is_terminal(entry.key.len(), depth, max_depth) {
                    return Err(PhTreeError::MisplacedEntry {
                        depth,
                        key: entry.key.to_vec(),
                    });
                }
            }

            for (bit, child) in node.children.iter().enumerate() {
                if let Some(child) = child {
                    stack.push((&**child, depth + 1, bit));
                }
            }
        }

        Ok(())
    }
}

/// Drops a set of subtrees without recursing once per level.
fn drop_iteratively<V>(mut stack: Vec<Box<Node<V>>>) {
    while let Some(mut node) = stack.pop() {
        stack.extend(node.children.iter_mut().filter_map(Option::take));
    }
}

impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        drop_iteratively(self.children.iter_mut().filter_map(Option::take).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const MAX_DEPTH: usize = 64;

    #[test_case(&[1, 2, 3], &[1, 2, 3] => true ; "identical keys")]
    #[test_case(&[1, 2, 3], &[1, 2, 4] => false ; "last component differs")]
    #[test_case(&[1, 2, 3], &[1, 2] => false ; "stored key longer")]
    #[test_case(&[1, 2], &[1, 2, 3] => false ; "stored key shorter")]
    #[test_case(&[], &[] => true ; "both empty")]
    fn test_entry_matches(stored: &[u64], probe: &[u64]) -> bool {
        Entry::new(stored.into(), ()).matches(probe)
    }

    #[test]
    fn test_insert_creates_path_lazily() {
        let mut root = Node::new();
        root.insert(vec![0, 1, 2].into(), "a", MAX_DEPTH, DuplicatePolicy::Append);

        assert!(root.children[0].is_some());
        assert!(root.children[1].is_none());

        let mut stats = TreeStats::default();
        root.collect_stats(&mut stats);
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.deepest, 3);
    }

    #[test]
    fn test_empty_key_lives_at_root() {
        let mut root = Node::new();
        root.insert(Vec::new().into(), 7, MAX_DEPTH, DuplicatePolicy::Append);

        assert_eq!(root.entries.len(), 1);
        assert_eq!(root.search(&[], MAX_DEPTH), Some(&7));
        assert_eq!(root.remove(&[], MAX_DEPTH), Some(7));
        assert!(root.is_empty());
    }

    #[test]
    fn test_remove_prunes_whole_branch() {
        let mut root = Node::new();
        root.insert(vec![1, 1, 1].into(), "x", MAX_DEPTH, DuplicatePolicy::Append);
        root.insert(vec![0].into(), "y", MAX_DEPTH, DuplicatePolicy::Append);

        assert_eq!(root.remove(&[1, 1, 1], MAX_DEPTH), Some("x"));
        assert!(root.children[1].is_none());
        assert!(root.children[0].is_some());
        assert!(root.validate(MAX_DEPTH).is_ok());
    }

    #[test]
    fn test_remove_prunes_only_below_shared_prefix() {
        let mut root = Node::new();
        root.insert(vec![1, 1, 1, 1].into(), "long", MAX_DEPTH, DuplicatePolicy::Append);
        root.insert(vec![1, 1, 0].into(), "short", MAX_DEPTH, DuplicatePolicy::Append);

        assert_eq!(root.remove(&[1, 1, 1, 1], MAX_DEPTH), Some("long"));

        let mut stats = TreeStats::default();
        root.collect_stats(&mut stats);
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.deepest, 3);
        assert_eq!(root.search(&[1, 1, 0], MAX_DEPTH), Some(&"short"));
        assert!(root.validate(MAX_DEPTH).is_ok());
    }

    #[test]
    fn test_deep_chain_removes_and_drops() {
        let depth = 100_000;
        let key = vec![3u64; depth];
        let mut root = Node::new();
        root.insert(key.clone().into(), (), depth, DuplicatePolicy::Append);
        assert!(root.validate(depth).is_ok());

        assert_eq!(root.remove(&key, depth), Some(()));
        assert!(root.is_empty());

        root.insert(key.into(), (), depth, DuplicatePolicy::Append);
        drop(root);
    }

    #[test]
    fn test_remove_absent_key_keeps_structure() {
        let mut root = Node::new();
        root.insert(vec![2, 4].into(), 1, MAX_DEPTH, DuplicatePolicy::Append);

        assert_eq!(root.remove(&[2, 6], MAX_DEPTH), None);
        assert_eq!(root.remove(&[1, 1], MAX_DEPTH), None);
        assert_eq!(root.search(&[2, 4], MAX_DEPTH), Some(&1));
    }

    #[test]
    fn test_replace_policy_keeps_position() {
        let mut root = Node::new();
        root.insert(vec![3].into(), "first", MAX_DEPTH, DuplicatePolicy::Replace);
        let old = root.insert(vec![3].into(), "second", MAX_DEPTH, DuplicatePolicy::Replace);

        assert_eq!(old, Some("first"));
        assert_eq!(root.search(&[3], MAX_DEPTH), Some(&"second"));
        assert_eq!(root.remove(&[3], MAX_DEPTH), Some("second"));
        assert_eq!(root.search(&[3], MAX_DEPTH), None);
    }

    #[test]
    fn test_validate_detects_dangling_child() {
        let mut root: Node<()> = Node::new();
        root.children[1] = Some(Box::new(Node::new()));

        match root.validate(MAX_DEPTH) {
            Err(PhTreeError::DanglingNode { depth }) => assert_eq!(depth, 1),
            other => panic!("expected dangling node error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_detects_misplaced_entry() {
        let mut root = Node::new();
        let mut child = Node::new();
        // Low bit of 2 selects slot 0, not slot 1.
        child.entries.push(Entry::new(vec![2].into(), ()));
        root.children[1] = Some(Box::new(child));

        match root.validate(MAX_DEPTH) {
            Err(PhTreeError::MisplacedEntry { depth, key }) => {
                assert_eq!(depth, 1);
                assert_eq!(key, vec![2]);
            }
            other => panic!("expected misplaced entry error, got {other:?}"),
        }
    }
}
