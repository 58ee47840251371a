// Copyright (c) 2025 PH-Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the PH-Tree.
//!
//! Insert, search and remove never fail. These errors describe structural
//! violations found by [`PhTree::validate`](super::PhTree::validate).

/// Structural violations detected while scanning a PH-Tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhTreeError {
    /// A non-root node holds neither entries nor children.
    #[error("Empty node left attached at depth {depth}")]
    DanglingNode {
        /// Depth of the empty node.
        depth: usize,
    },

    /// An entry is stored at a node that is not its termination node.
    #[error("Entry with key {key:?} stored at wrong node (depth {depth})")]
    MisplacedEntry {
        /// Depth of the node holding the entry.
        depth: usize,
        /// Full key of the misplaced entry.
        key: Vec<u64>,
    },

    /// A node exists below the configured maximum depth.
    #[error("Node at depth {depth} exceeds maximum depth of {max_depth}")]
    DepthExceeded {
        /// Depth of the offending node.
        depth: usize,
        /// Configured maximum depth.
        max_depth: usize,
    },
}

/// Result type for PH-Tree validation.
pub type PhTreeResult<T> = Result<T, PhTreeError>;
