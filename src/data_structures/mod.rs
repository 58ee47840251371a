//! Data structures for the PH-Tree crate.
//!
//! This module contains the concurrent index structures exposed by the
//! library. All implementations adhere to the project requirements:
//! - No unsafe code
//! - Safe for concurrent use through shared references
//! - Values are opaque to the structure

pub mod ph_tree;

// Re-export common data structures
pub use ph_tree::{DuplicatePolicy, PhTree, PhTreeConfig, PhTreeError, PhTreeResult, TreeStats};
