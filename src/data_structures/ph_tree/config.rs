// Copyright (c) 2025 PH-Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the PH-Tree.

/// Default depth at which every key is forced into an entry bucket.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What `insert` does when an equal key is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Append another entry. Search and remove act on the first one stored.
    #[default]
    Append,
    /// Overwrite the value of the first equal entry in place.
    Replace,
}

/// Configuration for the PH-Tree.
///
/// `max_depth` truncates descent: components past that depth are ignored
/// for branching but still take part in key equality.
#[derive(Debug, Clone)]
pub struct PhTreeConfig {
    max_depth: usize,
    duplicate_policy: DuplicatePolicy,
}

impl PhTreeConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - max_depth: 64
    /// - duplicate_policy: Append
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Set the maximum descent depth. Zero stores every key at the root.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set how inserts treat keys that are already present.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Get the maximum descent depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Get the duplicate-key policy
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }
}

impl Default for PhTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PhTreeConfig::default();
        assert_eq!(config.max_depth(), 64);
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::Append);
    }

    #[test]
    fn test_config_builder() {
        let config = PhTreeConfig::new()
            .with_max_depth(4)
            .with_duplicate_policy(DuplicatePolicy::Replace);

        assert_eq!(config.max_depth(), 4);
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::Replace);
    }
}
