// Copyright (c) 2025 PH-Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key helpers for the PH-Tree.
//!
//! A key is an ordered sequence of `u64` components. Descent consumes one
//! component per level and looks only at its least-significant bit.

/// Number of child slots per node.
pub(crate) const FANOUT: usize = 2;

/// Returns `true` when descent for a key of `key_len` components stops at `depth`.
///
/// Descent stops once the key is exhausted or the configured maximum depth
/// is reached, whichever comes first.
#[inline]
pub(crate) fn is_terminal(key_len: usize, depth: usize, max_depth: usize) -> bool {
    depth == key_len || depth == max_depth
}

/// Selects the child slot for `key` at `depth`.
///
/// Only the least-significant bit of the component is consumed.
/// Callers must ensure `depth < key.len()`.
#[inline]
pub(crate) fn branch_index(key: &[u64], depth: usize) -> usize {
    (key[depth] & 1) as usize
}
