//! Test modules for the PH-Tree crate.
//!
//! This module contains crate-internal test suites:
//! - Configuration loading and validation
//! - Error types and reporting
//! - Property-based tests of the tree against a reference model
//! - Shared fixtures and proptest strategies

pub mod config_tests;

pub use test_utils::{key_strategy, op_strategy, KeyModel, Op, TestFixture};
