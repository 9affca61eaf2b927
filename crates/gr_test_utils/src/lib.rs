//! # Galaxy Raiders Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Scripted controller, recording visualizer and scripted random generator
//! - Fixture builders for field objects
//! - Determinism test harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
