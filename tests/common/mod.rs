//! Shared test utilities for coverage-navigator
//!
//! Response fixtures, command builders with an isolated config directory, and
//! assertion predicates for the CLI integration tests.

pub mod assertions;
pub mod fixtures;
