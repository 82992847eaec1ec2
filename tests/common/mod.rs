//! Common test utilities for podshift integration tests.
//!
//! - `TestEnv`: isolated working and config directories plus a CLI runner
//! - Fixtures: reusable Compose documents

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
