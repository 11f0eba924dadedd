//! Test fixtures for pycpp integration tests.

#[allow(dead_code)]
pub mod golden;

pub use golden::*;
