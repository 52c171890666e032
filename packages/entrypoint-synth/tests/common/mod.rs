//! Common test utilities for entrypoint-synth
//!
//! Shared fixtures, builders and driver-shape assertions for the
//! integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
