// Shared test support code.
// This module provides common utilities that all test files can use.

pub mod alloc;
pub mod common;
pub mod rng;

pub use common::*;
pub use rng::ScriptedRng;
