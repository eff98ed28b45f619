//! Scenario tests for the queue engine.
//!
//! End-to-end cases that drive the public surface the way a queue driver
//! would, plus randomized operation sequences checked against a model.


pub mod support;
