//! Deterministic, pure logic shared by every runner.
//!
//! Core modules are free of I/O side effects. They define the step protocol,
//! the working sequence runners mutate, and the consumers that only observe.

pub mod algorithm;
pub mod error;
pub mod key;
pub mod sink;
pub mod step;
pub mod tally;
