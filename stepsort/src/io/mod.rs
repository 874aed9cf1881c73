//! Side-effecting helpers for the `stepsort` binary.

pub mod config;
pub mod input;
pub mod trace;
