//! Stable exit codes for `stepsort` commands.

/// Command succeeded; `run` sorted to completion.
pub const OK: i32 = 0;
/// Invalid algorithm, input, config, or an IO failure.
pub const INVALID: i32 = 1;
/// `stepsort run` hit its step limit before the sort completed.
pub const CANCELLED: i32 = 2;
