//! Step-emitting sorting engine.
//!
//! Twelve sorting algorithms run over a private copy of the input and report
//! every comparison, exchange, overwrite, bucket assignment and "now in final
//! position" event to a caller-supplied [`core::sink::StepSink`]. The sink can
//! render, record or count those events, and can cancel the run by returning
//! `false`. The architecture keeps a strict split:
//!
//! - **[`core`]**: Pure, deterministic vocabulary (steps, sinks, algorithms, errors).
//! - **[`sorts`]**: The runners, one function per algorithm.
//! - **[`io`]**: Side-effecting helpers (config files, input generation, traces).
//!
//! [`dispatch`] selects a runner by identifier; [`session`] wraps one dispatch
//! with the step limit, pacing and tracing used by the `stepsort` binary.
//!
//! ```
//! use stepsort::core::step::Step;
//! use stepsort::sorts::insertion;
//!
//! let mut swaps = 0;
//! let outcome = insertion(&[3, 1, 2], &mut |step: Step<i32>, _: &[i32]| {
//!     if matches!(step, Step::Swap { .. }) {
//!         swaps += 1;
//!     }
//!     true
//! });
//! assert_eq!(outcome.sequence, vec![1, 2, 3]);
//! assert_eq!(swaps, 2);
//! ```

pub mod core;
pub mod dispatch;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
pub mod sorts;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
