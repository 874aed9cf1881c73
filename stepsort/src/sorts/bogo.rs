//! Bogo sort: shuffle until sorted.
//!
//! Runtime is unbounded for all but tiny inputs. Callers that need a bound
//! refuse a step from the sink once their own budget runs out.

use std::cmp::Ordering;

use rand::Rng;

use crate::core::sink::{Cancelled, Flow, SortOutcome, Stage, StepSink, drive};

/// Bogo sort driven by the thread-local RNG.
pub fn bogo<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    bogo_with_rng(input, sink, &mut rand::thread_rng())
}

/// Bogo sort with a caller-supplied RNG, for reproducible runs.
pub fn bogo_with_rng<T, S, R>(input: &[T], sink: &mut S, rng: &mut R) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
    R: Rng + ?Sized,
{
    drive(input, sink, |stage| {
        while !in_order(stage)? {
            shuffle(stage, rng)?;
        }
        let n = stage.len();
        stage.mark_range(0..n)
    })
}

/// Scan adjacent pairs, stopping at the first inversion.
fn in_order<T, S>(stage: &mut Stage<'_, T, S>) -> Result<bool, Cancelled>
where
    T: Ord,
    S: StepSink<T> + ?Sized,
{
    for i in 0..stage.len() - 1 {
        if stage.compare(i, i + 1)? == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Fisher-Yates shuffle; every exchange is reported.
fn shuffle<T, S, R>(stage: &mut Stage<'_, T, S>, rng: &mut R) -> Flow
where
    S: StepSink<T> + ?Sized,
    R: Rng + ?Sized,
{
    for i in (1..stage.len()).rev() {
        let j = rng.gen_range(0..=i);
        stage.swap(i, j)?;
    }
    Ok(())
}
