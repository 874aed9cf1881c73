//! Maps an algorithm identifier to its runner.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::core::algorithm::Algorithm;
use crate::core::error::SortError;
use crate::core::key::IntegerKey;
use crate::core::sink::{SortOutcome, StepSink};
use crate::sorts;

/// Per-run knobs that are not algorithm parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Seed for bogo sort's shuffles. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

/// Sort `input` with any comparison-based algorithm.
///
/// `radix` and `bucket` need integer elements; use [`run_integers`] for those.
/// Requesting them here fails before any step is emitted.
pub fn run<T, S>(
    algorithm: Algorithm,
    input: &[T],
    sink: &mut S,
    options: &RunOptions,
) -> Result<SortOutcome<T>, SortError>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    run_comparison(algorithm, input, sink, options)
        .ok_or(SortError::RequiresIntegerKeys { algorithm })
}

/// Sort integer elements with any of the twelve algorithms.
pub fn run_integers<T, S>(
    algorithm: Algorithm,
    input: &[T],
    sink: &mut S,
    options: &RunOptions,
) -> SortOutcome<T>
where
    T: IntegerKey,
    S: StepSink<T> + ?Sized,
{
    if let Some(outcome) = run_comparison(algorithm, input, sink, options) {
        return outcome;
    }
    debug!(algorithm = %algorithm, len = input.len(), "dispatching sort");
    let outcome = if algorithm == Algorithm::Radix {
        sorts::radix(input, sink)
    } else {
        sorts::bucket(input, sink)
    };
    debug!(algorithm = %algorithm, steps = outcome.steps, stop = ?outcome.stop, "sort finished");
    outcome
}

/// `None` for the integer-only algorithms, before touching the sink.
fn run_comparison<T, S>(
    algorithm: Algorithm,
    input: &[T],
    sink: &mut S,
    options: &RunOptions,
) -> Option<SortOutcome<T>>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    if algorithm.requires_integer_keys() {
        return None;
    }
    debug!(algorithm = %algorithm, len = input.len(), "dispatching sort");
    let outcome = match algorithm {
        Algorithm::Bubble => sorts::bubble(input, sink),
        Algorithm::Selection => sorts::selection(input, sink),
        Algorithm::Insertion => sorts::insertion(input, sink),
        Algorithm::Shell => sorts::shell(input, sink),
        Algorithm::Quick => sorts::quick(input, sink),
        Algorithm::Merge => sorts::merge(input, sink),
        Algorithm::Heap => sorts::heap(input, sink),
        Algorithm::Time => sorts::time(input, sink),
        Algorithm::Cube => sorts::cube(input, sink),
        Algorithm::Bogo => match options.seed {
            Some(seed) => sorts::bogo_with_rng(input, sink, &mut StdRng::seed_from_u64(seed)),
            None => sorts::bogo(input, sink),
        },
        Algorithm::Radix | Algorithm::Bucket => return None,
    };
    debug!(algorithm = %algorithm, steps = outcome.steps, stop = ?outcome.stop, "sort finished");
    Some(outcome)
}

/// Parse `id` (identifier or display name) and run it as [`run`] does.
pub fn run_by_id<T, S>(
    id: &str,
    input: &[T],
    sink: &mut S,
    options: &RunOptions,
) -> Result<SortOutcome<T>, SortError>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    let algorithm: Algorithm = id.parse()?;
    run(algorithm, input, sink, options)
}
