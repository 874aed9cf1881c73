//! Test-only sinks and sequence helpers.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::sink::StepSink;
use crate::core::step::Step;
use crate::core::tally::StepTally;

type StopRule<T> = Box<dyn FnMut(&Step<T>) -> bool>;

/// Sink that keeps every offered step with the snapshot it arrived with.
///
/// A refused step is recorded too, so `steps.last()` is the one that
/// cancelled the run.
pub struct Recorder<T> {
    pub steps: Vec<Step<T>>,
    pub snapshots: Vec<Vec<T>>,
    stop: Option<StopRule<T>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            snapshots: Vec::new(),
            stop: None,
        }
    }
}

impl<T> Recorder<T> {
    /// Accepts every step.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_swaps(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, Step::Swap { .. }))
            .count()
    }

    pub fn tally(&self, len: usize) -> StepTally {
        let mut tally = StepTally::new(len);
        for step in &self.steps {
            tally.record(step);
        }
        tally
    }
}

impl<T: 'static> Recorder<T> {
    /// Refuses the first step matching `rule`.
    pub fn stop_on<F>(rule: F) -> Self
    where
        F: FnMut(&Step<T>) -> bool + 'static,
    {
        Self {
            stop: Some(Box::new(rule)),
            ..Self::default()
        }
    }

    /// Refuses the `k`-th step (1-based).
    pub fn stop_after(k: usize) -> Self {
        let mut seen = 0;
        Self::stop_on(move |_| {
            seen += 1;
            seen == k
        })
    }

    /// Refuses the `n`-th `Compare` (1-based).
    pub fn stop_on_nth_compare(n: usize) -> Self {
        let mut seen = 0;
        Self::stop_on(move |step| {
            if matches!(step, Step::Compare { .. }) {
                seen += 1;
            }
            seen == n
        })
    }
}

impl<T: Clone> StepSink<T> for Recorder<T> {
    fn on_step(&mut self, step: Step<T>, sequence: &[T]) -> bool {
        let refuse = self.stop.as_mut().is_some_and(|rule| rule(&step));
        self.steps.push(step);
        self.snapshots.push(sequence.to_vec());
        !refuse
    }
}

/// Apply the mutating steps in `steps` to `input`.
///
/// A consumer that only sees the event stream must end up with the same
/// sequence the runner returned.
pub fn replay<T: Clone>(input: &[T], steps: &[Step<T>]) -> Vec<T> {
    let mut sequence = input.to_vec();
    for step in steps {
        match step {
            Step::Swap { a, b } => sequence.swap(*a, *b),
            Step::Merge { index, value } => sequence[*index] = value.clone(),
            _ => {}
        }
    }
    sequence
}

pub fn is_sorted<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Same multiset of elements, in any order.
pub fn is_permutation<T: Ord + Clone>(a: &[T], b: &[T]) -> bool {
    let mut left = a.to_vec();
    let mut right = b.to_vec();
    left.sort();
    right.sort();
    left == right
}

/// `n, n-1, ..., 1`.
pub fn descending(n: usize) -> Vec<i32> {
    (1..=n as i32).rev().collect()
}

/// Write `contents` to `stepsort.toml` inside a fresh temp dir.
///
/// Keep the returned [`TempDir`] alive for as long as the path is used.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stepsort.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}
