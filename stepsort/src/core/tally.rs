//! Step statistics and sorted-index coverage.

use std::collections::BTreeMap;

use crate::core::sink::StepSink;
use crate::core::step::{Step, StepKind};

/// Counts events by kind and remembers which indices were marked sorted.
///
/// Marking an index again leaves the coverage unchanged, so runners that
/// re-announce settled indices are tallied the same as ones that do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTally {
    counts: BTreeMap<StepKind, u64>,
    sorted: Vec<bool>,
    completed: bool,
}

impl StepTally {
    pub fn new(len: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            sorted: vec![false; len],
            completed: false,
        }
    }

    pub fn record<T>(&mut self, step: &Step<T>) {
        *self.counts.entry(step.kind()).or_insert(0) += 1;
        match step {
            Step::MarkSorted { index } => {
                if let Some(flag) = self.sorted.get_mut(*index) {
                    *flag = true;
                }
            }
            Step::Completed => self.completed = true,
            _ => {}
        }
    }

    pub fn count(&self, kind: StepKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Non-zero counts in [`StepKind::ALL`] order.
    pub fn counts(&self) -> Vec<(StepKind, u64)> {
        StepKind::ALL
            .into_iter()
            .map(|kind| (kind, self.count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn sorted_count(&self) -> usize {
        self.sorted.iter().filter(|flag| **flag).count()
    }

    /// True once every index has received at least one `MarkSorted`.
    pub fn all_sorted(&self) -> bool {
        self.sorted.iter().all(|flag| *flag)
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

impl<T> StepSink<T> for StepTally {
    fn on_step(&mut self, step: Step<T>, _sequence: &[T]) -> bool {
        self.record(&step);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_mark_sorted_is_idempotent() {
        let mut tally = StepTally::new(3);
        for _ in 0..3 {
            tally.record(&Step::<i32>::MarkSorted { index: 1 });
        }
        assert_eq!(tally.sorted_count(), 1);
        assert_eq!(tally.count(StepKind::MarkSorted), 3);
        assert!(!tally.all_sorted());
    }

    #[test]
    fn counts_skip_unseen_kinds() {
        let mut tally = StepTally::new(2);
        tally.record(&Step::<i32>::Compare { a: 0, b: 1 });
        tally.record(&Step::<i32>::Swap { a: 0, b: 1 });
        tally.record(&Step::<i32>::Compare { a: 0, b: 1 });
        assert_eq!(
            tally.counts(),
            vec![(StepKind::Compare, 2), (StepKind::Swap, 1)]
        );
        assert_eq!(tally.total(), 3);
        assert!(!tally.completed());
    }

    #[test]
    fn empty_sequence_is_trivially_covered() {
        let mut tally = StepTally::new(0);
        tally.record(&Step::<i32>::Completed);
        assert!(tally.all_sorted());
        assert!(tally.completed());
    }
}
