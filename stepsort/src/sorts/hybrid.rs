//! Composite runners built from insertion sort and the shared merge primitive.

use crate::core::sink::{Flow, SortOutcome, Stage, StepSink, drive};
use crate::sorts::comparison::insertion_range;
use crate::sorts::divide::merge_ranges;

/// Ranges shorter than this are insertion-sorted by time sort.
pub const INSERTION_THRESHOLD: usize = 16;

/// Chunk length of cube sort's first phase.
pub const CUBE_SIZE: usize = 16;

/// Time sort: insertion sort below [`INSERTION_THRESHOLD`], merge sort above.
///
/// An input shorter than the threshold is one plain insertion sort.
pub fn time<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let last = stage.len() - 1;
        time_range(stage, 0, last)
    })
}

/// Cube sort: insertion-sort every [`CUBE_SIZE`] chunk, then merge neighbouring
/// runs with a doubling width until one run covers the sequence.
pub fn cube<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let n = stage.len();
        for start in (0..n).step_by(CUBE_SIZE) {
            insertion_range(stage, start, (start + CUBE_SIZE).min(n))?;
        }

        let mut width = CUBE_SIZE;
        while width < n {
            let mut start = 0;
            while start + width < n {
                let mid = start + width - 1;
                let end = (start + 2 * width - 1).min(n - 1);
                merge_ranges(stage, start, mid, end)?;
                start += 2 * width;
            }
            width *= 2;
        }
        Ok(())
    })
}

fn time_range<T, S>(stage: &mut Stage<'_, T, S>, start: usize, end: usize) -> Flow
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    if end - start + 1 < INSERTION_THRESHOLD {
        return insertion_range(stage, start, end + 1);
    }
    let mid = start + (end - start) / 2;
    time_range(stage, start, mid)?;
    time_range(stage, mid + 1, end)?;
    merge_ranges(stage, start, mid, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::step::Step;
    use crate::sorts::comparison::insertion;
    use crate::test_support::{Recorder, descending};

    #[test]
    fn time_below_threshold_matches_insertion() {
        let input = [5, 2, 9, 1, 7, 3];
        let mut via_time = Recorder::new();
        let mut via_insertion = Recorder::new();
        time(&input, &mut via_time);
        insertion(&input, &mut via_insertion);
        assert_eq!(via_time.steps, via_insertion.steps);
    }

    #[test]
    fn time_above_threshold_merges_halves() {
        let input = descending(40);
        let mut recorder = Recorder::new();
        let outcome = time(&input, &mut recorder);
        assert_eq!(outcome.sequence, (1..=40).collect::<Vec<i32>>());
        assert!(
            recorder
                .steps
                .iter()
                .any(|step| matches!(step, Step::Merge { .. }))
        );
        assert!(recorder.tally(40).all_sorted());
    }

    #[test]
    fn time_second_half_steps_use_absolute_indices() {
        let input = descending(32);
        let mut recorder = Recorder::new();
        time(&input, &mut recorder);
        // The right half (16..32) is insertion-sorted after the left half.
        assert!(recorder.steps.contains(&Step::MarkSorted { index: 16 }));
        assert!(recorder.steps.contains(&Step::Compare { a: 16, b: 17 }));
    }

    #[test]
    fn cube_sorts_ragged_final_chunk() {
        let input = descending(37);
        let mut recorder = Recorder::new();
        let outcome = cube(&input, &mut recorder);
        assert_eq!(outcome.sequence, (1..=37).collect::<Vec<i32>>());
        assert!(recorder.tally(37).all_sorted());
    }

    #[test]
    fn cube_chunk_steps_stay_inside_chunk() {
        let input = descending(20);
        let mut recorder = Recorder::new();
        cube(&input, &mut recorder);
        let first_merge = recorder
            .steps
            .iter()
            .position(|step| matches!(step, Step::Merge { .. }))
            .expect("merge");
        for step in &recorder.steps[..first_merge] {
            if let Step::Swap { a, b } = step {
                assert_eq!(a / CUBE_SIZE, b / CUBE_SIZE, "swap {a}<->{b} crosses a chunk");
            }
        }
    }
}
