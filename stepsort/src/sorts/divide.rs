//! Divide-and-conquer runners: quick, merge and heap sort.
//!
//! Recursion works on inclusive `(start, end)` index pairs over the one
//! working sequence held by the stage, so every emitted index is absolute.

use std::cmp::Ordering;

use crate::core::sink::{Cancelled, Flow, SortOutcome, Stage, StepSink, drive};
use crate::core::step::Step;

/// Quick sort with the rightmost element of each range as pivot.
pub fn quick<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let last = stage.len() - 1;
        quick_range(stage, 0, last)
    })
}

/// Top-down merge sort.
pub fn merge<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let last = stage.len() - 1;
        merge_sort_range(stage, 0, last)
    })
}

/// Heap sort over an implicit binary max-heap.
pub fn heap<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let n = stage.len();
        for root in (0..n / 2).rev() {
            sift_down(stage, n, root)?;
        }
        for end in (1..n).rev() {
            stage.swap(0, end)?;
            stage.mark_sorted(end)?;
            sift_down(stage, end, 0)?;
        }
        stage.mark_sorted(0)
    })
}

/// Sort `low..=high` with an explicit work stack.
///
/// All-equal and already sorted ranges partition into one empty side, so
/// recursion would go one level per element. Right halves are pushed first,
/// which keeps the step order of a depth-first, left-first recursion.
fn quick_range<T, S>(stage: &mut Stage<'_, T, S>, low: usize, high: usize) -> Flow
where
    T: Ord,
    S: StepSink<T> + ?Sized,
{
    let mut pending: Vec<(usize, usize)> = vec![(low, high)];
    while let Some((low, high)) = pending.pop() {
        if low >= high {
            stage.mark_sorted(low)?;
            continue;
        }
        let pivot = partition(stage, low, high)?;
        stage.mark_sorted(pivot)?;
        if pivot < high {
            pending.push((pivot + 1, high));
        }
        if pivot > low {
            pending.push((low, pivot - 1));
        }
    }
    Ok(())
}

/// Lomuto partition of `low..=high`; returns the pivot's final index.
fn partition<T, S>(stage: &mut Stage<'_, T, S>, low: usize, high: usize) -> Result<usize, Cancelled>
where
    T: Ord,
    S: StepSink<T> + ?Sized,
{
    let mut store = low;
    for j in low..high {
        if stage.compare(j, high)? == Ordering::Less {
            stage.swap(store, j)?;
            store += 1;
        }
    }
    stage.swap(store, high)?;
    Ok(store)
}

fn merge_sort_range<T, S>(stage: &mut Stage<'_, T, S>, start: usize, end: usize) -> Flow
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    if start >= end {
        return stage.mark_sorted(start);
    }
    let mid = start + (end - start) / 2;
    merge_sort_range(stage, start, mid)?;
    merge_sort_range(stage, mid + 1, end)?;
    merge_ranges(stage, start, mid, end)
}

/// Merge the sorted runs `start..=mid` and `mid+1..=end`, then mark the whole range sorted.
///
/// Both runs are copied out first. `Compare` names the slots the two candidates
/// came from; `Merge` is emitted only for slots whose value changes. If the
/// sink refuses mid-merge, the unmerged remainder of both runs is copied into
/// the unwritten slots so the sequence stays a permutation of the input.
pub(crate) fn merge_ranges<T, S>(
    stage: &mut Stage<'_, T, S>,
    start: usize,
    mid: usize,
    end: usize,
) -> Flow
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    let left = stage.items()[start..=mid].to_vec();
    let right = stage.items()[mid + 1..=end].to_vec();
    let (mut i, mut j, mut k) = (0, 0, start);

    let merged = (|| -> Flow {
        while i < left.len() && j < right.len() {
            stage.emit(Step::Compare {
                a: start + i,
                b: mid + 1 + j,
            })?;
            let value = if left[i] <= right[j] {
                i += 1;
                left[i - 1].clone()
            } else {
                j += 1;
                right[j - 1].clone()
            };
            k += 1;
            stage.write_if_changed(k - 1, value)?;
        }
        while i < left.len() {
            i += 1;
            k += 1;
            stage.write_if_changed(k - 1, left[i - 1].clone())?;
        }
        while j < right.len() {
            j += 1;
            k += 1;
            stage.write_if_changed(k - 1, right[j - 1].clone())?;
        }
        Ok(())
    })();

    if merged.is_err() {
        let pending = left[i..].iter().chain(&right[j..]).cloned();
        stage.restore(k, pending);
        return merged;
    }
    stage.mark_range(start..end + 1)
}

fn sift_down<T, S>(stage: &mut Stage<'_, T, S>, heap_len: usize, mut root: usize) -> Flow
where
    T: Ord,
    S: StepSink<T> + ?Sized,
{
    loop {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = left + 1;
        if left < heap_len && stage.compare(left, largest)? == Ordering::Greater {
            largest = left;
        }
        if right < heap_len && stage.compare(right, largest)? == Ordering::Greater {
            largest = right;
        }
        if largest == root {
            return Ok(());
        }
        stage.swap(root, largest)?;
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sink::SortStop;
    use crate::test_support::{Recorder, is_permutation};

    #[test]
    fn quick_all_equal_only_swaps_pivots() {
        let mut recorder = Recorder::new();
        let outcome = quick(&[3, 3, 3, 3], &mut recorder);
        assert_eq!(outcome.sequence, vec![3, 3, 3, 3]);
        // Each partition moves nothing below the pivot; only pivot placement swaps.
        let swaps: Vec<&Step<i32>> = recorder
            .steps
            .iter()
            .filter(|step| matches!(step, Step::Swap { .. }))
            .collect();
        assert_eq!(
            swaps,
            vec![
                &Step::Swap { a: 0, b: 3 },
                &Step::Swap { a: 1, b: 3 },
                &Step::Swap { a: 2, b: 3 },
            ]
        );
        assert!(recorder.tally(4).all_sorted());
    }

    #[test]
    fn quick_compares_against_rightmost_pivot() {
        let mut recorder = Recorder::new();
        quick(&[2, 3, 1], &mut recorder);
        assert_eq!(recorder.steps[0], Step::Compare { a: 0, b: 2 });
        assert_eq!(recorder.steps[1], Step::Compare { a: 1, b: 2 });
        assert_eq!(recorder.steps[2], Step::Swap { a: 0, b: 2 });
        assert_eq!(recorder.steps[3], Step::MarkSorted { index: 0 });
    }

    #[test]
    fn quick_visits_left_range_before_right() {
        let mut recorder = Recorder::new();
        quick(&[1, 5, 4, 3], &mut recorder);
        let marks: Vec<usize> = recorder
            .steps
            .iter()
            .filter_map(|step| match step {
                Step::MarkSorted { index } => Some(*index),
                _ => None,
            })
            .collect();
        // Pivot 3 lands at 1; the lone left index is marked before the right range.
        assert_eq!(marks, vec![1, 0, 3, 2]);
    }

    #[test]
    fn quick_handles_long_all_equal_input_on_a_test_thread() {
        let input = vec![1_u8; 20_000];
        let mut sink = |_: Step<u8>, _: &[u8]| true;
        let outcome = quick(&input, &mut sink);
        assert!(outcome.is_completed());
        assert_eq!(outcome.sequence, input);
    }

    #[test]
    fn quick_handles_long_sorted_input_on_a_test_thread() {
        let input: Vec<u16> = (0..20_000).collect();
        let mut marked = vec![false; input.len()];
        let mut sink = |step: Step<u16>, _: &[u16]| {
            if let Step::MarkSorted { index } = step {
                marked[index] = true;
            }
            true
        };
        let outcome = quick(&input, &mut sink);
        assert_eq!(outcome.sequence, input);
        assert!(marked.iter().all(|flag| *flag));
    }

    #[test]
    fn merge_skips_writes_that_change_nothing() {
        let mut recorder = Recorder::new();
        let outcome = merge(&[1, 2, 3, 4], &mut recorder);
        assert_eq!(outcome.sequence, vec![1, 2, 3, 4]);
        assert!(
            !recorder
                .steps
                .iter()
                .any(|step| matches!(step, Step::Merge { .. }))
        );
    }

    #[test]
    fn merge_reports_overwrites_with_new_value() {
        let mut recorder = Recorder::new();
        let outcome = merge(&[2, 1], &mut recorder);
        assert_eq!(outcome.sequence, vec![1, 2]);
        assert_eq!(
            recorder.steps,
            vec![
                Step::MarkSorted { index: 0 },
                Step::MarkSorted { index: 1 },
                Step::Compare { a: 0, b: 1 },
                Step::Merge { index: 0, value: 1 },
                Step::Merge { index: 1, value: 2 },
                Step::MarkSorted { index: 0 },
                Step::MarkSorted { index: 1 },
                Step::Completed,
            ]
        );
    }

    #[test]
    fn merge_cancelled_on_second_compare_returns_permutation() {
        let input = [9, 1, 8, 2];
        let mut recorder = Recorder::stop_on_nth_compare(2);
        let outcome = merge(&input, &mut recorder);
        assert_eq!(outcome.stop, SortStop::Cancelled);
        assert!(is_permutation(&outcome.sequence, &input));
        assert!(!recorder.steps.contains(&Step::Completed));
    }

    #[test]
    fn merge_cancelled_mid_write_restores_pending_values() {
        let input = [5, 6, 7, 1, 2, 3];
        let mut writes = 0;
        let mut sink = |step: Step<i32>, _: &[i32]| {
            if matches!(step, Step::Merge { .. }) {
                writes += 1;
                return writes < 2;
            }
            true
        };
        let outcome = merge(&input, &mut sink);
        assert_eq!(outcome.stop, SortStop::Cancelled);
        assert!(is_permutation(&outcome.sequence, &input));
    }

    #[test]
    fn cancelled_merge_returns_settled_sequence_not_last_snapshot() {
        let input = [5, 6, 7, 1, 2, 3];
        let mut writes = 0;
        let mut recorder = Recorder::stop_on(move |step: &Step<i32>| {
            if matches!(step, Step::Merge { .. }) {
                writes += 1;
            }
            writes == 2
        });
        let outcome = merge(&input, &mut recorder);
        assert_eq!(outcome.stop, SortStop::Cancelled);
        assert_eq!(recorder.snapshots.last(), Some(&vec![1, 2, 7, 1, 2, 3]));
        assert_eq!(outcome.sequence, vec![1, 2, 5, 6, 7, 3]);
        assert!(is_permutation(&outcome.sequence, &input));
    }

    #[test]
    fn heap_marks_from_the_back() {
        let mut recorder = Recorder::new();
        let outcome = heap(&[4, 1, 3, 2], &mut recorder);
        assert_eq!(outcome.sequence, vec![1, 2, 3, 4]);
        let marks: Vec<usize> = recorder
            .steps
            .iter()
            .filter_map(|step| match step {
                Step::MarkSorted { index } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(marks, vec![3, 2, 1, 0]);
    }
}
