//! In-place comparison runners: bubble, selection, insertion and shell sort.

use std::cmp::Ordering;

use crate::core::sink::{Flow, SortOutcome, Stage, StepSink, drive};

/// Bubble sort with an early exit after a pass without swaps.
pub fn bubble<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, bubble_passes)
}

/// Selection sort. Swaps at most once per position.
pub fn selection<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let n = stage.len();
        for i in 0..n {
            let mut min = i;
            for j in i + 1..n {
                if stage.compare(j, min)? == Ordering::Less {
                    min = j;
                }
            }
            stage.swap(min, i)?;
            stage.mark_sorted(i)?;
        }
        Ok(())
    })
}

/// Insertion sort by adjacent exchanges.
pub fn insertion<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let n = stage.len();
        insertion_range(stage, 0, n)
    })
}

/// Shell sort with the halving gap sequence `n/2, n/4, .., 1`.
///
/// Indices are marked as they settle within each gap pass and once more in a
/// final sweep, so most indices are marked several times.
pub fn shell<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: Ord + Clone,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let n = stage.len();
        let mut gap = n / 2;
        while gap > 0 {
            for i in gap..n {
                let mut j = i;
                while j >= gap && stage.compare(j - gap, j)? == Ordering::Greater {
                    stage.swap(j - gap, j)?;
                    j -= gap;
                }
                stage.mark_sorted(j)?;
            }
            gap /= 2;
        }
        stage.mark_range(0..n)
    })
}

fn bubble_passes<T, S>(stage: &mut Stage<'_, T, S>) -> Flow
where
    T: Ord,
    S: StepSink<T> + ?Sized,
{
    let n = stage.len();
    for pass in 0..n {
        let boundary = n - pass - 1;
        let mut swapped = false;
        for j in 0..boundary {
            if stage.compare(j, j + 1)? == Ordering::Greater {
                stage.swap(j, j + 1)?;
                swapped = true;
            }
        }
        stage.mark_sorted(boundary)?;
        if !swapped {
            // A clean pass leaves the unsettled prefix already in order.
            return stage.mark_range(0..boundary);
        }
    }
    Ok(())
}

/// Insertion-sort the half-open range `start..end` in place.
///
/// Emits `MarkSorted(start)` first, then `MarkSorted(i)` once the element
/// that started at `i` has been shifted into place. Indices are absolute.
pub(crate) fn insertion_range<T, S>(stage: &mut Stage<'_, T, S>, start: usize, end: usize) -> Flow
where
    T: Ord,
    S: StepSink<T> + ?Sized,
{
    if start >= end {
        return Ok(());
    }
    stage.mark_sorted(start)?;
    for i in start + 1..end {
        let mut j = i;
        while j > start && stage.compare(j - 1, j)? == Ordering::Greater {
            stage.swap(j - 1, j)?;
            j -= 1;
        }
        stage.mark_sorted(i)?;
    }
    Ok(())
}
