//! The consumer contract and the working sequence every runner mutates.
//!
//! A runner owns a [`Stage`]: its private copy of the input plus the caller's
//! [`StepSink`]. Every emission goes through the stage, so the snapshot handed
//! to the sink is always the true current state, and a refused step unwinds
//! the runner through `?` with [`Cancelled`].

use std::cmp::Ordering;
use std::ops::Range;

use crate::core::step::Step;

/// Consumer of steps. Returning `false` cancels the run.
///
/// The snapshot is borrowed for the duration of the call and cannot change
/// underneath the sink; call `to_vec()` to retain it.
pub trait StepSink<T> {
    fn on_step(&mut self, step: Step<T>, sequence: &[T]) -> bool;
}

impl<T, F> StepSink<T> for F
where
    F: FnMut(Step<T>, &[T]) -> bool,
{
    fn on_step(&mut self, step: Step<T>, sequence: &[T]) -> bool {
        self(step, sequence)
    }
}

/// Marker carried up the call stack when the sink refuses a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Result of one emission point.
pub type Flow = Result<(), Cancelled>;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStop {
    /// Ran to the end; `Completed` was the last event.
    Completed,
    /// The sink refused a step; no `Completed` was emitted.
    Cancelled,
}

/// Final state of one sort invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome<T> {
    /// The working sequence as it stood when the run ended.
    pub sequence: Vec<T>,
    pub stop: SortStop,
    /// Events offered to the sink, including a refused one.
    pub steps: u64,
}

impl<T> SortOutcome<T> {
    pub fn is_completed(&self) -> bool {
        self.stop == SortStop::Completed
    }
}

/// Working sequence plus the sink it reports to.
pub struct Stage<'s, T, S: ?Sized> {
    items: Vec<T>,
    sink: &'s mut S,
    steps: u64,
}

impl<'s, T, S> Stage<'s, T, S>
where
    S: StepSink<T> + ?Sized,
{
    fn new(items: Vec<T>, sink: &'s mut S) -> Self {
        Self {
            items,
            sink,
            steps: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn emit(&mut self, step: Step<T>) -> Flow {
        self.steps += 1;
        if self.sink.on_step(step, &self.items) {
            Ok(())
        } else {
            Err(Cancelled)
        }
    }

    /// Emit `Compare(a, b)`, then report how `items[a]` orders against `items[b]`.
    pub fn compare(&mut self, a: usize, b: usize) -> Result<Ordering, Cancelled>
    where
        T: Ord,
    {
        self.emit(Step::Compare { a, b })?;
        Ok(self.items[a].cmp(&self.items[b]))
    }

    /// Exchange two slots and emit `Swap`. A self-exchange is a no-op and emits nothing.
    pub fn swap(&mut self, a: usize, b: usize) -> Flow {
        if a == b {
            return Ok(());
        }
        self.items.swap(a, b);
        self.emit(Step::Swap { a, b })
    }

    /// Overwrite a slot and emit `Merge`.
    pub fn write(&mut self, index: usize, value: T) -> Flow
    where
        T: Clone,
    {
        self.items[index] = value.clone();
        self.emit(Step::Merge { index, value })
    }

    /// Like [`Stage::write`], but silent when the slot already holds `value`.
    pub fn write_if_changed(&mut self, index: usize, value: T) -> Flow
    where
        T: Clone + PartialEq,
    {
        if self.items[index] == value {
            return Ok(());
        }
        self.write(index, value)
    }

    pub fn mark_sorted(&mut self, index: usize) -> Flow {
        self.emit(Step::MarkSorted { index })
    }

    pub fn mark_range(&mut self, range: Range<usize>) -> Flow {
        for index in range {
            self.mark_sorted(index)?;
        }
        Ok(())
    }

    pub fn bucket(&mut self, index: usize, bucket: usize) -> Flow {
        self.emit(Step::Bucket { index, bucket })
    }

    /// Copy `values` into consecutive slots from `start` without emitting.
    ///
    /// Only used to settle buffered values after a refused write, so the
    /// returned sequence stays a permutation of the input. For merge, time,
    /// cube, radix and bucket sort this means a cancelled run can return a
    /// sequence that differs from the snapshot passed with the refused step.
    pub fn restore<I>(&mut self, start: usize, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for (slot, value) in self.items[start..].iter_mut().zip(values) {
            *slot = value;
        }
    }

    /// Write `values` back from `start`, emitting `Merge` for every slot that changes.
    ///
    /// If the sink refuses, the rest of `values` is settled silently (see
    /// [`Stage::restore`]), so the sequence moves on after the last snapshot.
    pub fn write_back(&mut self, start: usize, values: &[T]) -> Flow
    where
        T: Clone + PartialEq,
    {
        for (offset, value) in values.iter().enumerate() {
            if let Err(cancelled) = self.write_if_changed(start + offset, value.clone()) {
                self.restore(start + offset + 1, values[offset + 1..].iter().cloned());
                return Err(cancelled);
            }
        }
        Ok(())
    }

    fn finish(mut self, flow: Flow) -> SortOutcome<T> {
        let stop = match flow {
            Ok(()) => {
                // The sink's verdict on the final event has nothing left to stop.
                let _ = self.emit(Step::Completed);
                SortStop::Completed
            }
            Err(Cancelled) => SortStop::Cancelled,
        };
        SortOutcome {
            sequence: self.items,
            stop,
            steps: self.steps,
        }
    }
}

/// Run `body` over a private copy of `input`.
///
/// Inputs of length 0 and 1 never reach `body`: they emit `Completed`, or
/// `MarkSorted(0)` then `Completed`. `body` must mark every index sorted
/// before returning `Ok`.
pub fn drive<T, S, F>(input: &[T], sink: &mut S, body: F) -> SortOutcome<T>
where
    T: Clone,
    S: StepSink<T> + ?Sized,
    F: FnOnce(&mut Stage<'_, T, S>) -> Flow,
{
    let mut stage = Stage::new(input.to_vec(), sink);
    let flow = match stage.len() {
        0 => Ok(()),
        1 => stage.mark_sorted(0),
        _ => body(&mut stage),
    };
    stage.finish(flow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_emits_only_completed() {
        let mut steps = Vec::new();
        let mut sink = |step: Step<i32>, _: &[i32]| {
            steps.push(step);
            true
        };
        let empty: [i32; 0] = [];
        let outcome = drive(&empty, &mut sink, |_| panic!("body must not run"));
        assert!(outcome.is_completed());
        assert_eq!(outcome.steps, 1);
        assert_eq!(steps, vec![Step::Completed]);
    }

    #[test]
    fn single_input_marks_then_completes() {
        let mut steps = Vec::new();
        let mut sink = |step: Step<i32>, _: &[i32]| {
            steps.push(step);
            true
        };
        let outcome = drive(&[7], &mut sink, |_| panic!("body must not run"));
        assert_eq!(outcome.sequence, vec![7]);
        assert_eq!(steps, vec![Step::MarkSorted { index: 0 }, Step::Completed]);
    }

    #[test]
    fn self_swap_is_silent() {
        let mut steps = Vec::new();
        let mut sink = |step: Step<i32>, _: &[i32]| {
            steps.push(step);
            true
        };
        let outcome = drive(&[2, 1], &mut sink, |stage| {
            stage.swap(1, 1)?;
            stage.swap(0, 1)?;
            stage.mark_range(0..2)
        });
        assert_eq!(outcome.sequence, vec![1, 2]);
        assert_eq!(steps[0], Step::Swap { a: 0, b: 1 });
        assert_eq!(steps.len(), 4);
    }

    #[test]
    fn snapshot_reflects_mutation_before_swap_event() {
        let mut seen = Vec::new();
        let mut sink = |step: Step<i32>, sequence: &[i32]| {
            if matches!(step, Step::Swap { .. }) {
                seen.push(sequence.to_vec());
            }
            true
        };
        drive(&[3, 1, 2], &mut sink, |stage| {
            stage.swap(0, 1)?;
            stage.mark_range(0..3)
        });
        assert_eq!(seen, vec![vec![1, 3, 2]]);
    }

    #[test]
    fn refused_write_back_settles_remaining_values() {
        let mut writes = 0;
        let mut sink = |step: Step<i32>, _: &[i32]| {
            if matches!(step, Step::Merge { .. }) {
                writes += 1;
                return writes < 2;
            }
            true
        };
        let outcome = drive(&[9, 8, 7, 6], &mut sink, |stage| {
            stage.write_back(0, &[6, 7, 8, 9])?;
            stage.mark_range(0..4)
        });
        assert_eq!(outcome.stop, SortStop::Cancelled);
        assert_eq!(outcome.sequence, vec![6, 7, 8, 9]);
    }

    #[test]
    fn refusal_skips_completed() {
        let mut sink = |_: Step<i32>, _: &[i32]| false;
        let outcome = drive(&[2, 1], &mut sink, |stage| {
            stage.compare(0, 1)?;
            stage.mark_range(0..2)
        });
        assert_eq!(outcome.stop, SortStop::Cancelled);
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.sequence, vec![2, 1]);
    }
}
