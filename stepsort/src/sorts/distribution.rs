//! Distribution runners for integer elements: LSD radix sort and bucket sort.

use crate::core::key::IntegerKey;
use crate::core::sink::{Flow, SortOutcome, Stage, StepSink, drive};

const RADIX: u128 = 10;
const MIN_BUCKETS: usize = 10;

/// Least-significant-digit radix sort in base 10.
///
/// Each digit pass emits `Bucket(i, digit)` for every element, then writes the
/// stably ordered pass output back with `Merge` for slots that change. Nothing
/// is final until the last pass, so every index is marked only at the end.
/// With negative elements the digits are those of `value - min`.
pub fn radix<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: IntegerKey,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let n = stage.len();
        let floor = stage
            .items()
            .iter()
            .map(IntegerKey::to_i128)
            .min()
            .unwrap_or(0)
            .min(0);
        let max_key = stage
            .items()
            .iter()
            .map(|value| offset_key(value, floor))
            .max()
            .unwrap_or(0);

        let mut exp: u128 = 1;
        while max_key / exp > 0 {
            counting_pass(stage, floor, exp)?;
            exp = match exp.checked_mul(RADIX) {
                Some(next) => next,
                None => break,
            };
        }
        stage.mark_range(0..n)
    })
}

/// Bucket sort over `max(10, isqrt(n))` equal-width value ranges.
///
/// Assignment emits `Bucket(i, bucket)`. Buckets are insertion-sorted without
/// emitting steps, then concatenated with `Merge(i, value)` and
/// `MarkSorted(i)` for every placed element.
pub fn bucket<T, S>(input: &[T], sink: &mut S) -> SortOutcome<T>
where
    T: IntegerKey,
    S: StepSink<T> + ?Sized,
{
    drive(input, sink, |stage| {
        let n = stage.len();
        let min = stage.items().iter().map(IntegerKey::to_i128).min().unwrap_or(0);
        let max = stage.items().iter().map(IntegerKey::to_i128).max().unwrap_or(0);
        let bucket_count = MIN_BUCKETS.max(n.isqrt());
        let width = max.wrapping_sub(min) as u128 / bucket_count as u128 + 1;

        let mut buckets: Vec<Vec<T>> = vec![Vec::new(); bucket_count];
        for index in 0..n {
            let value = stage.items()[index].clone();
            let slot = usize::try_from(offset_key(&value, min) / width)
                .map_or(bucket_count - 1, |slot| slot.min(bucket_count - 1));
            stage.bucket(index, slot)?;
            buckets[slot].push(value);
        }
        for contents in &mut buckets {
            settle(contents);
        }

        let ordered: Vec<T> = buckets.into_iter().flatten().collect();
        place_all(stage, &ordered)
    })
}

/// Distance of `value` above `floor`; `floor` never exceeds the smallest element.
fn offset_key<T: IntegerKey>(value: &T, floor: i128) -> u128 {
    value.to_i128().wrapping_sub(floor) as u128
}

fn digit_of<T: IntegerKey>(value: &T, floor: i128, exp: u128) -> usize {
    ((offset_key(value, floor) / exp) % RADIX) as usize
}

/// One stable counting pass on the digit selected by `exp`.
fn counting_pass<T, S>(stage: &mut Stage<'_, T, S>, floor: i128, exp: u128) -> Flow
where
    T: IntegerKey,
    S: StepSink<T> + ?Sized,
{
    let digits: Vec<usize> = stage
        .items()
        .iter()
        .map(|value| digit_of(value, floor, exp))
        .collect();

    let mut counts = [0usize; RADIX as usize];
    for (index, &digit) in digits.iter().enumerate() {
        counts[digit] += 1;
        stage.bucket(index, digit)?;
    }
    for digit in 1..counts.len() {
        counts[digit] += counts[digit - 1];
    }

    let mut output = stage.items().to_vec();
    for (index, value) in stage.items().iter().enumerate().rev() {
        let digit = digits[index];
        counts[digit] -= 1;
        output[counts[digit]] = value.clone();
    }
    stage.write_back(0, &output)
}

/// Concatenation phase of bucket sort; settles the rest silently if refused.
fn place_all<T, S>(stage: &mut Stage<'_, T, S>, ordered: &[T]) -> Flow
where
    T: IntegerKey,
    S: StepSink<T> + ?Sized,
{
    for (index, value) in ordered.iter().enumerate() {
        let placed = stage
            .write(index, value.clone())
            .and_then(|()| stage.mark_sorted(index));
        if placed.is_err() {
            stage.restore(index + 1, ordered[index + 1..].iter().cloned());
            return placed;
        }
    }
    Ok(())
}

/// Silent insertion sort for one bucket.
fn settle<T: Ord>(contents: &mut [T]) {
    for i in 1..contents.len() {
        let mut j = i;
        while j > 0 && contents[j - 1] > contents[j] {
            contents.swap(j - 1, j);
            j -= 1;
        }
    }
}
