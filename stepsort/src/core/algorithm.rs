//! The closed set of algorithm identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::SortError;

/// Every runner the dispatcher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Shell,
    Quick,
    Merge,
    Heap,
    Radix,
    Bucket,
    Time,
    Cube,
    Bogo,
}

impl Algorithm {
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Shell,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Radix,
        Algorithm::Bucket,
        Algorithm::Time,
        Algorithm::Cube,
        Algorithm::Bogo,
    ];

    /// Stable lowercase identifier used on the command line and in traces.
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Shell => "shell",
            Algorithm::Quick => "quick",
            Algorithm::Merge => "merge",
            Algorithm::Heap => "heap",
            Algorithm::Radix => "radix",
            Algorithm::Bucket => "bucket",
            Algorithm::Time => "time",
            Algorithm::Cube => "cube",
            Algorithm::Bogo => "bogo",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Shell => "Shell Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Radix => "Radix Sort",
            Algorithm::Bucket => "Bucket Sort",
            Algorithm::Time => "Time Sort",
            Algorithm::Cube => "Cube Sort",
            Algorithm::Bogo => "Bogo Sort",
        }
    }

    /// One-paragraph summary with the average complexity.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Bubble => {
                "Repeatedly steps through the list, compares adjacent elements and swaps \
                 them when they are out of order. Average time complexity: O(n^2)"
            }
            Algorithm::Selection => {
                "Splits the input into a sorted and an unsorted region and repeatedly moves \
                 the minimum of the unsorted region to its end. Average time complexity: O(n^2)"
            }
            Algorithm::Insertion => {
                "Builds the sorted output one element at a time, shifting each new element \
                 left until it is in place. Average time complexity: O(n^2)"
            }
            Algorithm::Shell => {
                "Generalizes insertion sort by first exchanging elements that are far apart, \
                 halving the gap each pass. Average time complexity: O(n (log n)^2)"
            }
            Algorithm::Quick => {
                "Partitions the range around its rightmost element as pivot, then sorts both \
                 sides recursively. Average time complexity: O(n log n)"
            }
            Algorithm::Merge => {
                "Splits the input into halves, sorts each half, then merges the sorted halves. \
                 Average time complexity: O(n log n)"
            }
            Algorithm::Heap => {
                "Arranges the input as a binary max-heap, then repeatedly moves the maximum \
                 to the end and restores the heap. Average time complexity: O(n log n)"
            }
            Algorithm::Radix => {
                "Sorts integers digit by digit, least significant first, with a stable \
                 counting pass per digit. Average time complexity: O(nk) for k digits"
            }
            Algorithm::Bucket => {
                "Distributes integers into value-range buckets, sorts each bucket, then \
                 concatenates them. Average time complexity: O(n + k) for k buckets"
            }
            Algorithm::Time => {
                "Hybrid of insertion sort for small ranges and merge sort for larger ones. \
                 Average time complexity: O(n log n)"
            }
            Algorithm::Cube => {
                "Insertion-sorts fixed-size chunks, then merges neighbouring chunks with a \
                 doubling width. Average time complexity: O(n log n)"
            }
            Algorithm::Bogo => {
                "Shuffles the input until it happens to be sorted. Runtime is unbounded; \
                 cap it with a step limit. Average time complexity: O(n * n!)"
            }
        }
    }

    /// Radix and bucket sort derive indices from element values.
    pub fn requires_integer_keys(self) -> bool {
        matches!(self, Algorithm::Radix | Algorithm::Bucket)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    /// Accepts the identifier or the display name, ignoring case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| {
                algorithm.id().eq_ignore_ascii_case(wanted)
                    || algorithm.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SortError::UnknownAlgorithm(raw.to_string()))
    }
}
