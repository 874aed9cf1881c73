//! The step vocabulary shared by every runner.
//!
//! A step is one externally observable event of a sort in progress. Indices
//! always address the full working sequence, never a sub-range.

use serde::Serialize;

/// One discrete algorithmic event.
///
/// `Swap` is always a true exchange (`a != b`). Direct slot overwrites are
/// reported as `Merge`, never as a self-swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step<T> {
    /// Elements at `a` and `b` are being compared; nothing moved.
    Compare { a: usize, b: usize },
    /// Elements at `a` and `b` have just been exchanged.
    Swap { a: usize, b: usize },
    /// Slot `index` was just overwritten with `value` (merge or redistribution write).
    Merge { index: usize, value: T },
    /// Slot `index` holds its final value. May repeat for the same index.
    MarkSorted { index: usize },
    /// Element at `index` was assigned to distribution group `bucket`.
    Bucket { index: usize, bucket: usize },
    /// The run finished normally. Always the last event of a completed run.
    Completed,
}

/// Payload-free discriminant of a [`Step`], used for tallies and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Compare,
    Swap,
    Merge,
    MarkSorted,
    Bucket,
    Completed,
}

impl StepKind {
    pub const ALL: [StepKind; 6] = [
        StepKind::Compare,
        StepKind::Swap,
        StepKind::Merge,
        StepKind::MarkSorted,
        StepKind::Bucket,
        StepKind::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Compare => "compare",
            StepKind::Swap => "swap",
            StepKind::Merge => "merge",
            StepKind::MarkSorted => "mark_sorted",
            StepKind::Bucket => "bucket",
            StepKind::Completed => "completed",
        }
    }
}

impl<T> Step<T> {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Compare { .. } => StepKind::Compare,
            Step::Swap { .. } => StepKind::Swap,
            Step::Merge { .. } => StepKind::Merge,
            Step::MarkSorted { .. } => StepKind::MarkSorted,
            Step::Bucket { .. } => StepKind::Bucket,
            Step::Completed => StepKind::Completed,
        }
    }

    /// Indices of the working sequence this step touches, in emission order.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Step::Compare { a, b } | Step::Swap { a, b } => vec![*a, *b],
            Step::Merge { index, .. }
            | Step::MarkSorted { index }
            | Step::Bucket { index, .. } => vec![*index],
            Step::Completed => Vec::new(),
        }
    }
}
