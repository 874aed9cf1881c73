//! Errors raised by the dispatcher.
//!
//! Sorting itself cannot fail. The only errors are rejected requests, and
//! they are always reported before any step is emitted. Cancellation is not
//! an error; see [`crate::core::sink::SortStop`].

use thiserror::Error;

use crate::core::algorithm::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// The identifier does not name any known algorithm.
    #[error("unknown algorithm '{0}' (expected one of: {})", known_ids())]
    UnknownAlgorithm(String),

    /// The algorithm derives indices from integer values and the element type has none.
    #[error("{} requires integer elements", .algorithm.display_name())]
    RequiresIntegerKeys {
        /// Algorithm that was requested.
        algorithm: Algorithm,
    },
}

fn known_ids() -> String {
    Algorithm::ALL
        .iter()
        .map(|algorithm| algorithm.id())
        .collect::<Vec<_>>()
        .join(", ")
}
