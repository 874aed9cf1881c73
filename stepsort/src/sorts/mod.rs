//! The runners, one public function per algorithm.
//!
//! Every runner sorts a private copy of its input, reports each event to the
//! sink through [`crate::core::sink::Stage`], and stops at the first refused
//! step. Distribution runners accept integer elements only.

pub mod bogo;
pub mod comparison;
pub mod distribution;
pub mod divide;
pub mod hybrid;

pub use bogo::{bogo, bogo_with_rng};
pub use comparison::{bubble, insertion, selection, shell};
pub use distribution::{bucket, radix};
pub use divide::{heap, merge, quick};
pub use hybrid::{cube, time};
