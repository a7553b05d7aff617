//! Error types for the index.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the index.
///
/// The tree lives entirely in memory, so the taxonomy is small: bad
/// construction parameters, bad search operators, and structural checks
/// that failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A search operator string that is not one of `<`, `<=`, `=`, `>=`, `>`, `!=`.
    #[error("unknown operator: {0}")]
    InvalidOperator(String),

    /// The minimum degree passed at construction is too small.
    ///
    /// A degree below 2 would allow nodes with zero keys.
    #[error("invalid minimum degree: {degree} (min: {min})")]
    InvalidMinimumDegree {
        /// The rejected degree.
        degree: usize,
        /// Smallest accepted degree.
        min: usize,
    },

    /// A structural invariant of the tree does not hold.
    ///
    /// Only produced by `BTree::check_invariants`. This indicates a bug,
    /// or a comparator/selector pair that is not a consistent total order.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
