//! Error type for segmentation and noodlification.

use thiserror::Error;

/// Error type for noodlification operations.
///
/// Empty results are not errors: an empty input, an empty product language
/// or an all-discarded enumeration each yield an empty noodle sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoodlerError {
    /// The input automaton violates a segmentation precondition, e.g. its
    /// ε-transitions do not partition into disjoint depths.
    #[error("malformed automaton: {0}")]
    MalformedAutomaton(String),
    /// The mixed-radix candidate count exceeds the configured bound.
    #[error("noodle enumeration of {candidates} candidates exceeds the limit of {limit}")]
    EnumerationTooLarge {
        /// Number of candidate noodles the enumeration would visit.
        candidates: u128,
        /// The configured bound.
        limit: u64,
    },
}

/// Result type for noodlification operations.
pub type Result<T> = std::result::Result<T, NoodlerError>;
