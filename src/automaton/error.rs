//! Construction and search errors.

use std::collections::TryReserveError;

/// Broad classification of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The pattern set itself is unusable.
    InvalidInput,
    /// The pattern set does not fit the chosen index width.
    CapacityExceeded,
    /// Memory for the automaton could not be reserved.
    AllocationFailure,
}

/// Errors that can occur while building an automaton.
///
/// A failed build never hands back a partial automaton.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("pattern set must contain at least one pattern")]
    EmptyPatternSet,

    #[error("pattern {index} is empty")]
    EmptyPattern { index: usize },

    #[error("too many patterns: {count} does not fit below the index limit {limit}")]
    TooManyPatterns { count: usize, limit: usize },

    #[error("too many states for the automaton to handle (limit {limit})")]
    TooManyStates { limit: usize },

    #[error("memory allocation failed while building the automaton")]
    Allocation(#[from] TryReserveError),
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::EmptyPatternSet | BuildError::EmptyPattern { .. } => {
                ErrorKind::InvalidInput
            }
            BuildError::TooManyPatterns { .. } | BuildError::TooManyStates { .. } => {
                ErrorKind::CapacityExceeded
            }
            BuildError::Allocation(_) => ErrorKind::AllocationFailure,
        }
    }
}

/// Errors that can occur while searching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("memory allocation failed while collecting matches")]
    Allocation(#[from] TryReserveError),
}
