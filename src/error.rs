//! Error type shared by every trie store.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failures surfaced by store construction and by growing insertions.
///
/// Absence (`find` on a missing key) and duplicate inserts are not errors;
/// they are reported through `Option` and `bool` results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// The key element type maps onto an empty alphabet.
    #[error("key alphabet must contain at least one mapped element")]
    EmptyAlphabet,
    /// The double array would have to grow past its configured ceiling.
    #[error("double array needs {requested} slots but is limited to {limit}")]
    CapacityExhausted {
        /// Slot count the operation needed.
        requested: usize,
        /// Configured maximum slot count.
        limit: usize,
    },
    /// The allocator refused to reserve node storage.
    #[error("failed to reserve trie storage: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Result alias for fallible trie operations.
pub type Result<T> = std::result::Result<T, TrieError>;
