//! Error types for list operations.

use thiserror::Error;

/// Failure of a correlation list operation.
///
/// Both variants are immediate and deterministic given the chain's shape;
/// the list performs no I/O and nothing here is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// Positional read past the end of the list. Treat as "not found".
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange {
        /// Requested offset from the head.
        index: usize,
        /// Number of live nodes at the time of the call.
        len: usize,
    },

    /// The key does not name a node linked into this list: it was already
    /// removed or evicted. Indicates a caller bug.
    #[error("node is not linked into this list")]
    NotInList,
}
