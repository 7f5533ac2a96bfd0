//! Errors reported by the checked coordinate APIs.

use thiserror::Error;

/// A coordinate query that does not fit the text snapshot it was made against.
///
/// The plain conversions never fail; only the `try_*` and `check_snapshot` methods report
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// The offset lies past the end of the text.
    #[error("offset {offset} is past the end of the text (length {len})")]
    OffsetOutOfBounds {
        /// The rejected offset.
        offset: usize,
        /// Length of the indexed text.
        len: usize,
    },
    /// The line does not exist in the text.
    #[error("line {line} does not exist (line count {line_count})")]
    LineOutOfBounds {
        /// The rejected line.
        line: usize,
        /// Number of lines in the indexed text.
        line_count: usize,
    },
    /// The structure was built from a different text than the one it is used with.
    #[error("index was built for a text of length {expected}, but the text has length {actual}")]
    SnapshotMismatch {
        /// Length of the text the structure was built from.
        expected: usize,
        /// Length of the text it is being used with.
        actual: usize,
    },
}
