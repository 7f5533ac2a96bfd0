//! Error type for the LSP bridge.

use eol_core::CoordinateError;
use thiserror::Error;

/// Errors raised while decoding protocol payloads or updating documents.
#[derive(Debug, Error)]
pub enum LspError {
    /// A JSON payload could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A JSON value did not have the expected shape.
    #[error("malformed {kind}: {reason}")]
    Malformed {
        /// What was being decoded, e.g. `"TextEdit"`.
        kind: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// A document update carried a version that is not newer than the current one.
    #[error("stale document version {received} (current {current})")]
    StaleVersion {
        /// Version of the current snapshot.
        current: i32,
        /// Version carried by the rejected update.
        received: i32,
    },
    /// A coordinate did not fit the document snapshot.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}
