//! Error type of the source document layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors returned by [`SourceDocument`](crate::SourceDocument) operations.
pub enum DocumentError {
    #[error("offset {offset} out of range (document length {len})")]
    /// An offset lies past the end of the document.
    InvalidOffset {
        /// The rejected offset.
        offset: usize,
        /// Document length at the time of the call.
        len: usize,
    },

    #[error("range {start}..{end} out of range (document length {len})")]
    /// A range is reversed or extends past the end of the document.
    InvalidRange {
        /// Range start.
        start: usize,
        /// Range end.
        end: usize,
        /// Document length at the time of the call.
        len: usize,
    },

    #[error("line {line} out of range ({line_count} lines)")]
    /// A line index is past the last line.
    InvalidLine {
        /// The rejected line.
        line: usize,
        /// Number of lines in the document.
        line_count: usize,
    },

    #[error("malformed package statement: {0}")]
    /// The document starts with a `package` statement that is not a dotted identifier.
    InvalidPackage(String),

    #[error("reduced model out of sync with the text: {0}")]
    /// The model reported a position the text does not have.
    InvariantViolation(String),
}

/// Result alias for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
