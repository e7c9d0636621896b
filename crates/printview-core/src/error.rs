//! Error handling for PrintView
//!
//! Provides error types for the layers of the preview pipeline:
//! - Parse errors (size limit, empty input, cancellation)
//! - Fetch errors (chunked byte-range retrieval)
//!
//! Everything else the parser meets in a G-code file is absorbed locally,
//! so these are the only ways a parse attempt can fail.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Parse error type
///
/// Fatal outcomes of a single parse attempt. No partial result is produced
/// when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input exceeds the configured byte ceiling
    #[error("G-code is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge {
        /// The size of the rejected input in bytes.
        size: usize,
        /// The configured limit in bytes.
        limit: usize,
    },

    /// Input has no content
    #[error("G-code content is empty")]
    Empty,

    /// Caller cancelled the parse between lines
    #[error("Parse cancelled after {lines} lines")]
    Cancelled {
        /// Lines consumed before the cancellation was observed.
        lines: usize,
    },
}

/// Fetch error type
///
/// Represents failures reported while assembling input from byte ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The range source failed to deliver a chunk
    #[error("Range request at offset {offset} failed: {reason}")]
    Source {
        /// Byte offset of the failed request.
        offset: u64,
        /// The reason reported by the source.
        reason: String,
    },

    /// A Content-Range header could not be understood
    #[error("Malformed Content-Range header: {header}")]
    InvalidContentRange {
        /// The raw header value.
        header: String,
    },
}

/// Feature name that is not part of the taxonomy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown feature type: {0}")]
pub struct UnknownFeatureError(pub String);

/// Main error type for PrintView
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the input was rejected for exceeding the byte limit
    pub fn is_size_limit(&self) -> bool {
        matches!(self, Error::Parse(ParseError::TooLarge { .. }))
    }

    /// Check if the input turned out to be empty
    pub fn is_empty_content(&self) -> bool {
        matches!(self, Error::Parse(ParseError::Empty))
    }

    /// Check if the parse was cancelled by the caller
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Parse(ParseError::Cancelled { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
