//! Error types for flvmerge-media.

use std::io;
use thiserror::Error;

/// Result type for flvmerge-media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for flvmerge-media operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File does not start with a valid FLV header.
    #[error("Invalid FLV header: {0}")]
    InvalidHeader(String),

    /// Stream ended in the middle of a tag record.
    #[error("Truncated stream while reading {context}")]
    Truncated { context: &'static str },

    /// Integer field width outside the supported 1..=4 byte range.
    #[error("Invalid field size: {size} bytes (expected 1..=4)")]
    InvalidFieldSize { size: usize },

    /// Search pattern empty or longer than the haystack.
    #[error("Invalid search pattern: {pattern_len} bytes against a {haystack_len}-byte haystack")]
    InvalidPattern {
        pattern_len: usize,
        haystack_len: usize,
    },

    /// A required script-data marker was not found.
    #[error("Script data marker not found: {0}")]
    MarkerNotFound(&'static str),

    /// The first source carried no script metadata tag, so there is no
    /// duration field in the output to patch.
    #[error("First input has no script metadata tag; cannot patch duration")]
    NoDurationMetadata,
}

impl Error {
    /// Create an invalid header error.
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }
}
