//! Error types for depgraph-stream operations.

use std::io;
use thiserror::Error;

/// The error type for record stream decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    ///
    /// The decoder cannot resynchronise inside a broken value, so this error
    /// ends the stream. The position inside `source` is relative to the start
    /// of the offending record.
    #[error("malformed JSON in record starting at line {line_number}: {source}")]
    Malformed {
        /// 1-based line on which the broken record starts.
        line_number: usize,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The input ended in the middle of a value.
    #[error("unexpected end of input in record starting at line {line_number}")]
    Truncated {
        /// 1-based line on which the incomplete record starts.
        line_number: usize,
    },

    /// A syntactically valid value did not match the requested record type.
    #[error("record {record_number} (line {line_number}) has an unexpected shape: {source}")]
    InvalidRecord {
        /// 1-based index of the record within the stream.
        record_number: usize,
        /// 1-based line on which the record starts.
        line_number: usize,
        /// The deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for depgraph-stream operations.
pub type Result<T> = std::result::Result<T, Error>;
