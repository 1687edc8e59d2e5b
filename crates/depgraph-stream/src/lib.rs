//! Incremental decoding of JSON record streams.
//!
//! Reads a sequence of JSON values separated by arbitrary whitespace, which
//! covers both JSON Lines and the concatenated, pretty-printed objects that
//! `go list -json` writes. Records are decoded one at a time so a consumer can
//! feed them into its own data structure without holding the raw input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;
pub mod stream;
pub mod warning;

pub use error::{Error, Result};
pub use reader::RecordReader;
pub use stream::{read_records, read_records_resilient};
pub use warning::{Warning, WarningCollector};
