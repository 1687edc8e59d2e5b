//! Incremental record reading.
//!
//! This module provides an async reader that pulls bytes from an underlying
//! source on demand and decodes one JSON value at a time, tracking line
//! numbers and record numbers for error reporting.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Async reader for a stream of JSON records.
///
/// `RecordReader` accepts any amount of whitespace between values, including
/// none at all, so it handles both one-record-per-line input and the
/// multi-line objects produced by `go list -json`. Bytes are buffered only
/// until the value they belong to has been decoded.
///
/// # Type Parameters
///
/// * `R` - The underlying async reader type. Must implement [`AsyncRead`] and [`Unpin`].
///
/// # Examples
///
/// ```no_run
/// use depgraph_stream::RecordReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("deps.json").await?;
/// let mut reader = RecordReader::new(file);
/// while let Some(value) = reader.next_value().await? {
///     println!("{value}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct RecordReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Bytes read from `reader` that have not been decoded yet.
    pending: Vec<u8>,
    /// Set once the underlying reader reports end of input.
    exhausted: bool,
    /// 1-based line number of the first byte in `pending`.
    line_number: usize,
    /// Number of records decoded so far.
    record_number: usize,
    /// 1-based line on which the most recently decoded record started.
    record_line: usize,
    /// Progress through the value at the front of `pending`.
    scan: ValueScan,
    #[cfg(test)]
    parse_attempts: usize,
}

/// Tracks whether the object or array at the front of a buffer has been
/// closed, so the value is parsed once rather than on every refill.
///
/// Only bracket depth and string state are followed; validating the value
/// is left to `serde_json`.
#[derive(Debug, Default)]
struct ValueScan {
    /// Bytes of the value already examined.
    scanned: usize,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl ValueScan {
    /// Examines the bytes of `value` not seen yet and reports whether the
    /// value is complete.
    ///
    /// Values that are not objects or arrays always count as complete.
    fn advance(&mut self, value: &[u8]) -> bool {
        if !matches!(value.first(), Some(b'{' | b'[')) {
            return true;
        }
        for &b in &value[self.scanned..] {
            self.scanned += 1;
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if b == b'\\' {
                    self.escaped = true;
                } else if b == b'"' {
                    self.in_string = false;
                }
                continue;
            }
            match b {
                b'"' => self.in_string = true,
                b'{' | b'[' => self.depth += 1,
                b'}' | b']' => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.depth == 0 {
                        return true;
                    }
                }
                _ => {}
            }
        }
        false
    }
}

impl<R: AsyncRead + Unpin> RecordReader<R> {
    /// Creates a new `RecordReader` wrapping the given async reader.
    ///
    /// The reader is wrapped in a [`BufReader`] for efficient buffered I/O.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::from_buf_reader(BufReader::new(reader))
    }

    /// Creates a new `RecordReader` with a custom buffer capacity.
    ///
    /// Useful when records are known to be much larger or smaller than the
    /// default buffer.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::from_buf_reader(BufReader::with_capacity(capacity, reader))
    }

    fn from_buf_reader(reader: BufReader<R>) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            exhausted: false,
            line_number: 1,
            record_number: 0,
            record_line: 0,
            scan: ValueScan::default(),
            #[cfg(test)]
            parse_attempts: 0,
        }
    }

    /// Returns the number of records decoded so far.
    #[must_use]
    pub fn record_number(&self) -> usize {
        self.record_number
    }

    /// Returns the 1-based line on which the last decoded record started.
    ///
    /// Returns 0 before any record has been decoded.
    #[must_use]
    pub fn record_line(&self) -> usize {
        self.record_line
    }

    /// Decodes the next JSON value from the stream.
    ///
    /// Returns `Ok(None)` once only whitespace remains.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if reading from the underlying source fails
    /// - [`Error::Malformed`] if the input is not valid JSON
    /// - [`Error::Truncated`] if the input ends inside a value
    pub async fn next_value(&mut self) -> Result<Option<Value>> {
        loop {
            self.skip_whitespace();
            if self.pending.is_empty() {
                if self.exhausted {
                    return Ok(None);
                }
                self.fill().await?;
                continue;
            }

            if !self.exhausted && !self.scan.advance(&self.pending) {
                self.fill().await?;
                continue;
            }

            #[cfg(test)]
            {
                self.parse_attempts += 1;
            }
            let (parsed, offset) = {
                let mut values =
                    serde_json::Deserializer::from_slice(&self.pending).into_iter::<Value>();
                let parsed = values.next();
                (parsed, values.byte_offset())
            };

            match parsed {
                // A number that runs to the end of the buffer may continue in
                // the next chunk.
                Some(Ok(value))
                    if value.is_number() && offset == self.pending.len() && !self.exhausted =>
                {
                    self.fill().await?;
                }
                Some(Ok(value)) => {
                    self.record_number += 1;
                    self.record_line = self.line_number;
                    self.consume(offset);
                    return Ok(Some(value));
                }
                Some(Err(e)) if e.is_eof() => {
                    if self.exhausted {
                        return Err(Error::Truncated {
                            line_number: self.line_number,
                        });
                    }
                    self.fill().await?;
                }
                Some(Err(source)) => {
                    return Err(Error::Malformed {
                        line_number: self.line_number,
                        source,
                    });
                }
                None if self.exhausted => return Ok(None),
                None => self.fill().await?,
            }
        }
    }

    /// Decodes the next record as `T`.
    ///
    /// # Errors
    ///
    /// Everything [`next_value`](Self::next_value) returns, plus
    /// [`Error::InvalidRecord`] when the value does not deserialize into `T`.
    pub async fn next_record<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        let Some(value) = self.next_value().await? else {
            return Ok(None);
        };
        self.decode(value).map(Some)
    }

    /// Converts an already-decoded value into `T`, attributing failures to
    /// the most recent record.
    pub(crate) fn decode<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|source| Error::InvalidRecord {
            record_number: self.record_number,
            line_number: self.record_line,
            source,
        })
    }

    /// Pulls the next chunk from the underlying reader into `pending`.
    async fn fill(&mut self) -> Result<()> {
        let chunk = self.reader.fill_buf().await?;
        let len = chunk.len();
        if len == 0 {
            self.exhausted = true;
        } else {
            self.pending.extend_from_slice(chunk);
            self.reader.consume(len);
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        let len = self
            .pending
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        if len > 0 {
            self.consume(len);
        }
    }

    fn consume(&mut self, len: usize) {
        self.line_number += self.pending[..len]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.pending.drain(..len);
        self.scan = ValueScan::default();
    }
}
