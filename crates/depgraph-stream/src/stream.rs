//! Stream adapters over [`RecordReader`].
//!
//! Two flavours are provided:
//!
//! - [`RecordReader::into_stream`] yields every record and ends after the
//!   first error of any kind.
//! - [`RecordReader::into_resilient_stream`] skips records whose shape does
//!   not match the requested type, reporting each one to a
//!   [`WarningCollector`]. Syntax errors still end the stream, since the
//!   decoder cannot find the start of the next record inside broken JSON.

use crate::error::Result;
use crate::reader::RecordReader;
use crate::warning::{Warning, WarningCollector};
use futures::stream::{self, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncRead;

impl<R: AsyncRead + Unpin> RecordReader<R> {
    /// Converts the reader into a stream of decoded records.
    ///
    /// The stream yields `Err` at most once and ends immediately after it.
    pub fn into_stream<T: DeserializeOwned>(self) -> impl Stream<Item = Result<T>> {
        stream::unfold(Some(self), |state| async move {
            let mut reader = state?;
            match reader.next_record::<T>().await {
                Ok(Some(record)) => Some((Ok(record), Some(reader))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Converts the reader into a stream that skips records of the wrong shape.
    ///
    /// Each skipped record adds a [`Warning::InvalidRecord`] to `warnings`.
    /// IO, syntax, and truncation errors are still yielded and end the stream.
    pub fn into_resilient_stream<T: DeserializeOwned>(
        self,
        warnings: WarningCollector,
    ) -> impl Stream<Item = Result<T>> {
        stream::unfold(Some((self, warnings)), |state| async move {
            let (mut reader, warnings) = state?;
            loop {
                let value = match reader.next_value().await {
                    Ok(Some(value)) => value,
                    Ok(None) => return None,
                    Err(e) => return Some((Err(e), None)),
                };
                match serde_json::from_value::<T>(value) {
                    Ok(record) => return Some((Ok(record), Some((reader, warnings)))),
                    Err(e) => {
                        tracing::debug!(
                            record = reader.record_number(),
                            line = reader.record_line(),
                            error = %e,
                            "Skipping record with unexpected shape"
                        );
                        warnings.add(Warning::InvalidRecord {
                            record_number: reader.record_number(),
                            line_number: reader.record_line(),
                            error: e.to_string(),
                        });
                    }
                }
            }
        })
    }
}

/// Reads every record from a file, failing on the first error.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any record fails to decode.
pub async fn read_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let file = File::open(path.as_ref()).await?;
    let mut records = Vec::new();
    let mut stream = std::pin::pin!(RecordReader::new(file).into_stream::<T>());
    while let Some(record) = stream.next().await {
        records.push(record?);
    }
    Ok(records)
}

/// Reads every well-formed record from a file, collecting warnings for the rest.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, or if the input contains
/// invalid JSON syntax or ends inside a record.
pub async fn read_records_resilient<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<(Vec<T>, Vec<Warning>)> {
    let file = File::open(path.as_ref()).await?;
    let collector = WarningCollector::new();
    let records: Vec<T> = RecordReader::new(file)
        .into_resilient_stream::<T>(collector.clone())
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<_>>()?;
    Ok((records, collector.into_warnings()))
}
