//! Warning types for non-fatal errors during record decoding.
//!
//! When a stream is decoded resiliently, a record that is valid JSON but does
//! not have the expected shape is skipped instead of aborting the whole load.
//! The [`Warning`] type describes such a skip, and the [`WarningCollector`]
//! accumulates them while the stream is consumed.
//!
//! # Examples
//!
//! ```
//! use depgraph_stream::warning::{Warning, WarningCollector};
//!
//! let collector = WarningCollector::new();
//!
//! collector.add(Warning::InvalidRecord {
//!     record_number: 3,
//!     line_number: 41,
//!     error: "invalid type: integer `7`, expected a string".to_string(),
//! });
//!
//! let warnings = collector.into_warnings();
//! assert_eq!(warnings.len(), 1);
//! ```

use std::sync::{Arc, Mutex};

/// A non-fatal warning raised while decoding a record stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A record was valid JSON but could not be deserialized into the
    /// requested type. The record is skipped.
    InvalidRecord {
        /// 1-based index of the record within the stream.
        record_number: usize,
        /// 1-based line on which the record starts.
        line_number: usize,
        /// A description of the deserialization error.
        error: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::InvalidRecord { line_number, .. } => *line_number,
        }
    }

    /// Returns a human-readable description of the warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use depgraph_stream::warning::Warning;
    ///
    /// let warning = Warning::InvalidRecord {
    ///     record_number: 2,
    ///     line_number: 17,
    ///     error: "missing field `ImportPath`".to_string(),
    /// };
    /// let desc = warning.description();
    /// assert!(desc.contains("line 17"));
    /// assert!(desc.contains("ImportPath"));
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::InvalidRecord {
                record_number,
                line_number,
                error,
            } => format!("line {line_number}: skipped record {record_number}: {error}"),
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRecord { .. } => "invalid_record",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

/// A thread-safe collector for accumulating warnings during decoding.
///
/// The collector is cheap to clone; all clones share the same storage, so
/// one clone can be moved into a stream adapter while the caller keeps
/// another to read the warnings afterwards.
///
/// # Mutex Poisoning
///
/// All methods panic if the internal mutex is poisoned, which only happens if
/// another thread panicked while holding the lock.
#[derive(Debug, Clone, Default)]
pub struct WarningCollector {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl WarningCollector {
    /// Creates a new empty `WarningCollector`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning to the collector.
    pub fn add(&self, warning: Warning) {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .push(warning);
    }

    /// Returns the number of warnings collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .len()
    }

    /// Returns `true` if no warnings have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of all collected warnings without consuming the collector.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .lock()
            .expect("warning collector mutex should not be poisoned")
            .clone()
    }

    /// Consumes the collector and returns all collected warnings.
    ///
    /// If this is the last reference to the underlying storage the warnings
    /// are moved out; otherwise they are cloned.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        Arc::try_unwrap(self.warnings)
            .map(|mutex| mutex.into_inner().expect("mutex should not be poisoned"))
            .unwrap_or_else(|arc| {
                arc.lock()
                    .expect("warning collector mutex should not be poisoned")
                    .clone()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(record_number: usize, line_number: usize) -> Warning {
        Warning::InvalidRecord {
            record_number,
            line_number,
            error: "bad shape".to_string(),
        }
    }

    #[test]
    fn invalid_record_reports_line_and_kind() {
        let warning = invalid(4, 30);
        assert_eq!(warning.line_number(), 30);
        assert_eq!(warning.kind(), "invalid_record");
        assert_eq!(
            warning.to_string(),
            "line 30: skipped record 4: bad shape"
        );
    }

    #[test]
    fn collector_starts_empty() {
        let collector = WarningCollector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.len(), 0);
    }

    #[test]
    fn clones_share_storage() {
        let collector = WarningCollector::new();
        let clone = collector.clone();

        clone.add(invalid(1, 1));
        clone.add(invalid(2, 5));

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.warnings(), vec![invalid(1, 1), invalid(2, 5)]);
    }

    #[test]
    fn into_warnings_works_with_outstanding_clone() {
        let collector = WarningCollector::new();
        let clone = collector.clone();
        collector.add(invalid(1, 1));

        let warnings = collector.into_warnings();
        assert_eq!(warnings, vec![invalid(1, 1)]);
        assert_eq!(clone.len(), 1);
    }

    #[test]
    fn collector_is_usable_across_threads() {
        let collector = WarningCollector::new();

        std::thread::scope(|scope| {
            for i in 0..4 {
                let collector = collector.clone();
                scope.spawn(move || collector.add(invalid(i, i)));
            }
        });

        assert_eq!(collector.len(), 4);
    }
}
