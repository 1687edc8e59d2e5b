//! Domain types for package dependency records.
//!
//! A [`PackageRecord`] is the per-package fact produced by
//! `go list -json -deps`: the package's import path, its declared name, the
//! packages it imports directly, and its full transitive dependency set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared package name that marks an executable entry point.
pub const MAIN_PACKAGE_NAME: &str = "main";

/// Import path suffix of a synthesized test binary.
pub const TEST_BINARY_SUFFIX: &str = ".test";

/// Trailing character of a build-variant import path such as
/// `net/http [net/http.test]`.
pub const VARIANT_MARKER: char = ']';

/// One package as reported by the external metadata stream.
///
/// Field names follow the keys `go list -json` emits. Fields the Go tool
/// omits when empty default to empty values, and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Unique identifier of the package.
    #[serde(rename = "ImportPath")]
    pub import_path: String,

    /// Declared package name; `main` marks an executable.
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Import paths referenced directly by this package's source.
    #[serde(rename = "Imports", default)]
    pub direct_imports: Vec<String>,

    /// Full transitive dependency set, computed by the producer.
    #[serde(rename = "Deps", default)]
    pub all_dependencies: Vec<String>,
}

impl PackageRecord {
    /// Create a record with no imports or dependencies.
    pub fn new(import_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the direct imports.
    #[must_use]
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.direct_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Set the transitive dependencies.
    #[must_use]
    pub fn with_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this record describes a build variant that is never ingested.
    pub fn is_variant(&self) -> bool {
        self.import_path.ends_with(VARIANT_MARKER)
    }

    /// Classify the package by its declared name and import path.
    pub fn kind(&self) -> PackageKind {
        if self.name != MAIN_PACKAGE_NAME {
            PackageKind::Library
        } else if self.import_path.ends_with(TEST_BINARY_SUFFIX) {
            PackageKind::Test
        } else {
            PackageKind::Main
        }
    }
}

/// Role of a package in the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// An executable entry point.
    Main,
    /// A synthesized test binary.
    Test,
    /// Any other package.
    Library,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Main => write!(f, "main"),
            PackageKind::Test => write!(f, "test"),
            PackageKind::Library => write!(f, "library"),
        }
    }
}
