//! The package dependency graph and its queries.
//!
//! A [`DepGraph`] is built once by repeated calls to [`DepGraph::insert`] and
//! then queried read-only. It holds four pieces of state:
//!
//! - direct-import adjacency (`package -> packages it imports`)
//! - transitive-dependency adjacency (`package -> everything it depends on`),
//!   supplied by the caller rather than derived here
//! - the set of main (executable) packages
//! - the set of test-binary packages
//!
//! # Queries
//!
//! - membership and counting: [`exists`](DepGraph::exists),
//!   [`is_main`](DepGraph::is_main), [`count_all`](DepGraph::count_all), ...
//! - reverse dependencies: [`search_all`](DepGraph::search_all),
//!   [`search_main`](DepGraph::search_main), [`search_test`](DepGraph::search_test)
//! - unused packages: [`list_unused`](DepGraph::list_unused)
//! - witness chains: [`search_chain`](DepGraph::search_chain) (see [`chain`])
//! - reachable subgraph: [`search_subgraph`](DepGraph::search_subgraph) (see [`subgraph`])
//!
//! Every query is total. Unknown packages give empty results or `false`.
//!
//! # Thread Safety
//!
//! Insertion takes `&mut self`, so the borrow checker keeps ingestion and
//! querying apart. Once built the graph is plain data and can be shared
//! behind an `Arc` for concurrent reads.
//!
//! # Ordering
//!
//! Per-package sets are `BTreeSet`s and reverse-dependency results are sorted,
//! so chains and subgraphs are deterministic for a given input.

pub mod chain;
pub mod subgraph;

pub use chain::{Chain, ChainLink};
pub use subgraph::Subgraph;

use crate::domain::{PackageKind, PackageRecord};
use std::collections::{BTreeSet, HashMap, HashSet};

/// In-memory package dependency graph.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    /// Direct imports of each ingested package.
    imports: HashMap<String, BTreeSet<String>>,

    /// Transitive dependencies of each ingested package. Same key set as `imports`.
    all_deps: HashMap<String, BTreeSet<String>>,

    /// Executable packages, excluding test binaries.
    main_packages: HashSet<String>,

    /// Synthesized test binaries.
    test_packages: HashSet<String>,
}

impl DepGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one package record.
    ///
    /// Build variants (import paths ending in `]`) are dropped without a
    /// trace. Re-inserting a known path replaces its import and dependency
    /// sets; main/test membership is only ever added.
    pub fn insert(&mut self, record: PackageRecord) {
        if record.is_variant() {
            return;
        }

        match record.kind() {
            PackageKind::Main => {
                self.main_packages.insert(record.import_path.clone());
            }
            PackageKind::Test => {
                self.test_packages.insert(record.import_path.clone());
            }
            PackageKind::Library => {}
        }

        let PackageRecord {
            import_path,
            direct_imports,
            all_dependencies,
            ..
        } = record;
        self.imports
            .insert(import_path.clone(), direct_imports.into_iter().collect());
        self.all_deps
            .insert(import_path, all_dependencies.into_iter().collect());
    }

    /// Whether `package` has been ingested.
    pub fn exists(&self, package: &str) -> bool {
        self.all_deps.contains_key(package)
    }

    /// Whether `package` is an executable entry point.
    pub fn is_main(&self, package: &str) -> bool {
        self.main_packages.contains(package)
    }

    /// Whether `package` is a test binary.
    pub fn is_test(&self, package: &str) -> bool {
        self.test_packages.contains(package)
    }

    /// Number of ingested packages.
    pub fn count_all(&self) -> usize {
        self.imports.len()
    }

    /// Number of main packages.
    pub fn count_main(&self) -> usize {
        self.main_packages.len()
    }

    /// Number of test binaries.
    pub fn count_test(&self) -> usize {
        self.test_packages.len()
    }

    /// Direct imports of `package`, if it has been ingested.
    pub fn imports_of(&self, package: &str) -> Option<&BTreeSet<String>> {
        self.imports.get(package)
    }

    /// Transitive dependencies of `package`, if it has been ingested.
    pub fn deps_of(&self, package: &str) -> Option<&BTreeSet<String>> {
        self.all_deps.get(package)
    }

    /// Whether `target` is in the transitive dependency set of `package`.
    pub fn depends_on(&self, package: &str, target: &str) -> bool {
        self.all_deps
            .get(package)
            .is_some_and(|deps| deps.contains(target))
    }

    /// Every ingested package that transitively depends on `target`, sorted.
    pub fn search_all(&self, target: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .all_deps
            .iter()
            .filter(|(_, deps)| deps.contains(target))
            .map(|(package, _)| package.as_str())
            .collect();
        found.sort_unstable();
        found
    }

    /// Main packages that depend on `target`, sorted.
    ///
    /// A main package counts as depending on itself, so `target` is included
    /// when it is a main package.
    pub fn search_main(&self, target: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .main_packages
            .iter()
            .filter(|package| *package == target || self.depends_on(package, target))
            .map(String::as_str)
            .collect();
        found.sort_unstable();
        found
    }

    /// Test binaries that depend on `target`, sorted.
    ///
    /// Unlike [`search_main`](Self::search_main), a test binary never matches
    /// itself.
    pub fn search_test(&self, target: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .test_packages
            .iter()
            .filter(|package| self.depends_on(package, target))
            .map(String::as_str)
            .collect();
        found.sort_unstable();
        found
    }

    /// Packages that are neither main nor test and that no other ingested
    /// package depends on, sorted by import path.
    ///
    /// Quadratic in the number of packages.
    pub fn list_unused(&self) -> Vec<&str> {
        let mut unused: Vec<&str> = self
            .all_deps
            .keys()
            .filter(|package| !self.is_main(package) && !self.is_test(package))
            .filter(|package| {
                !self
                    .all_deps
                    .iter()
                    .any(|(other, deps)| other != *package && deps.contains(package.as_str()))
            })
            .map(String::as_str)
            .collect();
        unused.sort_unstable();
        unused
    }
}

impl Extend<PackageRecord> for DepGraph {
    fn extend<I: IntoIterator<Item = PackageRecord>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }
}

impl FromIterator<PackageRecord> for DepGraph {
    fn from_iter<I: IntoIterator<Item = PackageRecord>>(records: I) -> Self {
        let mut graph = Self::new();
        graph.extend(records);
        graph
    }
}
