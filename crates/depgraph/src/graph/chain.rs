//! Witness chains from entry points to a target package.
//!
//! A chain shows one concrete path of direct-import edges from a main package
//! down to a target, prefixed with a root link standing for the binary entry
//! point:
//!
//! ```text
//! main -> example.com/cmd/app -> example.com/internal/db -> database/sql
//! ```
//!
//! The search is depth-first and returns the first path it finds, not the
//! shortest. When the transitive dependency data says a path exists but the
//! ingested direct imports cannot reproduce it (typically because an
//! intermediate package was never ingested), the missing steps are shown as
//! a single elided link:
//!
//! ```text
//! main -> example.com/cmd/app -> ... -> golang.org/x/sys/unix
//! ```

use super::DepGraph;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Rendering of [`ChainLink::Root`].
pub const ROOT_LABEL: &str = "main";

/// Rendering of [`ChainLink::Elided`].
pub const ELIDED_LABEL: &str = "...";

/// One element of a [`Chain`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChainLink {
    /// The binary entry point.
    Root,
    /// A package on the path.
    Package(String),
    /// Steps that could not be reconstructed from the ingested imports.
    Elided,
}

impl ChainLink {
    /// The import path, if this link is a package.
    pub fn as_package(&self) -> Option<&str> {
        match self {
            ChainLink::Package(path) => Some(path),
            ChainLink::Root | ChainLink::Elided => None,
        }
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainLink::Root => f.write_str(ROOT_LABEL),
            ChainLink::Package(path) => f.write_str(path),
            ChainLink::Elided => f.write_str(ELIDED_LABEL),
        }
    }
}

impl Serialize for ChainLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An ordered witness path: root, entry point, intermediate packages, target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chain {
    links: Vec<ChainLink>,
}

impl Chain {
    /// All links, root first.
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// The main package the chain starts from.
    pub fn entry_point(&self) -> Option<&str> {
        self.links.get(1).and_then(ChainLink::as_package)
    }

    /// The package the chain ends at.
    pub fn target(&self) -> Option<&str> {
        self.links.last().and_then(ChainLink::as_package)
    }

    /// Whether part of the path had to be elided.
    pub fn is_complete(&self) -> bool {
        !self.links.contains(&ChainLink::Elided)
    }

    /// Number of links, including the root.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no links. Chains built by
    /// [`DepGraph::search_chain`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{link}")?;
        }
        Ok(())
    }
}

impl DepGraph {
    /// One witness chain for every main package that depends on `target`.
    ///
    /// Chains come out in the order of [`search_main`](Self::search_main).
    /// If `target` is itself a main package, its chain is just root and target.
    pub fn search_chain(&self, target: &str) -> Vec<Chain> {
        self.search_main(target)
            .into_iter()
            .map(|entry| self.chain_from(entry, target))
            .collect()
    }

    fn chain_from(&self, entry: &str, target: &str) -> Chain {
        let mut links = vec![ChainLink::Root, ChainLink::Package(entry.to_string())];
        if entry == target {
            return Chain { links };
        }

        let mut visited = HashSet::from([entry]);
        match self.find_path(entry, target, &mut visited) {
            Some(path) => links.extend(
                path.into_iter()
                    .rev()
                    .map(|p| ChainLink::Package(p.to_string())),
            ),
            None => {
                links.push(ChainLink::Elided);
                links.push(ChainLink::Package(target.to_string()));
            }
        }
        Chain { links }
    }

    /// Depth-first search for a direct-import path from `start` to `target`.
    ///
    /// Returns the path below `start` in reverse order, target first.
    /// `visited` keeps the search finite on cyclic import data; a package
    /// that failed once cannot succeed on a later branch.
    fn find_path<'a>(
        &'a self,
        start: &str,
        target: &str,
        visited: &mut HashSet<&'a str>,
    ) -> Option<Vec<&'a str>> {
        if !self.depends_on(start, target) {
            return None;
        }
        let imports = self.imports.get(start)?;
        if let Some(hit) = imports.get(target) {
            return Some(vec![hit.as_str()]);
        }
        for next in imports {
            if !visited.insert(next.as_str()) {
                continue;
            }
            if let Some(mut path) = self.find_path(next, target, visited) {
                path.push(next.as_str());
                return Some(path);
            }
        }
        None
    }
}
