//! Extraction of every direct-import path between two packages.
//!
//! Where a [`Chain`](super::Chain) shows one way a package is reached, a
//! [`Subgraph`] keeps all of them: each edge `from -> to` is a direct import
//! of `from` that leads toward the target, either because `to` is the target
//! or because `to` still transitively depends on it.

use super::DepGraph;
use petgraph::dot::{Config, Dot};
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// The productive direct-import edges from `start` toward `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subgraph {
    start: String,
    target: String,
    edges: BTreeMap<String, Vec<String>>,
}

impl Subgraph {
    /// The package the traversal started from.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The package every edge leads toward.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Productive imports keyed by importing package.
    pub fn edges(&self) -> &BTreeMap<String, Vec<String>> {
        &self.edges
    }

    /// Productive imports of `package`; empty when it has none.
    pub fn successors(&self, package: &str) -> &[String] {
        self.edges.get(package).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the edge `from -> to` is part of the subgraph.
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.successors(from).iter().any(|p| p == to)
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Whether the subgraph has no edges.
    ///
    /// A subgraph can be empty even though `start` depends on `target`, when
    /// none of the ingested direct imports lead there.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Render the subgraph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        let mut graph: DiGraphMap<&str, &str> = DiGraphMap::new();
        graph.add_node(self.start.as_str());
        for (from, tos) in &self.edges {
            for to in tos {
                graph.add_edge(from.as_str(), to.as_str(), "");
            }
        }
        format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}

impl DepGraph {
    /// Every direct-import path from `start` to `target`, as a subgraph.
    ///
    /// Returns `None` when `start` does not transitively depend on `target`.
    /// The traversal is breadth-first and expands each package at most once;
    /// `target` itself is never expanded.
    pub fn search_subgraph(&self, start: &str, target: &str) -> Option<Subgraph> {
        if !self.depends_on(start, target) {
            return None;
        }

        let mut edges: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut queue: VecDeque<&str> = VecDeque::from([start]);

        while let Some(from) = queue.pop_front() {
            let Some(imports) = self.imports.get(from) else {
                continue;
            };
            for next in imports {
                if next == target {
                    edges.entry(from.to_string()).or_default().push(next.clone());
                    continue;
                }
                if self.depends_on(next, target) {
                    if visited.insert(next.as_str()) {
                        queue.push_back(next.as_str());
                    }
                    edges.entry(from.to_string()).or_default().push(next.clone());
                }
            }
        }

        Some(Subgraph {
            start: start.to_string(),
            target: target.to_string(),
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PackageRecord;
    use crate::graph::tests::sample_graph;

    /// A diamond: app -> {left, right} -> base, plus a dead end.
    fn diamond() -> DepGraph {
        [
            PackageRecord::new("app", "main")
                .with_imports(["left", "right", "unrelated"])
                .with_deps(["left", "right", "base", "unrelated"]),
            PackageRecord::new("left", "left")
                .with_imports(["base"])
                .with_deps(["base"]),
            PackageRecord::new("right", "right")
                .with_imports(["base"])
                .with_deps(["base"]),
            PackageRecord::new("unrelated", "unrelated"),
            PackageRecord::new("base", "base"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn keeps_every_path_to_target() {
        let sub = diamond().search_subgraph("app", "base").unwrap();

        assert_eq!(sub.successors("app"), ["left", "right"]);
        assert_eq!(sub.successors("left"), ["base"]);
        assert_eq!(sub.successors("right"), ["base"]);
        assert!(sub.successors("base").is_empty());
        assert!(!sub.contains_edge("app", "unrelated"));
        assert_eq!(sub.edge_count(), 4);
    }

    #[test]
    fn no_dependency_means_no_subgraph() {
        let graph = diamond();
        assert!(graph.search_subgraph("left", "right").is_none());
        assert!(graph.search_subgraph("missing", "base").is_none());
    }

    #[test]
    fn dependency_without_import_data_gives_empty_subgraph() {
        let graph: DepGraph = [PackageRecord::new("app", "main").with_deps(["hidden"])]
            .into_iter()
            .collect();

        let sub = graph.search_subgraph("app", "hidden").unwrap();
        assert!(sub.is_empty());
        assert_eq!(sub.start(), "app");
        assert_eq!(sub.target(), "hidden");
    }

    #[test]
    fn cycles_are_expanded_once() {
        let graph: DepGraph = [
            PackageRecord::new("a", "a").with_imports(["b"]).with_deps(["a", "b", "t"]),
            PackageRecord::new("b", "b").with_imports(["a", "t"]).with_deps(["a", "b", "t"]),
        ]
        .into_iter()
        .collect();

        let sub = graph.search_subgraph("a", "t").unwrap();
        assert_eq!(sub.successors("a"), ["b"]);
        assert_eq!(sub.successors("b"), ["a", "t"]);
    }

    #[test]
    fn dot_output_names_every_edge() {
        let dot = sample_graph()
            .search_subgraph("cmd/app", "pkgB")
            .unwrap()
            .to_dot();

        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("label = \"cmd/app\""));
        assert!(dot.contains("label = \"pkgA\""));
        assert!(dot.contains("label = \"pkgB\""));
        assert_eq!(dot.matches("->").count(), 2);
    }
}
