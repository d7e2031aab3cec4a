//! Target dependency graph.
//!
//! Stores targets and their ordered prerequisites in a `petgraph` graph map
//! and resolves the execution order for a requested target.

use petgraph::Direction;
use petgraph::graphmap::{DiGraphMap, NodeTrait};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("cyclic dependency detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// A directed graph of targets.
///
/// An edge `target -> prerequisite` means `target` may only run after
/// `prerequisite` completed. Prerequisites keep the order they were declared in.
#[derive(Debug, Clone)]
pub struct TargetGraph<T: NodeTrait> {
    graph: DiGraphMap<T, ()>,
}

impl<T> TargetGraph<T>
where
    T: NodeTrait + fmt::Display,
{
    pub fn new() -> Self {
        Self {
            graph: DiGraphMap::new(),
        }
    }

    /// Registers a target with no prerequisites (no-op if already known).
    pub fn add_target(&mut self, target: T) {
        self.graph.add_node(target);
    }

    /// Declares that `target` depends on `prerequisite`.
    ///
    /// Both are registered if they were not yet known. Declaring the same
    /// edge twice keeps the original position.
    pub fn add_prerequisite(&mut self, target: T, prerequisite: T) {
        self.graph.add_edge(target, prerequisite, ());
    }

    pub fn contains(&self, target: T) -> bool {
        self.graph.contains_node(target)
    }

    /// All targets, in registration order
    pub fn targets(&self) -> Vec<T> {
        self.graph.nodes().collect()
    }

    /// Direct prerequisites of `target`, in declaration order
    pub fn prerequisites(&self, target: T) -> Vec<T> {
        self.graph
            .neighbors_directed(target, Direction::Outgoing)
            .collect()
    }

    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Execution order for `requested`.
    ///
    /// Only targets reachable from `requested` are included. Every
    /// prerequisite comes before the targets depending on it, each target
    /// appears exactly once, and `requested` is last.
    pub fn plan(&self, requested: T) -> Result<Vec<T>, GraphError> {
        if !self.contains(requested) {
            return Err(GraphError::UnknownTarget(requested.to_string()));
        }

        let mut order = Vec::new();
        let mut done = HashSet::new();
        let mut path = Vec::new();
        self.visit(requested, &mut path, &mut done, &mut order)?;
        Ok(order)
    }

    fn visit(
        &self,
        target: T,
        path: &mut Vec<T>,
        done: &mut HashSet<T>,
        order: &mut Vec<T>,
    ) -> Result<(), GraphError> {
        if done.contains(&target) {
            return Ok(());
        }

        if let Some(start) = path.iter().position(|t| *t == target) {
            let mut cycle: Vec<String> = path[start..].iter().map(ToString::to_string).collect();
            cycle.push(target.to_string());
            return Err(GraphError::Cycle(cycle));
        }

        path.push(target);
        for prerequisite in self.prerequisites(target) {
            self.visit(prerequisite, path, done, order)?;
        }
        path.pop();

        done.insert(target);
        order.push(target);
        Ok(())
    }
}

impl<T> Default for TargetGraph<T>
where
    T: NodeTrait + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_target() {
        let mut graph = TargetGraph::new();
        graph.add_target("up");

        assert_eq!(graph.plan("up").unwrap(), vec!["up"]);
    }

    #[test]
    fn test_prerequisite_runs_first() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("push", "build");

        assert_eq!(graph.plan("push").unwrap(), vec!["build", "push"]);
        assert_eq!(graph.plan("build").unwrap(), vec!["build"]);
    }

    #[test]
    fn test_unrelated_targets_are_not_planned() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("push", "build");
        graph.add_target("up");
        graph.add_target("prune");

        let order = graph.plan("push").unwrap();
        assert!(!order.contains(&"up"));
        assert!(!order.contains(&"prune"));
    }

    #[test]
    fn test_diamond_runs_shared_prerequisite_once() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("release", "push");
        graph.add_prerequisite("release", "scan");
        graph.add_prerequisite("push", "build");
        graph.add_prerequisite("scan", "build");

        let order = graph.plan("release").unwrap();
        assert_eq!(order, vec!["build", "push", "scan", "release"]);
        assert_eq!(order.iter().filter(|t| **t == "build").count(), 1);
    }

    #[test]
    fn test_declared_order_is_kept() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("all", "c");
        graph.add_prerequisite("all", "a");
        graph.add_prerequisite("all", "b");

        assert_eq!(graph.prerequisites("all"), vec!["c", "a", "b"]);
        assert_eq!(graph.plan("all").unwrap(), vec!["c", "a", "b", "all"]);
    }

    #[test]
    fn test_duplicate_edge_is_ignored() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("push", "build");
        graph.add_prerequisite("push", "build");

        assert_eq!(graph.prerequisites("push"), vec!["build"]);
        assert_eq!(graph.plan("push").unwrap(), vec!["build", "push"]);
    }

    #[test]
    fn test_unknown_target() {
        let mut graph = TargetGraph::new();
        graph.add_target("build");

        let err = graph.plan("deploy").unwrap_err();
        assert_eq!(err, GraphError::UnknownTarget("deploy".to_string()));
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("a", "b");
        graph.add_prerequisite("b", "c");
        graph.add_prerequisite("c", "a");

        assert!(!graph.is_acyclic());
        let err = graph.plan("a").unwrap_err();
        assert_eq!(
            err,
            GraphError::Cycle(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "a".to_string()
            ])
        );
        assert!(err.to_string().contains("a -> b -> c -> a"));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("build", "build");

        assert!(matches!(graph.plan("build"), Err(GraphError::Cycle(_))));
    }

    #[test]
    fn test_acyclic_graph() {
        let mut graph = TargetGraph::new();
        graph.add_prerequisite("push", "build");
        graph.add_target("down");

        assert!(graph.is_acyclic());
        assert_eq!(graph.targets(), vec!["push", "build", "down"]);
    }
}
