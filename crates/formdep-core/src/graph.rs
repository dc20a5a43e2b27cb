//! The dependency graph: source question → affected question.
//!
//! Option-level dependencies contribute an edge to the question owning the
//! option, since changing an option changes that question's value.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::FormDefinition;

/// Directed graph of field ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph induced by all dependencies of a form.
    #[must_use]
    pub fn from_form(form: &FormDefinition) -> Self {
        let mut graph = Self::new();
        for site in form.dependency_sites() {
            graph.add_edge(site.dependency.source().as_str(), site.question.id().as_str());
        }
        graph
    }

    /// Adds an edge `from → to`.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        self.edges.entry(to.to_string()).or_default();
    }

    /// Returns the direct successors of a node.
    pub fn successors(&self, node: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(node)
            .into_iter()
            .flat_map(|s| s.iter().map(String::as_str))
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Finds one cycle, returned as a closed path such as `["a", "b", "a"]`.
    ///
    /// Deterministic: nodes are visited in sorted order.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        let mut marks: BTreeMap<&str, Mark> =
            self.edges.keys().map(|k| (k.as_str(), Mark::Unvisited)).collect();

        for start in self.edges.keys() {
            if marks.get(start.as_str()) != Some(&Mark::Unvisited) {
                continue;
            }
            // Iterative DFS: (node, remaining successors).
            let start = start.as_str();
            let mut succ: Vec<&str> = self.successors(start).collect();
            succ.reverse();
            let mut stack: Vec<(&str, Vec<&str>)> = vec![(start, succ)];
            marks.insert(start, Mark::OnStack);

            while let Some((node, pending)) = stack.last_mut() {
                let node = *node;
                let Some(next) = pending.pop() else {
                    marks.insert(node, Mark::Done);
                    stack.pop();
                    continue;
                };
                match marks.get(next).copied().unwrap_or(Mark::Unvisited) {
                    Mark::OnStack => {
                        let from = stack.iter().position(|(n, _)| *n == next).unwrap_or(0);
                        let mut path: Vec<String> =
                            stack[from..].iter().map(|(n, _)| (*n).to_string()).collect();
                        path.push(next.to_string());
                        return Some(path);
                    }
                    Mark::Unvisited => {
                        marks.insert(next, Mark::OnStack);
                        let mut succ: Vec<&str> = self.successors(next).collect();
                        succ.reverse();
                        stack.push((next, succ));
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }

    /// Returns the nodes in topological order (sources before targets).
    ///
    /// # Errors
    ///
    /// Returns a cycle path if the graph is not acyclic.
    pub fn topological_order(&self) -> Result<Vec<String>, Vec<String>> {
        if let Some(cycle) = self.find_cycle() {
            return Err(cycle);
        }

        let mut in_degree: BTreeMap<&str, usize> =
            self.edges.keys().map(|k| (k.as_str(), 0)).collect();
        for targets in self.edges.values() {
            for t in targets {
                *in_degree.entry(t.as_str()).or_default() += 1;
            }
        }

        let mut ready: Vec<&str> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(n, _)| *n)
            .rev()
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(node) = ready.pop() {
            order.push(node.to_string());
            for next in self.successors(node) {
                if let Some(d) = in_degree.get_mut(next) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(next);
                    }
                }
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut g = DependencyGraph::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    #[test]
    fn acyclic_chain_has_no_cycle() {
        let g = graph(&[("a", "b"), ("b", "c"), ("a", "c")]);
        assert_eq!(g.find_cycle(), None);
        assert_eq!(g.topological_order().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn two_node_cycle_detected() {
        let g = graph(&[("a", "b"), ("b", "a")]);
        assert_eq!(g.find_cycle().unwrap(), vec!["a", "b", "a"]);
    }

    #[test]
    fn self_loop_detected() {
        let g = graph(&[("a", "a")]);
        assert_eq!(g.find_cycle().unwrap(), vec!["a", "a"]);
    }

    #[test]
    fn longer_cycle_behind_acyclic_prefix() {
        let g = graph(&[("root", "x"), ("x", "y"), ("y", "z"), ("z", "x")]);
        let cycle = g.find_cycle().unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
        assert!(g.topological_order().is_err());
    }

    #[test]
    fn diamond_is_acyclic() {
        let g = graph(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let order = g.topological_order().unwrap();
        let pos = |n: &str| order.iter().position(|x| x == n).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("d"));
        assert!(pos("c") < pos("d"));
        assert_eq!(g.node_count(), 4);
    }
}
