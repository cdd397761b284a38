//! Reference graph between inserted buffers.
//!
//! An insert command names its load pins. When a load pin sits on another
//! inserted buffer, that buffer has to exist before the command is replayed,
//! so its command must come first. The graph records exactly those
//! "must precede" relations over an arena of [`InsertedBuffer`] records.

use std::collections::{HashMap, HashSet};

use eco_common::InsertedBuffer;
use tracing::debug;

/// Directed graph over inserted buffers, addressed by record index.
///
/// An edge `(b, a)` means buffer `b` must be emitted before buffer `a`
/// because `a`'s load list names `b`.
#[derive(Debug, Clone, Default)]
pub struct BufferDependencyGraph {
    nodes: Vec<InsertedBuffer>,
    successors: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl BufferDependencyGraph {
    /// Build the graph from buffers in record order.
    ///
    /// Self-references become self-edges and are left for the scheduler to
    /// reject as a cycle.
    pub fn new(nodes: Vec<InsertedBuffer>) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.cell_name.as_str()).or_insert(i);
        }

        let mut successors = vec![Vec::new(); nodes.len()];
        let mut edges = Vec::new();
        let mut seen = HashSet::new();
        for (a, node) in nodes.iter().enumerate() {
            for pin in &node.load_pins {
                let Some(&b) = index.get(pin.instance_name.as_str()) else {
                    continue;
                };
                if seen.insert((b, a)) {
                    successors[b].push(a);
                    edges.push((b, a));
                }
            }
        }

        debug!(
            "Dependency graph: {} buffers, {} edges",
            nodes.len(),
            edges.len()
        );
        Self {
            nodes,
            successors,
            edges,
        }
    }

    /// Number of buffers.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no buffers.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Buffer at record index `index`.
    pub fn node(&self, index: usize) -> Option<&InsertedBuffer> {
        self.nodes.get(index)
    }

    /// All buffers in record order.
    pub fn nodes(&self) -> &[InsertedBuffer] {
        &self.nodes
    }

    /// Every edge `(before, after)` in discovery order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Buffers that must come after `index`.
    pub fn successors(&self, index: usize) -> &[usize] {
        self.successors.get(index).map_or(&[], Vec::as_slice)
    }

    /// Consume the graph, returning its buffers in record order.
    pub fn into_nodes(self) -> Vec<InsertedBuffer> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_common::PinRef;

    fn buffer(name: &str, loads: &[(&str, &str)]) -> InsertedBuffer {
        InsertedBuffer {
            cell_name: name.to_string(),
            cell_type: "BUFx2".to_string(),
            net_name: format!("net_{name}"),
            load_pins: loads.iter().map(|(i, p)| PinRef::new(*i, *p)).collect(),
        }
    }

    #[test]
    fn test_edge_points_from_referenced_to_referencing() {
        let graph = BufferDependencyGraph::new(vec![
            buffer("x", &[("y", "A"), ("u1", "A")]),
            buffer("y", &[("u2", "A")]),
        ]);

        assert_eq!(graph.edges(), &[(1, 0)]);
        assert_eq!(graph.successors(1), &[0]);
        assert!(graph.successors(0).is_empty());
    }

    #[test]
    fn test_repeated_reference_is_one_edge() {
        let graph = BufferDependencyGraph::new(vec![
            buffer("x", &[("y", "A"), ("y", "B")]),
            buffer("y", &[]),
        ]);
        assert_eq!(graph.edges(), &[(1, 0)]);
    }

    #[test]
    fn test_self_reference_is_self_edge() {
        let graph = BufferDependencyGraph::new(vec![buffer("x", &[("x", "A")])]);
        assert_eq!(graph.edges(), &[(0, 0)]);
    }

    #[test]
    fn test_out_of_range_successors() {
        let graph = BufferDependencyGraph::new(Vec::new());
        assert!(graph.is_empty());
        assert!(graph.successors(3).is_empty());
    }
}
