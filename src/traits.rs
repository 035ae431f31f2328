use petgraph::graph::{Graph, NodeIndex, UnGraph};

use crate::graph::LabeledGraph;

pub trait HasLabel {
    fn label(&self) -> Option<u32>;
}

impl HasLabel for u32 {
    fn label(&self) -> Option<u32> {
        Some(*self)
    }
}

impl HasLabel for Option<u32> {
    fn label(&self) -> Option<u32> {
        *self
    }
}

/// Read-only view of a graph as consumed by the signature kernel.
///
/// Nodes are the dense ids `0..node_count()`. Neighbor enumeration visits a
/// node once per incident edge, so parallel edges are reported repeatedly.
pub trait SignatureGraph {
    fn node_count(&self) -> usize;

    fn label(&self, node: usize) -> Option<u32>;

    fn for_each_neighbor<F: FnMut(usize)>(&self, node: usize, f: F);
}

impl<N: HasLabel> SignatureGraph for LabeledGraph<N> {
    fn node_count(&self) -> usize {
        LabeledGraph::node_count(self)
    }

    fn label(&self, node: usize) -> Option<u32> {
        self.node(NodeIndex::new(node)).label()
    }

    fn for_each_neighbor<F: FnMut(usize)>(&self, node: usize, mut f: F) {
        for nb in self.neighbors(NodeIndex::new(node)) {
            f(nb.index());
        }
    }
}

impl<N: HasLabel, E> SignatureGraph for UnGraph<N, E> {
    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn label(&self, node: usize) -> Option<u32> {
        self[NodeIndex::new(node)].label()
    }

    fn for_each_neighbor<F: FnMut(usize)>(&self, node: usize, mut f: F) {
        for nb in self.neighbors(NodeIndex::new(node)) {
            f(nb.index());
        }
    }
}
