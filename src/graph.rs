use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use crate::traits::HasLabel;

/// Default node type for a [`LabeledGraph`].
///
/// A vertex carries nothing but its label. `None` means the input never
/// assigned one; how that is interpreted is decided by
/// [`MissingLabel`](crate::MissingLabel) when signatures are computed.
///
/// # Examples
///
/// ```
/// use nodesig::{HasLabel, Vertex};
///
/// let v = Vertex::labeled(3);
/// assert_eq!(v.label(), Some(3));
/// assert_eq!(Vertex::default().label(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub label: Option<u32>,
}

impl Vertex {
    pub fn labeled(label: u32) -> Self {
        Self { label: Some(label) }
    }
}

impl HasLabel for Vertex {
    fn label(&self) -> Option<u32> {
        self.label
    }
}

/// An undirected graph with labeled nodes.
///
/// Node indices are dense and stable: the `i`-th added node has index `i`,
/// which is also its position in any signature array computed for the graph.
/// `label_space` records the `l#` value a graph file declared, if any.
pub struct LabeledGraph<N = Vertex> {
    graph: UnGraph<N, ()>,
    label_space: Option<u32>,
}

impl<N> LabeledGraph<N> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            label_space: None,
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            label_space: None,
        }
    }

    pub fn node(&self, idx: NodeIndex) -> &N {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut N {
        &mut self.graph[idx]
    }

    pub fn add_node(&mut self, node: N) -> NodeIndex {
        self.graph.add_node(node)
    }

    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex) -> EdgeIndex {
        self.graph.add_edge(a, b, ())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Neighbors of `idx` in ascending index order.
    pub fn sorted_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        out.sort_unstable();
        out
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Edge endpoints in insertion order.
    pub fn edge_list(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
    }

    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn edge_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    pub fn label_space(&self) -> Option<u32> {
        self.label_space
    }

    pub fn set_label_space(&mut self, label_space: Option<u32>) {
        self.label_space = label_space;
    }
}

impl<N: HasLabel> LabeledGraph<N> {
    /// Builds a graph from a label per node and a list of edges.
    ///
    /// Returns `None` if an edge refers to a node past the end of `labels`.
    pub fn from_edges(labels: Vec<N>, edges: &[(usize, usize)]) -> Option<Self> {
        let mut g = Self::with_capacity(labels.len(), edges.len());
        for label in labels {
            g.add_node(label);
        }
        let n = g.node_count();
        for &(a, b) in edges {
            if a >= n || b >= n {
                return None;
            }
            g.add_edge(NodeIndex::new(a), NodeIndex::new(b));
        }
        Some(g)
    }

    /// The declared label space, or one past the largest label present.
    pub fn effective_label_space(&self) -> u32 {
        self.label_space.unwrap_or_else(|| {
            self.graph
                .node_weights()
                .filter_map(HasLabel::label)
                .max()
                .map_or(0, |l| l.saturating_add(1))
        })
    }
}

impl<N: Clone> Clone for LabeledGraph<N> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            label_space: self.label_space,
        }
    }
}

impl<N> Default for LabeledGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: PartialEq> PartialEq for LabeledGraph<N> {
    fn eq(&self, other: &Self) -> bool {
        if self.node_count() != other.node_count() || self.edge_count() != other.edge_count() {
            return false;
        }
        if self.label_space != other.label_space {
            return false;
        }
        for idx in self.nodes() {
            if self.node(idx) != other.node(idx) {
                return false;
            }
        }
        self.edge_list().eq(other.edge_list())
    }
}

impl<N: std::fmt::Debug> std::fmt::Debug for LabeledGraph<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabeledGraph")
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .field("label_space", &self.label_space)
            .finish()
    }
}
