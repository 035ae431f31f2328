use petgraph::graph::NodeIndex;

use crate::graph::LabeledGraph;
use crate::traits::HasLabel;

fn label_of<N: HasLabel>(graph: &LabeledGraph<N>, idx: NodeIndex) -> u32 {
    graph.node(idx).label().unwrap_or(0)
}

/// `<nodes>` then every edge in both directions, grouped by source node.
pub fn write_cuts<N: HasLabel>(graph: &LabeledGraph<N>) -> String {
    let mut out = format!("{}\n", graph.node_count());
    for node in graph.nodes() {
        for nb in graph.sorted_neighbors(node) {
            out.push_str(&format!("{} {}\n", node.index(), nb.index()));
        }
    }
    out
}

/// One `t # <id>` block per graph and a closing `t # -1`.
pub fn write_gsi<N: HasLabel>(graphs: &[LabeledGraph<N>]) -> String {
    let mut out = String::new();
    for (id, graph) in graphs.iter().enumerate() {
        out.push_str(&format!("t # {}\n", id));
        out.push_str(&format!(
            "{} {} {} 1\n",
            graph.node_count(),
            graph.edge_count(),
            graph.effective_label_space()
        ));
        for node in graph.nodes() {
            out.push_str(&format!("v {} {}\n", node.index(), label_of(graph, node)));
        }
        for (u, v) in graph.edge_list() {
            out.push_str(&format!("e {} {} 1\n", u.index(), v.index()));
        }
    }
    out.push_str("t # -1\n");
    out
}

/// `<nodes>`, `<id> <label>` lines, then per node its degree followed by
/// `<node> <neighbor>` lines.
pub fn write_vf3<N: HasLabel>(graph: &LabeledGraph<N>) -> String {
    let mut out = format!("{}\n", graph.node_count());
    for node in graph.nodes() {
        out.push_str(&format!("{} {}\n", node.index(), label_of(graph, node)));
    }
    for node in graph.nodes() {
        let neighbors = graph.sorted_neighbors(node);
        out.push_str(&format!("{}\n", neighbors.len()));
        for nb in neighbors {
            out.push_str(&format!("{} {}\n", node.index(), nb.index()));
        }
    }
    out
}

/// `<nodes> <edges>`, one label per line, then `<u> <v>` lines.
pub fn write_msm<N: HasLabel>(graph: &LabeledGraph<N>) -> String {
    let mut out = format!("{} {}\n", graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        out.push_str(&format!("{}\n", label_of(graph, node)));
    }
    for (u, v) in graph.edge_list() {
        out.push_str(&format!("{} {}\n", u.index(), v.index()));
    }
    out
}

/// The single-line `n#`/`l#`/`e#` grammar read by
/// [`parse_sigmo_line`](crate::format::parse_sigmo_line).
pub fn write_sigmo<N: HasLabel>(graph: &LabeledGraph<N>) -> String {
    let mut parts = vec![
        format!("n#{}", graph.node_count()),
        format!("l#{}", graph.effective_label_space()),
    ];
    for node in graph.nodes() {
        parts.push(format!("{} {}", node.index(), label_of(graph, node)));
    }
    parts.push(format!("e#{}", graph.edge_count()));
    for (u, v) in graph.edge_list() {
        parts.push(format!("{} {}", u.index(), v.index()));
    }
    let mut out = parts.join(" ");
    out.push('\n');
    out
}
