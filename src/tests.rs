use petgraph::graph::{NodeIndex, UnGraph};

use crate::*;

#[test]
fn graph_add_nodes_and_edges() {
    let mut g = LabeledGraph::<Vertex>::new();
    let a = g.add_node(Vertex::labeled(6));
    let b = g.add_node(Vertex::labeled(8));
    let e = g.add_edge(a, b);

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.node(a).label, Some(6));
    assert_eq!(g.node(b).label, Some(8));
    assert_eq!(g.edge_endpoints(e), Some((a, b)));
}

#[test]
fn graph_neighbors_and_degree() {
    let mut g = LabeledGraph::<Vertex>::new();
    let a = g.add_node(Vertex::default());
    let b = g.add_node(Vertex::default());
    let c = g.add_node(Vertex::default());
    g.add_edge(a, c);
    g.add_edge(a, b);

    assert_eq!(g.degree(a), 2);
    assert_eq!(g.sorted_neighbors(a), vec![b, c]);
    assert!(g.edge_between(a, b).is_some());
    assert_eq!(g.edge_between(b, c), None);
}

#[test]
fn graph_node_mut() {
    let mut g = LabeledGraph::<Vertex>::new();
    let idx = g.add_node(Vertex::default());
    g.node_mut(idx).label = Some(7);
    assert_eq!(g.node(idx).label(), Some(7));
}

#[test]
fn graph_from_edges_rejects_dangling() {
    assert!(LabeledGraph::from_edges(vec![Vertex::labeled(0)], &[(0, 1)]).is_none());
}

#[test]
fn graph_effective_label_space() {
    let mut g =
        LabeledGraph::from_edges(vec![Vertex::labeled(3), Vertex::default()], &[]).unwrap();
    assert_eq!(g.effective_label_space(), 4);
    g.set_label_space(Some(20));
    assert_eq!(g.effective_label_space(), 20);
    assert_eq!(LabeledGraph::<Vertex>::new().effective_label_space(), 0);
}

#[test]
fn graph_equality() {
    let a = LabeledGraph::from_edges(vec![Vertex::labeled(1), Vertex::labeled(2)], &[(0, 1)]);
    let b = LabeledGraph::from_edges(vec![Vertex::labeled(1), Vertex::labeled(2)], &[(0, 1)]);
    let c = LabeledGraph::from_edges(vec![Vertex::labeled(1), Vertex::labeled(3)], &[(0, 1)]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn label_trait_impls() {
    assert_eq!(5u32.label(), Some(5));
    assert_eq!(None::<u32>.label(), None);
    assert_eq!(Vertex::labeled(2).label(), Some(2));
}

#[test]
fn raw_petgraph_feeds_the_kernel() {
    let mut g: UnGraph<u32, ()> = UnGraph::default();
    let a = g.add_node(0);
    let b = g.add_node(1);
    let c = g.add_node(2);
    g.add_edge(a, b, ());
    g.add_edge(b, c, ());

    let sigs = generate_signatures(&g, &SignatureParams::default()).unwrap();
    let values: Vec<u64> = sigs.iter().map(|s| s.value()).collect();
    assert_eq!(values, vec![4, 17, 4]);
}

#[test]
fn labeled_graph_and_petgraph_agree() {
    let lg = LabeledGraph::from_edges(
        vec![Vertex::labeled(1), Vertex::labeled(1), Vertex::labeled(0)],
        &[(0, 1), (1, 2), (2, 0)],
    )
    .unwrap();
    let mut pg: UnGraph<Option<u32>, ()> = UnGraph::default();
    for l in [Some(1), Some(1), Some(0)] {
        pg.add_node(l);
    }
    for (a, b) in [(0, 1), (1, 2), (2, 0)] {
        pg.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
    let params = SignatureParams::default().with_refinement_steps(2);
    assert_eq!(
        generate_signatures(&lg, &params).unwrap(),
        generate_signatures(&pg, &params).unwrap()
    );
}

#[test]
fn signature_display_is_decimal() {
    assert_eq!(Signature(17).to_string(), "17");
}

#[test]
fn declared_label_space_drops_larger_labels() {
    let g = format::parse_sigmo_line("n#2 l#2 0 0 1 5 e#1 0 1", 1).unwrap();
    let declared = SignatureParams::default().or_label_space(g.label_space());
    let values: Vec<u64> = generate_signatures(&g, &declared)
        .unwrap()
        .iter()
        .map(|s| s.value())
        .collect();
    assert_eq!(values, vec![0, 1]);

    let open = generate_signatures(&g, &SignatureParams::default()).unwrap();
    assert_eq!(open[0].value(), 1 << 10);
}
