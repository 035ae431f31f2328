use crate::signature::error::SignatureError;
use crate::signature::pack::Counters;
use crate::signature::params::{MissingLabel, SlotLayout};
use crate::traits::SignatureGraph;

/// Resolves every node's label under `policy`, indexed by node id.
pub fn resolve_labels<G>(graph: &G, policy: MissingLabel) -> Result<Vec<u32>, SignatureError>
where
    G: SignatureGraph + ?Sized,
{
    (0..graph.node_count())
        .map(|node| match (graph.label(node), policy) {
            (Some(label), _) => Ok(label),
            (None, MissingLabel::Zero) => Ok(0),
            (None, MissingLabel::Reject) => Err(SignatureError::MissingLabel { node }),
        })
        .collect()
}

/// Counts the labels of `node`'s neighbors.
///
/// Slot `i` holds the number of incident edges whose far end carries label
/// `i`. Labels at or beyond `layout.slots()` are not counted.
pub fn label_histogram<G>(graph: &G, labels: &[u32], node: usize, layout: SlotLayout) -> Counters
where
    G: SignatureGraph + ?Sized,
{
    let mut counts = Counters::zeroed(layout.slots());
    graph.for_each_neighbor(node, |nb| {
        counts.add(labels[nb] as usize, 1);
    });
    counts
}
