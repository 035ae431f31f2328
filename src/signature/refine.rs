use tracing::debug;

use crate::signature::error::SignatureError;
use crate::signature::histogram::{label_histogram, resolve_labels};
use crate::signature::pack::{pack, Counters, Signature};
use crate::signature::params::{Accumulation, SignatureParams, SlotLayout};
use crate::traits::SignatureGraph;

/// Where a [`Refinement`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementState {
    /// Nothing computed yet.
    Init,
    /// Rounds `0..k` are done; the next step computes round `k`.
    Refining(usize),
    /// All requested rounds are done.
    Done,
}

/// Drives signature generation one round at a time.
///
/// Round 0 counts neighbor labels. Round `k` sums, slot by slot, the round
/// `k - 1` signatures of every neighbor. Each round reads only the previous
/// round's complete array and is published only once every node has been
/// computed.
///
/// ```
/// use nodesig::{LabeledGraph, Refinement, RefinementState, SignatureParams, Vertex};
///
/// let g = LabeledGraph::from_edges(
///     vec![Vertex::labeled(0), Vertex::labeled(1), Vertex::labeled(2)],
///     &[(0, 1), (1, 2)],
/// )
/// .unwrap();
/// let params = SignatureParams::default().with_refinement_steps(1);
/// let mut r = Refinement::new(&g, &params).unwrap();
/// assert!(r.step());
/// assert_eq!(r.state(), RefinementState::Refining(1));
/// assert_eq!(r.signatures()[1].value(), 17);
/// assert!(r.step());
/// assert_eq!(r.state(), RefinementState::Done);
/// assert!(!r.step());
/// ```
pub struct Refinement<'g, G: ?Sized> {
    graph: &'g G,
    layout: SlotLayout,
    accumulation: Accumulation,
    total_rounds: usize,
    labels: Vec<u32>,
    signatures: Vec<Signature>,
    state: RefinementState,
}

impl<'g, G> Refinement<'g, G>
where
    G: SignatureGraph + ?Sized,
{
    /// Validates `params` and resolves labels. No round is computed yet.
    pub fn new(graph: &'g G, params: &SignatureParams) -> Result<Self, SignatureError> {
        let layout = params.layout()?;
        let labels = resolve_labels(graph, params.missing_label)?;
        Ok(Self {
            graph,
            layout,
            accumulation: params.accumulation,
            total_rounds: params.refinement_steps.saturating_add(1),
            labels,
            signatures: Vec::new(),
            state: RefinementState::Init,
        })
    }

    pub fn state(&self) -> RefinementState {
        self.state
    }

    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    /// Index of the last completed round, if any.
    pub fn round(&self) -> Option<usize> {
        match self.state {
            RefinementState::Init => None,
            RefinementState::Refining(k) => Some(k - 1),
            RefinementState::Done => Some(self.total_rounds - 1),
        }
    }

    /// Signatures of the last completed round, empty before the first step.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Computes the next round. Returns `false` once nothing is left to do.
    pub fn step(&mut self) -> bool {
        let Some(round) = self.next_round() else {
            return false;
        };
        let next: Vec<Signature> = (0..self.graph.node_count())
            .map(|v| self.node_signature(v, round))
            .collect();
        self.publish(round, next);
        true
    }

    /// Runs the remaining rounds and returns the final signatures.
    pub fn finish(mut self) -> Vec<Signature> {
        while self.step() {}
        self.signatures
    }

    fn next_round(&self) -> Option<usize> {
        match self.state {
            RefinementState::Init => Some(0),
            RefinementState::Refining(k) => Some(k),
            RefinementState::Done => None,
        }
    }

    fn publish(&mut self, round: usize, next: Vec<Signature>) {
        debug!(round, nodes = next.len(), "computed signature round");
        self.signatures = next;
        self.state = if round + 1 >= self.total_rounds {
            RefinementState::Done
        } else {
            RefinementState::Refining(round + 1)
        };
    }

    fn node_signature(&self, v: usize, round: usize) -> Signature {
        if round == 0 {
            return pack(
                &label_histogram(self.graph, &self.labels, v, self.layout),
                self.layout,
            );
        }
        let prev = &self.signatures;
        let mut counts = Counters::zeroed(self.layout.slots());
        self.graph.for_each_neighbor(v, |u| {
            for slot in 0..self.layout.slots() {
                counts.add(slot, prev[u].slot(slot, self.layout));
            }
        });
        let packed = pack(&counts, self.layout);
        match self.accumulation {
            Accumulation::Reset => packed,
            Accumulation::OrPrevious => Signature(prev[v].0 | packed.0),
        }
    }
}

#[cfg(feature = "rayon")]
impl<'g, G> Refinement<'g, G>
where
    G: SignatureGraph + Sync + ?Sized,
{
    /// Like [`step`](Self::step), computing nodes in parallel.
    pub fn step_par(&mut self) -> bool {
        use rayon::prelude::*;

        let Some(round) = self.next_round() else {
            return false;
        };
        let this = &*self;
        let next: Vec<Signature> = (0..this.graph.node_count())
            .into_par_iter()
            .map(|v| this.node_signature(v, round))
            .collect();
        self.publish(round, next);
        true
    }

    pub fn finish_par(mut self) -> Vec<Signature> {
        while self.step_par() {}
        self.signatures
    }
}

/// Computes the final signature of every node, indexed like the graph.
///
/// ```
/// use nodesig::{generate_signatures, LabeledGraph, SignatureParams, Vertex};
///
/// let g = LabeledGraph::from_edges(
///     vec![Vertex::labeled(0), Vertex::labeled(1), Vertex::labeled(2)],
///     &[(0, 1), (1, 2)],
/// )
/// .unwrap();
/// let sigs = generate_signatures(&g, &SignatureParams::default()).unwrap();
/// let values: Vec<u64> = sigs.iter().map(|s| s.value()).collect();
/// assert_eq!(values, vec![4, 17, 4]);
/// ```
pub fn generate_signatures<G>(
    graph: &G,
    params: &SignatureParams,
) -> Result<Vec<Signature>, SignatureError>
where
    G: SignatureGraph + ?Sized,
{
    Ok(Refinement::new(graph, params)?.finish())
}

#[cfg(feature = "rayon")]
pub fn generate_signatures_par<G>(
    graph: &G,
    params: &SignatureParams,
) -> Result<Vec<Signature>, SignatureError>
where
    G: SignatureGraph + Sync + ?Sized,
{
    Ok(Refinement::new(graph, params)?.finish_par())
}
