//! Candidate filtering by label equality and signature dominance.
//!
//! A data node stays a candidate for a query node only while it has the
//! same label and its signature dominates the query node's signature. Later
//! refinement rounds can only shrink the candidate sets.

use thiserror::Error;
use tracing::{debug, info};

use crate::signature::{
    resolve_labels, Refinement, Signature, SignatureError, SignatureParams, SlotLayout,
};
use crate::traits::SignatureGraph;

const WORD_BITS: usize = u64::BITS as usize;

/// Errors produced while filtering candidates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Signature generation for one of the graphs failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),
    /// A signature array does not have one entry per node.
    #[error("{side} graph has {nodes} nodes but {signatures} signatures")]
    SignatureCountMismatch {
        side: &'static str,
        nodes: usize,
        signatures: usize,
    },
    /// A candidate set was built for graphs of a different size.
    #[error("candidate set is {rows}x{cols}, signatures are {queries}x{data}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        queries: usize,
        data: usize,
    },
}

/// One candidate bitset per query node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    query_nodes: usize,
    data_nodes: usize,
    words_per_row: usize,
    words: Vec<u64>,
}

impl Candidates {
    pub fn new(query_nodes: usize, data_nodes: usize) -> Self {
        let words_per_row = data_nodes.div_ceil(WORD_BITS);
        Self {
            query_nodes,
            data_nodes,
            words_per_row,
            words: vec![0; query_nodes * words_per_row],
        }
    }

    pub fn query_nodes(&self) -> usize {
        self.query_nodes
    }

    pub fn data_nodes(&self) -> usize {
        self.data_nodes
    }

    fn locate(&self, query: usize, data: usize) -> Option<(usize, u64)> {
        if query >= self.query_nodes || data >= self.data_nodes {
            return None;
        }
        Some((
            query * self.words_per_row + data / WORD_BITS,
            1u64 << (data % WORD_BITS),
        ))
    }

    /// Marks `data` as a candidate of `query`. Out-of-range pairs are ignored.
    pub fn insert(&mut self, query: usize, data: usize) {
        if let Some((i, bit)) = self.locate(query, data) {
            self.words[i] |= bit;
        }
    }

    pub fn remove(&mut self, query: usize, data: usize) {
        if let Some((i, bit)) = self.locate(query, data) {
            self.words[i] &= !bit;
        }
    }

    pub fn contains(&self, query: usize, data: usize) -> bool {
        self.locate(query, data)
            .is_some_and(|(i, bit)| self.words[i] & bit != 0)
    }

    fn row(&self, query: usize) -> &[u64] {
        if query >= self.query_nodes {
            return &[];
        }
        let start = query * self.words_per_row;
        &self.words[start..start + self.words_per_row]
    }

    /// Number of candidates of `query`.
    pub fn count(&self, query: usize) -> usize {
        self.row(query).iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn total(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Candidates of `query` in ascending order.
    pub fn iter(&self, query: usize) -> impl Iterator<Item = usize> + '_ {
        let data_nodes = self.data_nodes;
        self.row(query)
            .iter()
            .enumerate()
            .flat_map(|(wi, &word)| {
                (0..WORD_BITS)
                    .filter(move |b| word & (1u64 << b) != 0)
                    .map(move |b| wi * WORD_BITS + b)
            })
            .take_while(move |&d| d < data_nodes)
    }

    pub fn stats(&self) -> CandidateStats {
        CandidateStats::from_counts((0..self.query_nodes).map(|q| self.count(q)).collect())
    }
}

/// Summary of per-query-node candidate counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateStats {
    pub total: usize,
    pub average: usize,
    pub median: usize,
    /// Query nodes left with no candidate at all.
    pub zero: usize,
}

impl CandidateStats {
    pub fn from_counts(mut counts: Vec<usize>) -> Self {
        if counts.is_empty() {
            return Self::default();
        }
        let total = counts.iter().sum();
        let zero = counts.iter().filter(|&&c| c == 0).count();
        counts.sort_unstable();
        Self {
            total,
            average: total / counts.len(),
            median: counts[counts.len() / 2],
            zero,
        }
    }
}

fn check_len(side: &'static str, nodes: usize, signatures: usize) -> Result<(), FilterError> {
    if nodes != signatures {
        return Err(FilterError::SignatureCountMismatch {
            side,
            nodes,
            signatures,
        });
    }
    Ok(())
}

/// Builds the initial candidate sets.
///
/// `d` becomes a candidate of `q` iff both resolve to the same label under
/// `params.missing_label` and `data_sigs[d]` dominates `query_sigs[q]`.
pub fn filter_candidates<Q, D>(
    query: &Q,
    data: &D,
    query_sigs: &[Signature],
    data_sigs: &[Signature],
    params: &SignatureParams,
) -> Result<Candidates, FilterError>
where
    Q: SignatureGraph + ?Sized,
    D: SignatureGraph + ?Sized,
{
    let layout = params.layout()?;
    check_len("query", query.node_count(), query_sigs.len())?;
    check_len("data", data.node_count(), data_sigs.len())?;
    let query_labels = resolve_labels(query, params.missing_label)?;
    let data_labels = resolve_labels(data, params.missing_label)?;

    let mut candidates = Candidates::new(query_labels.len(), data_labels.len());
    for (d, (&dl, &ds)) in data_labels.iter().zip(data_sigs).enumerate() {
        for (q, (&ql, &qs)) in query_labels.iter().zip(query_sigs).enumerate() {
            if ql == dl && ds.dominates(qs, layout) {
                candidates.insert(q, d);
            }
        }
    }
    debug!(total = candidates.total(), "filtered candidates");
    Ok(candidates)
}

/// Drops candidates whose signatures no longer dominate.
///
/// Never inserts. Returns the number of pairs removed.
pub fn refine_candidates(
    candidates: &mut Candidates,
    query_sigs: &[Signature],
    data_sigs: &[Signature],
    layout: SlotLayout,
) -> Result<usize, FilterError> {
    if candidates.query_nodes != query_sigs.len() || candidates.data_nodes != data_sigs.len() {
        return Err(FilterError::ShapeMismatch {
            rows: candidates.query_nodes,
            cols: candidates.data_nodes,
            queries: query_sigs.len(),
            data: data_sigs.len(),
        });
    }
    let mut removed = 0;
    for (q, &qs) in query_sigs.iter().enumerate() {
        let stale: Vec<usize> = candidates
            .iter(q)
            .filter(|&d| !data_sigs[d].dominates(qs, layout))
            .collect();
        removed += stale.len();
        for d in stale {
            candidates.remove(q, d);
        }
    }
    debug!(removed, "refined candidates");
    Ok(removed)
}

/// Filters with round-0 signatures, then refines signatures and candidates
/// together for `params.refinement_steps` rounds.
pub fn filter_with_refinement<Q, D>(
    query: &Q,
    data: &D,
    params: &SignatureParams,
) -> Result<Candidates, FilterError>
where
    Q: SignatureGraph + ?Sized,
    D: SignatureGraph + ?Sized,
{
    let mut query_ref = Refinement::new(query, params)?;
    let mut data_ref = Refinement::new(data, params)?;
    query_ref.step();
    data_ref.step();
    let mut candidates = filter_candidates(
        query,
        data,
        query_ref.signatures(),
        data_ref.signatures(),
        params,
    )?;
    info!(
        query_nodes = query.node_count(),
        data_nodes = data.node_count(),
        total = candidates.total(),
        "initial candidates"
    );

    while query_ref.step() && data_ref.step() {
        let removed = refine_candidates(
            &mut candidates,
            query_ref.signatures(),
            data_ref.signatures(),
            query_ref.layout(),
        )?;
        info!(
            round = ?query_ref.round(),
            removed,
            total = candidates.total(),
            "refined candidates"
        );
    }
    Ok(candidates)
}
