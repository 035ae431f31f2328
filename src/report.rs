//! Text rendering of signatures and candidate statistics.

use crate::filter::{CandidateStats, Candidates};
use crate::signature::{Signature, SlotLayout};

/// `//Graph <number>` followed by one `{0b…},` line per node.
pub fn signature_block(number: usize, sigs: &[Signature], layout: SlotLayout) -> String {
    let mut out = format!("//Graph {}\n", number);
    for sig in sigs {
        out.push_str(&format!("{{{}}},\n", sig.to_binary(layout)));
    }
    out
}

/// Statistics for one query/data pair, numbered from 1.
pub fn candidate_summary(query: usize, data: usize, stats: &CandidateStats) -> String {
    format!(
        "Query {} / data {}:\n\
         - Total candidates: {}\n\
         - Average candidates: {}\n\
         - Median candidates: {}\n\
         - Zero candidates: {}\n",
        query, data, stats.total, stats.average, stats.median, stats.zero
    )
}

/// `Node <q>: <count>` for every query node.
pub fn candidate_counts(candidates: &Candidates) -> String {
    let mut out = String::new();
    for node in 0..candidates.query_nodes() {
        out.push_str(&format!("Node {}: {}\n", node, candidates.count(node)));
    }
    out
}
