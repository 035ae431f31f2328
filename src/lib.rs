pub mod filter;
pub mod format;
pub mod graph;
pub mod report;
pub mod signature;
pub mod traits;

pub use filter::{
    filter_candidates, filter_with_refinement, refine_candidates, CandidateStats, Candidates,
    FilterError,
};
pub use format::{FormatError, InputFormat, OutputFormat};
pub use graph::{LabeledGraph, Vertex};
#[cfg(feature = "rayon")]
pub use signature::generate_signatures_par;
pub use signature::{
    generate_signatures, label_histogram, pack, resolve_labels, unpack, Accumulation, Counters,
    MissingLabel, Refinement, RefinementState, Signature, SignatureError, SignatureParams,
    SlotLayout,
};
pub use traits::{HasLabel, SignatureGraph};

#[cfg(test)]
mod tests;
