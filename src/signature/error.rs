use thiserror::Error;

/// Errors produced when configuring or running signature generation.
///
/// All of these are raised before the first round is computed; a running
/// refinement never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signature width is zero or does not fit in a `u64`.
    #[error("signature width must be between 1 and 64 bits, got {width}")]
    InvalidWidth { width: i64 },
    /// The counter width is zero, negative, or wider than the signature.
    #[error("counter width must be between 1 and {width} bits, got {bits}")]
    InvalidBits { bits: i64, width: u32 },
    /// A negative number of refinement rounds was requested.
    #[error("refinement steps must be non-negative, got {steps}")]
    NegativeRefinementSteps { steps: i64 },
    /// The label space is empty, so no slot could ever be counted.
    #[error("label space leaves no signature slots")]
    NoLabelSlots,
    /// A node has no label and the policy rejects unlabeled nodes.
    #[error("node {node} has no label")]
    MissingLabel { node: usize },
}
