use thiserror::Error;

/// Errors produced when reading a graph file.
///
/// `line` is always 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A count header such as `n#12` was expected.
    #[error("line {line}: expected `{prefix}<count>`, found {found:?}")]
    MissingHeader {
        line: usize,
        prefix: &'static str,
        found: String,
    },
    /// A token that should be a non-negative integer was not.
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },
    /// The line or file ended before all announced items were read.
    #[error("line {line}: unexpected end of input")]
    UnexpectedEnd { line: usize },
    /// Tokens remain after the announced items.
    #[error("line {line}: unexpected trailing token {token:?}")]
    TrailingToken { line: usize, token: String },
    /// A node id or edge endpoint is not below the node count.
    #[error("line {line}: node {node} out of range for {nodes} nodes")]
    NodeOutOfRange {
        line: usize,
        node: usize,
        nodes: usize,
    },
    /// A header announces more items than the rest of the input can hold.
    #[error("line {line}: {what} count {count} exceeds the {available} remaining in the input")]
    CountTooLarge {
        line: usize,
        what: &'static str,
        count: usize,
        available: usize,
    },
    /// The same node id was given a label twice.
    #[error("line {line}: node {node} listed twice")]
    DuplicateNode { line: usize, node: usize },
    /// A line does not start with a recognized record tag.
    #[error("line {line}: unexpected record {text:?}")]
    UnexpectedRecord { line: usize, text: String },
    /// A format name did not match any known grammar.
    #[error("unknown graph format {0:?}")]
    UnknownFormat(String),
}
