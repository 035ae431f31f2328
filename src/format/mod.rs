//! Graph text grammars.
//!
//! Two grammars can be read: the single-line `n#` form and GSI blocks. Five
//! can be written, one per downstream matching engine, selected through
//! [`OutputFormat`].

pub mod error;
mod reader;
mod writer;

use std::fmt;
use std::str::FromStr;

use crate::graph::LabeledGraph;
use crate::traits::HasLabel;
pub use error::FormatError;
pub use reader::{parse_sigmo_line, read_gsi, read_sigmo};
pub use writer::{write_cuts, write_gsi, write_msm, write_sigmo, write_vf3};

/// Grammars accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    /// `n#<N> l#<L> … e#<E> …`, one graph per line.
    #[default]
    Sigmo,
    /// `t # <id>` blocks with `v` and `e` records.
    Gsi,
}

impl InputFormat {
    pub fn read(self, input: &str) -> Result<Vec<LabeledGraph>, FormatError> {
        match self {
            Self::Sigmo => read_sigmo(input),
            Self::Gsi => read_gsi(input),
        }
    }
}

impl FromStr for InputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sigmo" | "mbsm" | "nsharp" => Ok(Self::Sigmo),
            "gsi" => Ok(Self::Gsi),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sigmo => write!(f, "sigmo"),
            Self::Gsi => write!(f, "gsi"),
        }
    }
}

/// Grammars that can be written, one per downstream engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Node count and a directed edge list.
    Cuts,
    /// `t #` blocks with `v`/`e` records.
    Gsi,
    /// Labeled nodes followed by per-node adjacency lists.
    Vf3,
    /// Counts, one label per line, undirected edge list.
    Msm,
    /// The single-line `n#` grammar.
    Sigmo,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Cuts,
        OutputFormat::Gsi,
        OutputFormat::Vf3,
        OutputFormat::Msm,
        OutputFormat::Sigmo,
    ];

    /// Renders every graph. Only GSI frames the whole stream; the other
    /// grammars are concatenated per graph.
    pub fn write<N: HasLabel>(self, graphs: &[LabeledGraph<N>]) -> String {
        match self {
            Self::Gsi => write_gsi(graphs),
            _ => graphs.iter().map(|g| self.write_one(g)).collect(),
        }
    }

    /// Renders a single graph as a complete document.
    pub fn write_one<N: HasLabel>(self, graph: &LabeledGraph<N>) -> String {
        match self {
            Self::Cuts => write_cuts(graph),
            Self::Gsi => write_gsi(std::slice::from_ref(graph)),
            Self::Vf3 => write_vf3(graph),
            Self::Msm => write_msm(graph),
            Self::Sigmo => write_sigmo(graph),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cuts" => Ok(Self::Cuts),
            "gsi" => Ok(Self::Gsi),
            "vf3" => Ok(Self::Vf3),
            "msm" => Ok(Self::Msm),
            "sigmo" | "mbsm" | "nsharp" => Ok(Self::Sigmo),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cuts => "cuts",
            Self::Gsi => "gsi",
            Self::Vf3 => "vf3",
            Self::Msm => "msm",
            Self::Sigmo => "sigmo",
        };
        f.write_str(name)
    }
}
