use std::str::{FromStr, SplitWhitespace};

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::format::error::FormatError;
use crate::graph::{LabeledGraph, Vertex};

struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Self {
            iter: text.split_whitespace(),
            line,
        }
    }

    fn next(&mut self) -> Result<&'a str, FormatError> {
        self.iter
            .next()
            .ok_or(FormatError::UnexpectedEnd { line: self.line })
    }

    fn number<T: FromStr>(&mut self) -> Result<T, FormatError> {
        let token = self.next()?;
        token.parse().map_err(|_| FormatError::InvalidNumber {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn optional_number<T: FromStr>(&mut self) -> Result<Option<T>, FormatError> {
        match self.iter.next() {
            None => Ok(None),
            Some(token) => token
                .parse()
                .map(Some)
                .map_err(|_| FormatError::InvalidNumber {
                    line: self.line,
                    token: token.to_string(),
                }),
        }
    }

    /// Reads a `<prefix><count>` token such as `n#12`.
    fn header<T: FromStr>(&mut self, prefix: &'static str) -> Result<T, FormatError> {
        let token = self.next()?;
        let Some(digits) = token.strip_prefix(prefix) else {
            return Err(FormatError::MissingHeader {
                line: self.line,
                prefix,
                found: token.to_string(),
            });
        };
        digits.parse().map_err(|_| FormatError::InvalidNumber {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn expect(&mut self, literal: &'static str) -> Result<(), FormatError> {
        let token = self.next()?;
        if token != literal {
            return Err(FormatError::UnexpectedRecord {
                line: self.line,
                text: token.to_string(),
            });
        }
        Ok(())
    }

    fn node(&mut self, nodes: usize) -> Result<usize, FormatError> {
        let node: usize = self.number()?;
        if node >= nodes {
            return Err(FormatError::NodeOutOfRange {
                line: self.line,
                node,
                nodes,
            });
        }
        Ok(node)
    }

    /// Tokens left on the line, without consuming them.
    fn remaining(&self) -> usize {
        self.iter.clone().count()
    }

    /// Fails unless `count` items of `width` tokens each can still follow.
    fn bounded(
        &self,
        what: &'static str,
        count: usize,
        width: usize,
    ) -> Result<usize, FormatError> {
        let available = self.remaining() / width;
        if count > available {
            return Err(FormatError::CountTooLarge {
                line: self.line,
                what,
                count,
                available,
            });
        }
        Ok(count)
    }

    fn finish(mut self) -> Result<(), FormatError> {
        match self.iter.next() {
            None => Ok(()),
            Some(token) => Err(FormatError::TrailingToken {
                line: self.line,
                token: token.to_string(),
            }),
        }
    }
}

/// Parses one `n#<N> l#<L> (<node> <label>)×N e#<E> (<u> <v>)×E` line.
///
/// Node ids may come in any order. `line` is only used for error positions.
pub fn parse_sigmo_line(text: &str, line: usize) -> Result<LabeledGraph, FormatError> {
    let mut t = Tokens::new(text, line);
    let nodes: usize = t.header("n#")?;
    let label_space: u32 = t.header("l#")?;
    let nodes = t.bounded("node", nodes, 2)?;

    let mut labels: Vec<Option<u32>> = vec![None; nodes];
    for _ in 0..nodes {
        let node = t.node(nodes)?;
        let label: u32 = t.number()?;
        if labels[node].is_some() {
            return Err(FormatError::DuplicateNode { line, node });
        }
        labels[node] = Some(label);
    }

    let edges: usize = t.header("e#")?;
    let edges = t.bounded("edge", edges, 2)?;
    let mut graph = LabeledGraph::with_capacity(nodes, edges);
    for label in labels {
        graph.add_node(Vertex { label });
    }
    for _ in 0..edges {
        let u = t.node(nodes)?;
        let v = t.node(nodes)?;
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v));
    }
    t.finish()?;
    graph.set_label_space(Some(label_space));
    Ok(graph)
}

/// Reads one graph per non-blank line.
pub fn read_sigmo(input: &str) -> Result<Vec<LabeledGraph>, FormatError> {
    let mut graphs = Vec::new();
    for (idx, text) in input.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        graphs.push(parse_sigmo_line(text, idx + 1)?);
    }
    debug!(graphs = graphs.len(), "read n# graphs");
    Ok(graphs)
}

/// Reads GSI blocks: `t # <id>`, a `<nodes> <edges> <labels> <edge labels>`
/// header, then `v <id> <label>` and `e <u> <v> [<label>]` records. A
/// `t # -1` record ends the stream; anything after it is ignored.
pub fn read_gsi(input: &str) -> Result<Vec<LabeledGraph>, FormatError> {
    let mut graphs = Vec::new();
    let mut current: Option<LabeledGraph> = None;
    let mut header_pending = false;
    let mut last_line = 0;
    let total_lines = input.lines().count();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        last_line = line;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let mut t = Tokens::new(text, line);

        if header_pending {
            let nodes: usize = t.number()?;
            let edges: usize = t.number()?;
            let labels: u32 = t.number()?;
            t.optional_number::<u32>()?;
            t.finish()?;
            let available = total_lines - line;
            for (what, count) in [("node", nodes), ("edge", edges)] {
                if count > available {
                    return Err(FormatError::CountTooLarge {
                        line,
                        what,
                        count,
                        available,
                    });
                }
            }
            let mut graph = LabeledGraph::with_capacity(nodes, edges);
            for _ in 0..nodes {
                graph.add_node(Vertex::default());
            }
            graph.set_label_space(Some(labels));
            current = Some(graph);
            header_pending = false;
            continue;
        }

        let tag = t.next()?;
        if tag == "t" {
            t.expect("#")?;
            let id: i64 = t.number()?;
            t.finish()?;
            graphs.extend(current.take());
            if id < 0 {
                debug!(graphs = graphs.len(), "read GSI graphs");
                return Ok(graphs);
            }
            header_pending = true;
            continue;
        }
        match (tag, current.as_mut()) {
            ("v", Some(graph)) => {
                let node = t.node(graph.node_count())?;
                let label: u32 = t.number()?;
                t.finish()?;
                let vertex = graph.node_mut(NodeIndex::new(node));
                if vertex.label.is_some() {
                    return Err(FormatError::DuplicateNode { line, node });
                }
                vertex.label = Some(label);
            }
            ("e", Some(graph)) => {
                let u = t.node(graph.node_count())?;
                let v = t.node(graph.node_count())?;
                t.optional_number::<u32>()?;
                t.finish()?;
                graph.add_edge(NodeIndex::new(u), NodeIndex::new(v));
            }
            _ => {
                return Err(FormatError::UnexpectedRecord {
                    line,
                    text: text.to_string(),
                })
            }
        }
    }

    if header_pending {
        return Err(FormatError::UnexpectedEnd { line: last_line });
    }
    graphs.extend(current);
    debug!(graphs = graphs.len(), "read GSI graphs");
    Ok(graphs)
}
