//! `nodesig` command-line entry point.
//!
//! ```bash
//! # Round-0 signatures, 2-bit counters in 32-bit words
//! nodesig signatures queries.txt
//!
//! # Convert n# graphs into GSI input
//! nodesig convert queries.txt --to gsi
//!
//! # Candidate statistics after two refinement rounds
//! nodesig filter queries.txt data.txt --steps 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nodesig::report::{candidate_counts, candidate_summary, signature_block};
use nodesig::{
    filter_with_refinement, generate_signatures, Accumulation, InputFormat, LabeledGraph,
    MissingLabel, OutputFormat, SignatureParams,
};

#[derive(Parser, Debug)]
#[command(name = "nodesig")]
#[command(author, version, about = "Neighborhood signatures and graph conversion for subgraph matching")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print per-node signatures as zero-padded binary literals
    Signatures {
        /// Graph file
        input: PathBuf,
        #[arg(long, default_value = "sigmo")]
        from: InputFormat,
        #[command(flatten)]
        signature: SignatureArgs,
    },
    /// Convert graphs into a matching engine's input grammar
    Convert {
        /// Graph file
        input: PathBuf,
        #[arg(long, default_value = "sigmo")]
        from: InputFormat,
        /// cuts, gsi, vf3, msm or sigmo
        #[arg(long)]
        to: OutputFormat,
    },
    /// Filter candidate data nodes for every query node
    Filter {
        /// Query graph file
        query: PathBuf,
        /// Data graph file
        data: PathBuf,
        #[arg(long, default_value = "sigmo")]
        from: InputFormat,
        #[command(flatten)]
        signature: SignatureArgs,
        /// Print the candidate count of every query node
        #[arg(short, long)]
        print_candidates: bool,
    },
}

#[derive(Args, Debug)]
struct SignatureArgs {
    /// Bits per counter
    #[arg(long, default_value_t = 2)]
    bits: u32,
    /// Bits per signature (at most 64)
    #[arg(long, default_value_t = 32)]
    width: u32,
    /// Ignore labels at or above this value
    #[arg(long)]
    labels: Option<u32>,
    /// Refinement rounds after the initial label round
    #[arg(short = 'i', long, default_value_t = 0)]
    steps: usize,
    /// Reject graphs containing unlabeled nodes instead of treating them as label 0
    #[arg(long)]
    strict_labels: bool,
    /// OR each round into the previous signature instead of resetting it
    #[arg(long)]
    or_previous: bool,
}

impl SignatureArgs {
    fn params(&self) -> SignatureParams {
        SignatureParams {
            bits: self.bits,
            width: self.width,
            label_space: self.labels,
            refinement_steps: self.steps,
            missing_label: if self.strict_labels {
                MissingLabel::Reject
            } else {
                MissingLabel::Zero
            },
            accumulation: if self.or_previous {
                Accumulation::OrPrevious
            } else {
                Accumulation::Reset
            },
        }
    }
}

fn load(path: &Path, format: InputFormat) -> Result<Vec<LabeledGraph>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let graphs = format
        .read(&text)
        .with_context(|| format!("parsing {} as {}", path.display(), format))?;
    info!(path = %path.display(), graphs = graphs.len(), "loaded graphs");
    Ok(graphs)
}

fn signatures(input: &Path, from: InputFormat, args: &SignatureArgs) -> Result<()> {
    for (i, graph) in load(input, from)?.iter().enumerate() {
        let params = args.params().or_label_space(graph.label_space());
        let layout = params.layout().with_context(|| format!("graph {}", i + 1))?;
        let sigs = generate_signatures(graph, &params)
            .with_context(|| format!("graph {}", i + 1))?;
        print!("{}", signature_block(i + 1, &sigs, layout));
    }
    Ok(())
}

fn convert(input: &Path, from: InputFormat, to: OutputFormat) -> Result<()> {
    let graphs = load(input, from)?;
    print!("{}", to.write(&graphs));
    Ok(())
}

fn filter(
    query: &Path,
    data: &Path,
    from: InputFormat,
    args: &SignatureArgs,
    print_candidates: bool,
) -> Result<()> {
    let queries = load(query, from)?;
    let data_graphs = load(data, from)?;
    for (qi, q) in queries.iter().enumerate() {
        // Data labels outside the query's label space never affect dominance.
        let params = args.params().or_label_space(q.label_space());
        for (di, d) in data_graphs.iter().enumerate() {
            let candidates = filter_with_refinement(q, d, &params)
                .with_context(|| format!("query {} against data {}", qi + 1, di + 1))?;
            print!("{}", candidate_summary(qi + 1, di + 1, &candidates.stats()));
            if print_candidates {
                eprint!("{}", candidate_counts(&candidates));
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Signatures {
            input,
            from,
            signature,
        } => signatures(&input, from, &signature),
        Commands::Convert { input, from, to } => convert(&input, from, to),
        Commands::Filter {
            query,
            data,
            from,
            signature,
            print_candidates,
        } => filter(&query, &data, from, &signature, print_candidates),
    }
}
