use std::time::Instant;

use clap::Parser;
use nw_aligner::render::{format_alignment, format_matrix};
use nw_aligner::{NwAligner, ScoreParams, Sequence, TracebackStrategy};
use nw_aligner::{DEFAULT_GAP, DEFAULT_MATCH, DEFAULT_MISMATCH};

/// Global alignment of two sequences with the Needleman-Wunsch algorithm.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// First sequence.
    #[clap(default_value = "GATTACA")]
    seq1: String,

    /// Second sequence.
    #[clap(default_value = "GCATGCUAATCACA")]
    seq2: String,

    /// Score for two equal symbols.
    #[clap(long = "match", default_value_t = DEFAULT_MATCH, allow_hyphen_values = true)]
    match_score: i32,

    /// Score for two different symbols.
    #[clap(long, default_value_t = DEFAULT_MISMATCH, allow_hyphen_values = true)]
    mismatch: i32,

    /// Score for each gap symbol.
    #[clap(long, default_value_t = DEFAULT_GAP, allow_hyphen_values = true)]
    gap: i32,

    /// How the traceback finds predecessors: `pointers` or `recompute`.
    #[clap(long, default_value = "pointers")]
    strategy: TracebackStrategy,

    /// Do not print the score matrix.
    #[clap(long)]
    no_matrix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let seq1 = Sequence::from(cli.seq1.as_str());
    let seq2 = Sequence::from(cli.seq2.as_str());
    let aligner = NwAligner::new(ScoreParams::new(cli.match_score, cli.mismatch, cli.gap))
        .with_strategy(cli.strategy);

    let start = Instant::now();
    let alignment = aligner.align_sequences(&seq1, &seq2)?;
    let elapsed = start.elapsed();
    println!("Time taken by alignment: {} microseconds", elapsed.as_micros());

    if !cli.no_matrix {
        println!("Score matrix:");
        print!("{}", format_matrix(&alignment.matrix, seq1.as_bytes(), seq2.as_bytes()));
    }

    let result = &alignment.result;
    let stats = result.stats();
    println!("Alignment (score {}, {}):", result.score, result.cigar());
    print!("{}", format_alignment(result));
    println!(
        "Matches: {}  Mismatches: {}  Gaps: {}  Identity: {:.1}%",
        stats.matches,
        stats.mismatches,
        stats.gaps,
        stats.identity() * 100.0
    );

    Ok(())
}
