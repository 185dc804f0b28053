//! Needleman-Wunsch global alignment of two sequences with a linear gap
//! penalty.
//!
//! Alignment runs in two passes: [`builder::MatrixBuilder`] fills the
//! `(m + 1) x (n + 1)` score matrix, then [`traceback::Traceback`] walks back
//! from the bottom-right cell to rebuild one optimal alignment. When several
//! alignments are optimal, predecessors are chosen diagonal first, then up,
//! then left.
//!
//! ```
//! use nw_aligner::{NwAligner, ScoreParams};
//!
//! let aligner = NwAligner::new(ScoreParams::new(2, -1, -2));
//! let alignment = aligner.align(b"", b"ACGT").unwrap();
//! assert_eq!(alignment.result.aligned_seq1, b"----");
//! assert_eq!(alignment.result.score, -8);
//! ```

use log::debug;
use thiserror::Error;

pub mod batch;
pub mod builder;
pub mod config;
pub mod matrix;
pub mod render;
pub mod scoring;
pub mod traceback;

pub use batch::BatchAligner;
pub use builder::MatrixBuilder;
pub use config::{ScoreParams, TracebackStrategy};
pub use scoring::{AlignmentStats, ScoreMatrix};
pub use traceback::{AlignmentResult, Predecessor, Traceback, TracebackMatrix, TracebackOperation};

// Default scoring scheme.
pub const DEFAULT_MATCH: i32 = 2;
pub const DEFAULT_MISMATCH: i32 = -1;
pub const DEFAULT_GAP: i32 = -2;

pub const GAP_SYMBOL: u8 = b'-';

#[derive(Debug, Error)]
pub enum NwAlignerError {
    #[error("Failed to allocate a {rows}x{cols} matrix")]
    AllocationFailed { rows: usize, cols: usize },
    #[error("Score at cell ({i}, {j}) does not fit in i32")]
    ScoreOverflow { i: usize, j: usize },
    #[error("Traceback error: {0}")]
    TracebackError(String),
    #[error("Batch worker disconnected")]
    WorkerDisconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<Vec<u8>> for Sequence {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

/// Score matrix together with the alignment traced through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub matrix: ScoreMatrix,
    pub result: AlignmentResult,
}

/// Aligns pairs of sequences under a fixed scoring scheme.
///
/// The aligner holds no per-alignment state: every call to
/// [`align`](Self::align) allocates its own matrices, so one aligner can be
/// shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct NwAligner {
    score_params: ScoreParams,
    strategy: TracebackStrategy,
}

impl NwAligner {
    pub fn new(score_params: ScoreParams) -> Self {
        Self {
            score_params,
            strategy: TracebackStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: TracebackStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn score_params(&self) -> &ScoreParams {
        &self.score_params
    }

    pub fn strategy(&self) -> TracebackStrategy {
        self.strategy
    }

    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment, NwAlignerError> {
        debug!(
            "aligning {} x {} symbols with {:?} traceback",
            seq1.len(),
            seq2.len(),
            self.strategy
        );
        let builder = MatrixBuilder::new(self.score_params);
        let traceback = Traceback::new(seq1, seq2);

        let (matrix, result) = match self.strategy {
            TracebackStrategy::Pointers => {
                let (matrix, pointers) = builder.fill(seq1, seq2)?;
                let result = traceback.reconstruct_alignment(&pointers, &matrix)?;
                (matrix, result)
            }
            TracebackStrategy::Recompute => {
                let matrix = builder.fill_scores(seq1, seq2)?;
                let result = traceback.reconstruct_from_scores(&matrix, &self.score_params)?;
                (matrix, result)
            }
        };
        debug!("alignment score {} over {} columns", result.score, result.len());

        Ok(Alignment { matrix, result })
    }

    pub fn align_sequences(
        &self,
        seq1: &Sequence,
        seq2: &Sequence,
    ) -> Result<Alignment, NwAlignerError> {
        self.align(seq1.as_bytes(), seq2.as_bytes())
    }
}

/// Aligns `seq1` against `seq2` and returns the score matrix and the alignment.
pub fn needleman_wunsch(
    seq1: &[u8],
    seq2: &[u8],
    match_score: i32,
    mismatch: i32,
    gap: i32,
) -> Result<(ScoreMatrix, AlignmentResult), NwAlignerError> {
    let Alignment { matrix, result } =
        NwAligner::new(ScoreParams::new(match_score, mismatch, gap)).align(seq1, seq2)?;
    Ok((matrix, result))
}
