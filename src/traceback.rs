use std::borrow::Cow;
use std::fmt::Write as _;

use log::trace;

use crate::config::ScoreParams;
use crate::matrix::Grid;
use crate::scoring::{AlignmentStats, ScoreMatrix};
use crate::{NwAlignerError, GAP_SYMBOL};

/// Which neighbour produced the optimal score of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predecessor {
    /// Only at `(0, 0)`.
    Origin,
    /// `(i - 1, j - 1)`: `seq1[i - 1]` aligned with `seq2[j - 1]`.
    Diagonal,
    /// `(i - 1, j)`: `seq1[i - 1]` aligned with a gap.
    Up,
    /// `(i, j - 1)`: a gap aligned with `seq2[j - 1]`.
    Left,
}

impl Predecessor {
    /// Chooses the predecessor of a cell whose optimum is `best`.
    ///
    /// Ties resolve diagonal first, then up, then left. This order decides
    /// which of several optimal alignments is reported.
    #[inline]
    pub fn select(best: i64, diag: i64, up: i64) -> Self {
        if best == diag {
            Predecessor::Diagonal
        } else if best == up {
            Predecessor::Up
        } else {
            Predecessor::Left
        }
    }

    /// Derives the predecessor of `(i, j)` from a filled score matrix.
    /// Candidates are widened to `i64`, so this never overflows.
    pub(crate) fn recompute(
        scores: &ScoreMatrix,
        params: &ScoreParams,
        seq1: &[u8],
        seq2: &[u8],
        i: usize,
        j: usize,
    ) -> Self {
        match (i, j) {
            (0, 0) => Predecessor::Origin,
            (_, 0) => Predecessor::Up,
            (0, _) => Predecessor::Left,
            _ => {
                let diag = scores.get(i - 1, j - 1) as i64
                    + params.substitution(seq1[i - 1], seq2[j - 1]) as i64;
                let up = scores.get(i - 1, j) as i64 + params.gap as i64;
                Predecessor::select(scores.get(i, j) as i64, diag, up)
            }
        }
    }
}

/// One pointer per cell, same shape as the [`ScoreMatrix`] it was filled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracebackMatrix {
    grid: Grid<Predecessor>,
}

impl TracebackMatrix {
    pub(crate) fn try_new(rows: usize, cols: usize) -> Result<Self, NwAlignerError> {
        Ok(Self {
            grid: Grid::try_new(rows, cols, Predecessor::Origin)?,
        })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Predecessor {
        self.grid.get(row, col)
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Predecessor) {
        self.grid.set(row, col, value);
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Gap in the first sequence.
    Insertion,
    /// Gap in the second sequence.
    Deletion,
}

impl TracebackOperation {
    fn cigar_char(self) -> char {
        match self {
            TracebackOperation::Match => '=',
            TracebackOperation::Mismatch => 'X',
            TracebackOperation::Insertion => 'I',
            TracebackOperation::Deletion => 'D',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub score: i32,
    pub aligned_seq1: Vec<u8>,
    pub aligned_seq2: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
}

impl AlignmentResult {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn aligned_seq1_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.aligned_seq1)
    }

    pub fn aligned_seq2_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.aligned_seq2)
    }

    pub fn stats(&self) -> AlignmentStats {
        AlignmentStats::from_operations(&self.operations)
    }

    /// Sum of the per-column contributions under `params`.
    pub fn column_score(&self, params: &ScoreParams) -> i64 {
        self.operations
            .iter()
            .map(|op| match op {
                TracebackOperation::Match => params.match_score as i64,
                TracebackOperation::Mismatch => params.mismatch as i64,
                TracebackOperation::Insertion | TracebackOperation::Deletion => params.gap as i64,
            })
            .sum()
    }

    /// Run-length encoded operations, e.g. `3=1X2I`.
    pub fn cigar(&self) -> String {
        let mut cigar = String::new();
        let mut ops = self.operations.iter().peekable();
        while let Some(&op) = ops.next() {
            let mut n = 1;
            while ops.next_if(|&&next| next == op).is_some() {
                n += 1;
            }
            let _ = write!(cigar, "{}{}", n, op.cigar_char());
        }
        cigar
    }
}

/// Walks back from `(m, n)` to `(0, 0)` and rebuilds the gapped sequences.
pub struct Traceback<'a> {
    seq1: &'a [u8],
    seq2: &'a [u8],
}

impl<'a> Traceback<'a> {
    pub fn new(seq1: &'a [u8], seq2: &'a [u8]) -> Self {
        Self { seq1, seq2 }
    }

    /// Follows the pointers recorded by the matrix builder.
    pub fn reconstruct_alignment(
        &self,
        pointers: &TracebackMatrix,
        scores: &ScoreMatrix,
    ) -> Result<AlignmentResult, NwAlignerError> {
        self.check_shape(pointers.rows(), pointers.cols())?;
        self.check_shape(scores.rows(), scores.cols())?;
        self.walk(scores.final_score(), |i, j| pointers.get(i, j))
    }

    /// Rebuilds each predecessor from the score matrix alone, using the same
    /// tie-break as the builder. The result is identical to following pointers.
    pub fn reconstruct_from_scores(
        &self,
        scores: &ScoreMatrix,
        params: &ScoreParams,
    ) -> Result<AlignmentResult, NwAlignerError> {
        self.check_shape(scores.rows(), scores.cols())?;
        self.walk(scores.final_score(), |i, j| {
            Predecessor::recompute(scores, params, self.seq1, self.seq2, i, j)
        })
    }

    fn check_shape(&self, rows: usize, cols: usize) -> Result<(), NwAlignerError> {
        if rows != self.seq1.len() + 1 || cols != self.seq2.len() + 1 {
            return Err(NwAlignerError::TracebackError(format!(
                "matrix is {}x{} but sequences need {}x{}",
                rows,
                cols,
                self.seq1.len() + 1,
                self.seq2.len() + 1
            )));
        }
        Ok(())
    }

    fn walk(
        &self,
        score: i32,
        predecessor: impl Fn(usize, usize) -> Predecessor,
    ) -> Result<AlignmentResult, NwAlignerError> {
        let capacity = self.seq1.len() + self.seq2.len();
        let mut aligned_seq1 = Vec::with_capacity(capacity);
        let mut aligned_seq2 = Vec::with_capacity(capacity);
        let mut operations = Vec::with_capacity(capacity);

        let (mut i, mut j) = (self.seq1.len(), self.seq2.len());
        while i > 0 || j > 0 {
            let step = predecessor(i, j);
            trace!("traceback ({}, {}) -> {:?}", i, j, step);
            match step {
                Predecessor::Diagonal if i > 0 && j > 0 => {
                    let (a, b) = (self.seq1[i - 1], self.seq2[j - 1]);
                    aligned_seq1.push(a);
                    aligned_seq2.push(b);
                    operations.push(if a == b {
                        TracebackOperation::Match
                    } else {
                        TracebackOperation::Mismatch
                    });
                    i -= 1;
                    j -= 1;
                }
                Predecessor::Up if i > 0 => {
                    aligned_seq1.push(self.seq1[i - 1]);
                    aligned_seq2.push(GAP_SYMBOL);
                    operations.push(TracebackOperation::Deletion);
                    i -= 1;
                }
                Predecessor::Left if j > 0 => {
                    aligned_seq1.push(GAP_SYMBOL);
                    aligned_seq2.push(self.seq2[j - 1]);
                    operations.push(TracebackOperation::Insertion);
                    j -= 1;
                }
                other => {
                    return Err(NwAlignerError::TracebackError(format!(
                        "invalid predecessor {:?} at ({}, {})",
                        other, i, j
                    )))
                }
            }
        }

        // Built from the end; put back in left-to-right order.
        aligned_seq1.reverse();
        aligned_seq2.reverse();
        operations.reverse();

        Ok(AlignmentResult {
            score,
            aligned_seq1,
            aligned_seq2,
            operations,
        })
    }
}
