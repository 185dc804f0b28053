use crate::matrix::Grid;
use crate::traceback::TracebackOperation;

/// Cell `(i, j)` holds the best score of `seq1[..i]` against `seq2[..j]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    grid: Grid<i32>,
}

impl ScoreMatrix {
    pub(crate) fn from_grid(grid: Grid<i32>) -> Self {
        Self { grid }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.grid.get(i, j)
    }

    /// `len(seq1) + 1`
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// `len(seq2) + 1`
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn row(&self, i: usize) -> &[i32] {
        self.grid.row(i)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        self.grid.iter_rows()
    }

    /// Score of the full global alignment, the bottom-right cell.
    pub fn final_score(&self) -> i32 {
        self.get(self.rows() - 1, self.cols() - 1)
    }

    pub fn to_vec(&self) -> Vec<Vec<i32>> {
        self.iter_rows().map(<[i32]>::to_vec).collect()
    }
}

/// Column counts of a finished alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
    pub columns: u32,
}

impl AlignmentStats {
    pub fn from_operations(operations: &[TracebackOperation]) -> Self {
        operations.iter().fold(Self::default(), |mut acc, op| {
            match op {
                TracebackOperation::Match => acc.matches += 1,
                TracebackOperation::Mismatch => acc.mismatches += 1,
                TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
            }
            acc.columns += 1;
            acc
        })
    }

    /// Fraction of columns that are matches; 0 for an empty alignment.
    pub fn identity(&self) -> f64 {
        if self.columns == 0 {
            0.0
        } else {
            self.matches as f64 / self.columns as f64
        }
    }
}
