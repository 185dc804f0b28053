use log::debug;

use crate::config::ScoreParams;
use crate::matrix::Grid;
use crate::scoring::ScoreMatrix;
use crate::traceback::{Predecessor, TracebackMatrix};
use crate::NwAlignerError;

/// Fills the Needleman-Wunsch score matrix for one pair of sequences.
#[derive(Debug, Clone, Copy)]
pub struct MatrixBuilder {
    params: ScoreParams,
}

impl MatrixBuilder {
    pub fn new(params: ScoreParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoreParams {
        &self.params
    }

    /// Fills the score matrix and the pointer matrix together.
    ///
    /// Scores are filled first; the pointer grid is only allocated once every
    /// cell is known to fit in `i32`.
    pub fn fill(
        &self,
        seq1: &[u8],
        seq2: &[u8],
    ) -> Result<(ScoreMatrix, TracebackMatrix), NwAlignerError> {
        let scores = self.fill_scores(seq1, seq2)?;
        let mut pointers = TracebackMatrix::try_new(scores.rows(), scores.cols())?;
        for i in 0..scores.rows() {
            for j in 0..scores.cols() {
                let p = Predecessor::recompute(&scores, &self.params, seq1, seq2, i, j);
                pointers.set(i, j, p);
            }
        }
        Ok((scores, pointers))
    }

    /// Fills only the score matrix. Pair with
    /// [`Traceback::reconstruct_from_scores`](crate::traceback::Traceback::reconstruct_from_scores).
    ///
    /// Candidates are evaluated in `i64`; a cell whose best score does not fit
    /// in `i32` yields [`NwAlignerError::ScoreOverflow`].
    pub fn fill_scores(&self, seq1: &[u8], seq2: &[u8]) -> Result<ScoreMatrix, NwAlignerError> {
        let (rows, cols) = (seq1.len() + 1, seq2.len() + 1);
        debug!("filling {}x{} score matrix", rows, cols);
        let mut score = Grid::try_new(rows, cols, 0i32)?;
        let gap = self.params.gap as i64;
        let store = |score: &mut Grid<i32>, i: usize, j: usize, value: i64| {
            let value = i32::try_from(value).map_err(|_| NwAlignerError::ScoreOverflow { i, j })?;
            score.set(i, j, value);
            Ok::<(), NwAlignerError>(())
        };

        // Boundaries: a prefix aligned entirely against gaps.
        for i in 1..rows {
            let value = score.get(i - 1, 0) as i64 + gap;
            store(&mut score, i, 0, value)?;
        }
        for j in 1..cols {
            let value = score.get(0, j - 1) as i64 + gap;
            store(&mut score, 0, j, value)?;
        }

        for i in 1..rows {
            let a = seq1[i - 1];
            for j in 1..cols {
                let diag =
                    score.get(i - 1, j - 1) as i64 + self.params.substitution(a, seq2[j - 1]) as i64;
                let up = score.get(i - 1, j) as i64 + gap;
                let left = score.get(i, j - 1) as i64 + gap;
                store(&mut score, i, j, diag.max(up).max(left))?;
            }
        }

        Ok(ScoreMatrix::from_grid(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_multiples_of_gap() {
        let builder = MatrixBuilder::new(ScoreParams::new(2, -1, -3));
        let (scores, pointers) = builder.fill(b"ACGTA", b"TTG").unwrap();
        assert_eq!(scores.rows(), 6);
        assert_eq!(scores.cols(), 4);
        assert_eq!(scores.get(0, 0), 0);
        assert_eq!(pointers.get(0, 0), Predecessor::Origin);
        for i in 1..6 {
            assert_eq!(scores.get(i, 0), -3 * i as i32);
            assert_eq!(pointers.get(i, 0), Predecessor::Up);
        }
        for j in 1..4 {
            assert_eq!(scores.get(0, j), -3 * j as i32);
            assert_eq!(pointers.get(0, j), Predecessor::Left);
        }
    }

    #[test]
    fn gattaca_matrix() {
        let builder = MatrixBuilder::new(ScoreParams::new(2, -1, -2));
        let scores = builder.fill_scores(b"GATTACA", b"GCATGCU").unwrap();
        let expected = vec![
            vec![0, -2, -4, -6, -8, -10, -12, -14],
            vec![-2, 2, 0, -2, -4, -6, -8, -10],
            vec![-4, 0, 1, 2, 0, -2, -4, -6],
            vec![-6, -2, -1, 0, 4, 2, 0, -2],
            vec![-8, -4, -3, -2, 2, 3, 1, -1],
            vec![-10, -6, -5, -1, 0, 1, 2, 0],
            vec![-12, -8, -4, -3, -2, -1, 3, 1],
            vec![-14, -10, -6, -2, -4, -3, 1, 2],
        ];
        assert_eq!(scores.to_vec(), expected);
        assert_eq!(scores.final_score(), 2);
    }

    #[test]
    fn fill_and_fill_scores_agree() {
        let builder = MatrixBuilder::new(ScoreParams::default());
        let (scores, _) = builder.fill(b"GATTACA", b"GCATGCUAATCACA").unwrap();
        assert_eq!(scores, builder.fill_scores(b"GATTACA", b"GCATGCUAATCACA").unwrap());
    }

    #[test]
    fn empty_inputs() {
        let builder = MatrixBuilder::new(ScoreParams::default());
        let scores = builder.fill_scores(b"", b"").unwrap();
        assert_eq!(scores.to_vec(), vec![vec![0]]);
        let scores = builder.fill_scores(b"", b"ACGT").unwrap();
        assert_eq!(scores.to_vec(), vec![vec![0, -2, -4, -6, -8]]);
    }

    #[test]
    fn large_scores_that_fit_are_accepted() {
        let builder = MatrixBuilder::new(ScoreParams::new(1_500_000_000, 0, 0));
        let scores = builder.fill_scores(b"A", b"A").unwrap();
        assert_eq!(scores.final_score(), 1_500_000_000);

        // Gap candidates fall below i32::MIN but never win.
        let builder = MatrixBuilder::new(ScoreParams::new(0, 0, i32::MIN));
        let (scores, pointers) = builder.fill(b"A", b"A").unwrap();
        assert_eq!(scores.to_vec(), vec![vec![0, i32::MIN], vec![i32::MIN, 0]]);
        assert_eq!(pointers.get(1, 1), Predecessor::Diagonal);
    }

    #[test]
    fn overflowing_cell_is_reported() {
        let builder = MatrixBuilder::new(ScoreParams::new(1_500_000_000, 0, 0));
        let err = builder.fill_scores(b"AA", b"AA").unwrap_err();
        assert!(matches!(err, NwAlignerError::ScoreOverflow { i: 2, j: 2 }));

        let builder = MatrixBuilder::new(ScoreParams::new(0, 0, i32::MIN));
        let err = builder.fill(b"AA", b"").unwrap_err();
        assert!(matches!(err, NwAlignerError::ScoreOverflow { i: 2, j: 0 }));
    }
}
