use std::fmt;

use crate::NwAlignerError;

/// Dense row-major grid with `rows * cols` cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Grid<T> {
    /// Allocates a grid filled with `value`.
    ///
    /// The cell count is computed with checked arithmetic and the buffer is
    /// reserved fallibly, so an oversized request turns into
    /// [`NwAlignerError::AllocationFailed`] instead of an abort.
    pub fn try_new(rows: usize, cols: usize, value: T) -> Result<Self, NwAlignerError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(NwAlignerError::AllocationFailed { rows, cols })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| NwAlignerError::AllocationFailed { rows, cols })?;
        data.resize(len, value);
        Ok(Self { data, rows, cols })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |i| self.row(i))
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter_rows()).finish()
    }
}
