use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Like `zeros`, but reports a failed reservation instead of aborting.
    ///
    /// `what` names the buffer in the resulting `NetworkError::Allocation`.
    pub fn try_zeros(what: &'static str, rows: usize, cols: usize) -> Result<Matrix> {
        let alloc_err = || NetworkError::Allocation { what, rows, cols };

        let mut data: Vec<Vec<f64>> = Vec::new();
        data.try_reserve_exact(rows).map_err(|_| alloc_err())?;
        for _ in 0..rows {
            data.push(try_zeroed_vec(cols).map_err(|_| alloc_err())?);
        }

        Ok(Matrix { rows, cols, data })
    }

    /// Overwrites every element, row by row, with successive values of `gen`.
    pub fn fill_with<F>(&mut self, mut gen: F)
    where
        F: FnMut() -> f64,
    {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = gen();
            }
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// In-place element-wise `self += rhs`.
    pub fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (x, d) in row.iter_mut().zip(rhs_row.iter()) {
                *x += d;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flat_map(|row| row.iter().copied())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

/// Fallible `vec![0.0; len]`.
pub fn try_zeroed_vec(len: usize) -> std::result::Result<Vec<f64>, std::collections::TryReserveError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, 0.0);
    Ok(v)
}
