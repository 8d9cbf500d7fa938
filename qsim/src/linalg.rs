//! Dense complex linear algebra used to build and apply full-register operators.

use crate::api::{Result, SimError};
use crate::gate::GateMatrix;
use num_complex::Complex;

const ZERO: Complex<f64> = Complex::new(0.0, 0.0);
const ONE: Complex<f64> = Complex::new(1.0, 0.0);

/// Row-major dense complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![ZERO; rows * cols],
        }
    }

    /// Builds a matrix from nested rows. Fails if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Complex<f64>>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            if row.len() != cols {
                return Err(SimError::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn from_gate(m: &GateMatrix) -> Self {
        Self {
            rows: 2,
            cols: 2,
            data: vec![m[0][0], m[0][1], m[1][0], m[1][1]],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Complex<f64>) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[Complex<f64>] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j).conj());
            }
        }
        out
    }

    pub fn matmul(&self, other: &Matrix) -> Result<Self> {
        if self.cols != other.rows {
            return Err(SimError::DimensionMismatch {
                expected: self.cols,
                found: other.rows,
            });
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == ZERO {
                    continue;
                }
                for j in 0..other.cols {
                    let idx = i * out.cols + j;
                    out.data[idx] += a * other.get(k, j);
                }
            }
        }
        Ok(out)
    }

    /// Element-wise comparison; both parts of every entry must be within `tol`.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol)
    }
}

/// The n x n identity.
pub fn identity(n: usize) -> Matrix {
    let mut m = Matrix::zeros(n, n);
    for i in 0..n {
        m.set(i, i, ONE);
    }
    m
}

/// Tensor product `a ⊗ b`. Element (i*rows_b + k, j*cols_b + l) is a[i][j] * b[k][l].
pub fn kronecker(a: &Matrix, b: &Matrix) -> Matrix {
    let mut p = Matrix::zeros(a.rows * b.rows, a.cols * b.cols);
    for i in 0..a.rows {
        for j in 0..a.cols {
            let aij = a.get(i, j);
            for k in 0..b.rows {
                for l in 0..b.cols {
                    p.set(i * b.rows + k, j * b.cols + l, aij * b.get(k, l));
                }
            }
        }
    }
    p
}

pub fn mat_vec(m: &Matrix, v: &[Complex<f64>]) -> Result<Vec<Complex<f64>>> {
    if m.cols != v.len() {
        return Err(SimError::DimensionMismatch {
            expected: m.cols,
            found: v.len(),
        });
    }
    Ok((0..m.rows)
        .map(|i| m.row(i).iter().zip(v).map(|(a, b)| a * b).sum::<Complex<f64>>())
        .collect())
}
