//! N-by-N exact matrix math.

use std::ops::*;

use num_traits::{One, Zero};

use crate::{QVector, Rational};

/// N-by-N square matrix over [`Rational`], stored in **column-major** order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QMatrix {
    /// Number of dimensions of the matrix.
    ndim: u8,
    /// Elements stored in **column-major** order.
    elems: Vec<Rational>,
}

impl QMatrix {
    /// Constructs a matrix with all zeros.
    pub fn zero(ndim: u8) -> Self {
        Self {
            ndim,
            elems: vec![Rational::zero(); ndim as usize * ndim as usize],
        }
    }
    /// Constructs an identity matrix.
    pub fn ident(ndim: u8) -> Self {
        let mut ret = Self::zero(ndim);
        for i in 0..ndim {
            *ret.get_mut(i, i) = Rational::one();
        }
        ret
    }
    /// Constructs a matrix from a function for each element, where `col` and
    /// `row` index the function arguments in that order.
    pub fn from_fn(ndim: u8, f: impl Fn(u8, u8) -> Rational) -> Self {
        let f = &f;
        Self {
            ndim,
            elems: (0..ndim)
                .flat_map(|col| (0..ndim).map(move |row| f(col, row)))
                .collect(),
        }
    }
    /// Constructs a matrix from a list of columns.
    pub fn from_cols(cols: &[QVector]) -> Self {
        let ndim = cols.len() as u8;
        Self::from_fn(ndim, |col, row| cols[col as usize].get(row))
    }
    /// Constructs the matrix of the reflection through the hyperplane
    /// orthogonal to `v`, which need not be normalized.
    ///
    /// # Panics
    ///
    /// Panics if `v` is zero.
    pub fn reflection(v: &QVector) -> Self {
        let norm2 = v.dot(v);
        assert!(!norm2.is_zero(), "cannot reflect through the zero vector");
        Self::from_fn(v.ndim(), |col, row| {
            let delta = if col == row {
                Rational::one()
            } else {
                Rational::zero()
            };
            delta - Rational::from(2) * v.get(row) * v.get(col) / norm2
        })
    }

    /// Returns the number of dimensions (size) of the matrix.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns an element of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `col` or `row` is out of bounds.
    pub fn get(&self, col: u8, row: u8) -> Rational {
        assert!(col < self.ndim && row < self.ndim, "matrix index out of bounds");
        self.elems[col as usize * self.ndim as usize + row as usize]
    }
    /// Returns a mutable reference to an element of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `col` or `row` is out of bounds.
    pub fn get_mut(&mut self, col: u8, row: u8) -> &mut Rational {
        assert!(col < self.ndim && row < self.ndim, "matrix index out of bounds");
        &mut self.elems[col as usize * self.ndim as usize + row as usize]
    }
    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> QMatrix {
        Self::from_fn(self.ndim, |col, row| self.get(row, col))
    }

    /// Returns the inverse of the matrix, or `None` if it is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<QMatrix> {
        let n = self.ndim;
        // Gauss-Jordan elimination on [self | I]. Exact pivots, so no
        // epsilon is involved.
        let mut lhs = self.clone();
        let mut rhs = QMatrix::ident(n);
        for i in 0..n {
            let pivot_row = (i..n).find(|&r| !lhs.get(i, r).is_zero())?;
            if pivot_row != i {
                for c in 0..n {
                    lhs.swap_rows(c, i, pivot_row);
                    rhs.swap_rows(c, i, pivot_row);
                }
            }
            let pivot = lhs.get(i, i);
            for c in 0..n {
                *lhs.get_mut(c, i) = lhs.get(c, i) / pivot;
                *rhs.get_mut(c, i) = rhs.get(c, i) / pivot;
            }
            for r in 0..n {
                if r != i && !lhs.get(i, r).is_zero() {
                    let factor = lhs.get(i, r);
                    for c in 0..n {
                        *lhs.get_mut(c, r) = lhs.get(c, r) - factor * lhs.get(c, i);
                        *rhs.get_mut(c, r) = rhs.get(c, r) - factor * rhs.get(c, i);
                    }
                }
            }
        }
        Some(rhs)
    }

    fn swap_rows(&mut self, col: u8, r1: u8, r2: u8) {
        let tmp = self.get(col, r1);
        *self.get_mut(col, r1) = self.get(col, r2);
        *self.get_mut(col, r2) = tmp;
    }

    /// Transforms a vector by the matrix. Components of `v` beyond the
    /// matrix dimension are passed through unchanged.
    pub fn transform(&self, v: &QVector) -> QVector {
        let ndim = std::cmp::max(self.ndim, v.ndim());
        (0..ndim)
            .map(|row| {
                if row < self.ndim {
                    (0..self.ndim)
                        .map(|col| self.get(col, row) * v.get(col))
                        .sum()
                } else {
                    v.get(row)
                }
            })
            .collect()
    }
}

impl Mul<&QMatrix> for &QMatrix {
    type Output = QMatrix;
    fn mul(self, rhs: &QMatrix) -> QMatrix {
        assert_eq!(self.ndim, rhs.ndim, "matrix dimension mismatch");
        QMatrix::from_fn(self.ndim, |col, row| {
            (0..self.ndim)
                .map(|k| self.get(k, row) * rhs.get(col, k))
                .sum()
        })
    }
}
impl Mul<&QVector> for &QMatrix {
    type Output = QVector;
    fn mul(self, rhs: &QVector) -> QVector {
        self.transform(rhs)
    }
}

/// Returns the dimension of the linear span of `vectors`, by row reduction.
pub fn rank_of_vectors(vectors: &[QVector]) -> usize {
    let ndim = vectors.iter().map(|v| v.ndim()).max().unwrap_or(0);
    let mut rows: Vec<QVector> = vectors.iter().map(|v| (0..ndim).map(|i| v.get(i)).collect()).collect();
    let mut rank = 0;
    for col in 0..ndim {
        let Some(pivot) = (rank..rows.len()).find(|&r| !rows[r].get(col).is_zero()) else {
            continue;
        };
        rows.swap(rank, pivot);
        let pivot_row = rows[rank].clone();
        let pivot_val = pivot_row.get(col);
        for row in rows.iter_mut().skip(rank + 1) {
            let factor = row.get(col) / pivot_val;
            if !factor.is_zero() {
                *row = &*row - &pivot_row.scale(factor);
            }
        }
        rank += 1;
    }
    rank
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qvector;

    #[test]
    fn test_inverse() {
        let m = QMatrix::from_cols(&[qvector![2, 1], qvector![1, 1]]);
        let inv = m.inverse().unwrap();
        assert_eq!(&m * &inv, QMatrix::ident(2));
        assert_eq!(&inv * &m, QMatrix::ident(2));

        let singular = QMatrix::from_cols(&[qvector![1, 2], qvector![2, 4]]);
        assert!(singular.inverse().is_none());
    }

    #[test]
    fn test_reflection_is_involution() {
        let r = QMatrix::reflection(&qvector![1, -1, 0]);
        assert_eq!(&r * &r, QMatrix::ident(3));
        assert_eq!(r.transform(&qvector![1, 0, 0]), qvector![0, 1, 0]);
    }

    #[test]
    fn test_rank() {
        assert_eq!(rank_of_vectors(&[qvector![1, 0], qvector![0, 1]]), 2);
        assert_eq!(rank_of_vectors(&[qvector![1, 2], qvector![2, 4]]), 1);
        assert_eq!(rank_of_vectors(&[]), 0);
    }
}
