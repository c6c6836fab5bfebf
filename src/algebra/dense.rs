#![allow(non_snake_case)]

use crate::algebra::{DimensionError, FloatT, MatrixMath};
use std::iter::zip;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Dense matrix in column major format
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// G = [1.  2. -1.]
///     [2.  0.  1.]
/// ```
///
/// ```
/// use lpsolvers::algebra::Matrix;
///
/// let G = Matrix::from(&[
///     [1., 2., -1.],
///     [2., 0., 1.],
/// ]);
/// assert_eq!(G.size(), (2, 3));
/// assert_eq!(G[(1, 0)], 2.);
///
/// // a single row given as a vector is promoted to a 1 x n matrix
/// let g = Matrix::from(vec![1., 2., -1.]);
/// assert_eq!(g.size(), (1, 3));
///
/// // vectors of rows may be ragged
/// assert!(Matrix::<f64>::try_from(vec![vec![1., 2.], vec![3.]]).is_err());
/// ```
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    /// An `m x n` matrix of zeros
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    /// Construct from column major data.
    ///
    /// # Panics
    /// Panics if `src` does not have exactly `m*n` entries.
    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    /// Construct from a collection of rows, failing if the rows
    /// have differing lengths.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, DimensionError>
    where
        R: AsRef<[T]>,
    {
        let m = rows.len();
        let n = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != n) {
            return Err(DimensionError::RaggedRows);
        }
        let mut mat = Matrix::zeros((m, n));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.as_ref().iter().enumerate() {
                mat[(i, j)] = v;
            }
        }
        Ok(mat)
    }

    /// A single row `1 x n` matrix
    pub fn row_vector(row: &[T]) -> Self {
        Self::new_from_slice((1, row.len()), row)
    }

    pub fn nrows(&self) -> usize {
        self.m
    }

    pub fn ncols(&self) -> usize {
        self.n
    }

    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    /// Checks that `data` holds exactly `m*n` entries.   Matrices built
    /// from their public fields or read from a file may not.
    pub fn check_format(&self) -> Result<(), DimensionError> {
        if self.data.len() != self.m * self.n {
            return Err(DimensionError::IncompatibleDimension {
                what: "matrix data length",
                expected: self.m * self.n,
                found: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// iterator over the entries of row `row`
    pub fn row(&self, row: usize) -> impl Iterator<Item = T> + '_ {
        assert!(row < self.m);
        (0..self.n).map(move |col| self[(row, col)])
    }

    /// upper triangular entries only, with the strict lower triangle zeroed
    pub fn triu(&self) -> Self {
        let mut out = self.clone();
        for c in 0..self.n {
            for r in (c + 1)..self.m {
                out[(r, c)] = T::zero();
            }
        }
        out
    }

    /// Stack `self` on top of `other`.  Both matrices must have
    /// the same number of columns.
    pub fn vcat(&self, other: &Self) -> Result<Self, DimensionError> {
        if self.n != other.n {
            return Err(DimensionError::IncompatibleDimension {
                what: "vcat columns",
                expected: self.n,
                found: other.n,
            });
        }
        let mut out = Matrix::zeros((self.m + other.m, self.n));
        for col in 0..self.n {
            for row in 0..self.m {
                out[(row, col)] = self[(row, col)];
            }
            for row in 0..other.m {
                out[(self.m + row, col)] = other[(row, col)];
            }
        }
        Ok(out)
    }

    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }
}

impl<T> MatrixMath for Matrix<T>
where
    T: FloatT,
{
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(self.n, x.len());
        assert_eq!(self.m, y.len());

        for yi in y.iter_mut() {
            *yi *= b;
        }
        for (col, &xj) in x.iter().enumerate() {
            let ax = a * xj;
            for (yi, &mij) in zip(y.iter_mut(), self.col_slice(col)) {
                *yi += mij * ax;
            }
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

// ---------------------------------------------------------
// conversions from row-major user data.   Fixed size arrays
// of rows are always rectangular.   Vectors of rows may be
// ragged, so converting them is fallible.   One dimensional
// inputs are promoted to a single row matrix.
// ---------------------------------------------------------

fn from_array_rows<const N: usize>(rows: &[[f64; N]]) -> Matrix<f64> {
    let mut mat = Matrix::zeros((rows.len(), N));
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            mat[(i, j)] = v;
        }
    }
    mat
}

impl TryFrom<Vec<Vec<f64>>> for Matrix<f64> {
    type Error = DimensionError;
    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(&rows)
    }
}

impl TryFrom<&[Vec<f64>]> for Matrix<f64> {
    type Error = DimensionError;
    fn try_from(rows: &[Vec<f64>]) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl TryFrom<&Vec<Vec<f64>>> for Matrix<f64> {
    type Error = DimensionError;
    fn try_from(rows: &Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl<const N: usize, const M: usize> From<[[f64; N]; M]> for Matrix<f64> {
    fn from(rows: [[f64; N]; M]) -> Self {
        from_array_rows(&rows)
    }
}

impl<const N: usize, const M: usize> From<&[[f64; N]; M]> for Matrix<f64> {
    fn from(rows: &[[f64; N]; M]) -> Self {
        from_array_rows(rows)
    }
}

impl<const N: usize> From<&[[f64; N]]> for Matrix<f64> {
    fn from(rows: &[[f64; N]]) -> Self {
        from_array_rows(rows)
    }
}

impl From<Vec<f64>> for Matrix<f64> {
    fn from(row: Vec<f64>) -> Self {
        Matrix::row_vector(&row)
    }
}

impl From<&Vec<f64>> for Matrix<f64> {
    fn from(row: &Vec<f64>) -> Self {
        Matrix::row_vector(row)
    }
}

impl From<&[f64]> for Matrix<f64> {
    fn from(row: &[f64]) -> Self {
        Matrix::row_vector(row)
    }
}

impl<const N: usize> From<[f64; N]> for Matrix<f64> {
    fn from(row: [f64; N]) -> Self {
        Matrix::row_vector(&row)
    }
}

impl<const N: usize> From<&[f64; N]> for Matrix<f64> {
    fn from(row: &[f64; N]) -> Self {
        Matrix::row_vector(row)
    }
}

impl From<&Matrix<f64>> for Matrix<f64> {
    fn from(mat: &Matrix<f64>) -> Self {
        mat.clone()
    }
}
