use super::FloatT;

// Residual checks and adapter data shuffling go through these
// traits, which are implemented generically for floats of type FloatT.

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T: FloatT;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Euclidean distance between two vectors
    fn dist(&self, y: &Self) -> Self::T;

    /// Infinity norm.  Returns NaN if any element is NaN.
    fn norm_inf(&self) -> Self::T;

    /// Maximum value in vector.  `-∞` when empty.
    fn maximum(&self) -> Self::T;

    /// Checks if all elements are finite, i.e. no Infs or NaNs
    fn is_finite(&self) -> bool;
}

/// Matrix operations for dense matrices of [`FloatT`](crate::algebra::FloatT)

pub trait MatrixMath {
    type T: FloatT;

    /// BLAS-like general matrix-vector multiply.  Produces `y = a*self*x + b*y`
    fn gemv(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T, b: Self::T);
}
