use crate::algebra::{AsFloatT, DimensionError, FloatT, Matrix};

/// Projection of a square matrix onto the symmetric matrices,
/// i.e. `(M + Mᵀ)/2`.
///
/// Backends that consume a symmetric matrix usually read only one
/// triangle of it.   Projecting first means the entries they ignore
/// still contribute to the operator they see.
pub fn symmetric_projection<T>(M: &Matrix<T>) -> Result<Matrix<T>, DimensionError>
where
    T: FloatT,
{
    if !M.is_square() {
        return Err(DimensionError::NotSquare(M.m, M.n));
    }
    let half: T = (0.5).as_T();
    let mut out = Matrix::zeros(M.size());
    for c in 0..M.n {
        for r in 0..M.m {
            out[(r, c)] = half * (M[(r, c)] + M[(c, r)]);
        }
    }
    Ok(out)
}
