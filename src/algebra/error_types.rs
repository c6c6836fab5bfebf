use thiserror::Error;

/// Error type returned when problem data has inconsistent dimensions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// Rows supplied to a dense matrix constructor have differing lengths
    #[error("matrix rows have differing lengths")]
    RaggedRows,
    /// A square matrix was required
    #[error("matrix of size {0}x{1} is not square")]
    NotSquare(usize, usize),
    /// The cost vector has no entries
    #[error("cost vector is empty")]
    EmptyCost,
    /// Problem data contains a NaN, or an infinity outside the variable bounds
    #[error("{what} contains non-finite values")]
    NonFinite { what: &'static str },
    /// Some field does not match the dimension implied by the others
    #[error("incompatible dimension for {what}: expected {expected}, found {found}")]
    IncompatibleDimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

// conversions that cannot fail, e.g. a vector promoted to a single row
impl From<std::convert::Infallible> for DimensionError {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}
