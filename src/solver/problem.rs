#![allow(non_snake_case)]

use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear program in the canonical form accepted by every backend:
///
/// ```text
/// minimize    cᵀx
/// subject to  G x <= h
///             A x == b
///             lb <= x <= ub
/// ```
///
/// Only `c` is required.   Constraint matrices accept anything
/// convertible into a [`Matrix`], so a single inequality row can be
/// given as a plain vector and is promoted to a `1 x n` matrix.
/// A ragged list of rows is not rejected by the builder but reported
/// by [`check_dimensions`](Self::check_dimensions).
/// Infinite bound entries leave that side of the variable free.
///
/// ```
/// use lpsolvers::LinearProgram;
///
/// let problem = LinearProgram::new(&[1., 2., 3.])
///     .with_inequalities(vec![2., 0., 1.], &[1.])
///     .with_bounds(&[-1.; 3], &[1.; 3]);
///
/// assert_eq!(problem.num_inequalities(), 1);
/// assert!(problem.check_dimensions().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearProgram {
    /// cost vector
    pub c: Vec<f64>,
    /// linear inequality matrix
    pub G: Option<Matrix<f64>>,
    /// linear inequality vector
    pub h: Option<Vec<f64>>,
    /// linear equality matrix
    pub A: Option<Matrix<f64>>,
    /// linear equality vector
    pub b: Option<Vec<f64>>,
    /// variable lower bounds
    pub lb: Option<Vec<f64>>,
    /// variable upper bounds
    pub ub: Option<Vec<f64>>,
    // first conversion failure seen by the builder methods
    #[cfg_attr(feature = "serde", serde(skip))]
    shape_error: Option<DimensionError>,
}

impl LinearProgram {
    /// Unconstrained program with cost vector `c`
    pub fn new(c: &[f64]) -> Self {
        Self {
            c: c.to_vec(),
            G: None,
            h: None,
            A: None,
            b: None,
            lb: None,
            ub: None,
            shape_error: None,
        }
    }

    /// Set the inequality constraints `G x <= h`
    pub fn with_inequalities<M, E>(mut self, G: M, h: &[f64]) -> Self
    where
        M: TryInto<Matrix<f64>, Error = E>,
        E: Into<DimensionError>,
    {
        self.G = self.convert(G);
        self.h = Some(h.to_vec());
        self
    }

    /// Set the equality constraints `A x == b`
    pub fn with_equalities<M, E>(mut self, A: M, b: &[f64]) -> Self
    where
        M: TryInto<Matrix<f64>, Error = E>,
        E: Into<DimensionError>,
    {
        self.A = self.convert(A);
        self.b = Some(b.to_vec());
        self
    }

    fn convert<M, E>(&mut self, mat: M) -> Option<Matrix<f64>>
    where
        M: TryInto<Matrix<f64>, Error = E>,
        E: Into<DimensionError>,
    {
        match mat.try_into() {
            Ok(mat) => Some(mat),
            Err(e) => {
                self.shape_error.get_or_insert(e.into());
                None
            }
        }
    }

    /// Set the lower bounds `lb <= x`
    pub fn with_lower_bounds(mut self, lb: &[f64]) -> Self {
        self.lb = Some(lb.to_vec());
        self
    }

    /// Set the upper bounds `x <= ub`
    pub fn with_upper_bounds(mut self, ub: &[f64]) -> Self {
        self.ub = Some(ub.to_vec());
        self
    }

    /// Set both variable bounds `lb <= x <= ub`
    pub fn with_bounds(self, lb: &[f64], ub: &[f64]) -> Self {
        self.with_lower_bounds(lb).with_upper_bounds(ub)
    }

    /// number of decision variables
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// number of rows in `G`, or zero
    pub fn num_inequalities(&self) -> usize {
        self.G.as_ref().map_or(0, |G| G.nrows())
    }

    /// number of rows in `A`, or zero
    pub fn num_equalities(&self) -> usize {
        self.A.as_ref().map_or(0, |A| A.nrows())
    }

    /// Checks that all problem data have compatible dimensions and
    /// hold only finite values.   Bounds may be infinite but not NaN.
    ///
    /// This is called by the dispatcher before any backend is invoked,
    /// so adapters may assume the data is well formed.
    pub fn check_dimensions(&self) -> Result<(), DimensionError> {
        if let Some(e) = &self.shape_error {
            return Err(e.clone());
        }

        let n = self.num_vars();
        if n == 0 {
            return Err(DimensionError::EmptyCost);
        }

        check_pair(n, &self.G, &self.h, ("G columns", "h length"))?;
        check_pair(n, &self.A, &self.b, ("A columns", "b length"))?;

        for (what, bound) in [("lb length", &self.lb), ("ub length", &self.ub)] {
            if let Some(bound) = bound {
                check_length(what, n, bound.len())?;
            }
        }

        check_finite("c", Some(&self.c))?;
        check_finite("G", self.G.as_ref().map(|G| &G.data))?;
        check_finite("h", self.h.as_ref())?;
        check_finite("A", self.A.as_ref().map(|A| &A.data))?;
        check_finite("b", self.b.as_ref())?;
        for (what, bound) in [("lb", &self.lb), ("ub", &self.ub)] {
            if bound.iter().flatten().any(|v| v.is_nan()) {
                return Err(DimensionError::NonFinite { what });
            }
        }
        Ok(())
    }

    /// Lower bounds with missing values filled in as `-∞`
    pub fn lower_bounds(&self) -> Vec<f64> {
        self.lb
            .clone()
            .unwrap_or_else(|| vec![f64::NEG_INFINITY; self.num_vars()])
    }

    /// Upper bounds with missing values filled in as `+∞`
    pub fn upper_bounds(&self) -> Vec<f64> {
        self.ub
            .clone()
            .unwrap_or_else(|| vec![f64::INFINITY; self.num_vars()])
    }

    /// Objective value `cᵀx`
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.c.dot(x)
    }

    /// Largest entry of `G x - h`, or `-∞` if there are no inequalities
    pub fn max_inequality_residual(&self, x: &[f64]) -> f64 {
        match (&self.G, &self.h) {
            (Some(G), Some(h)) => {
                let mut r = h.clone();
                G.gemv(&mut r, x, 1., -1.);
                r.maximum()
            }
            _ => f64::NEG_INFINITY,
        }
    }

    /// Infinity norm of `A x - b`, or zero if there are no equalities
    pub fn max_equality_residual(&self, x: &[f64]) -> f64 {
        match (&self.A, &self.b) {
            (Some(A), Some(b)) => {
                let mut r = b.clone();
                A.gemv(&mut r, x, 1., -1.);
                r.norm_inf()
            }
            _ => 0.,
        }
    }

    /// Largest violation of the variable bounds, or zero if all hold
    pub fn max_bound_violation(&self, x: &[f64]) -> f64 {
        let lb = self.lower_bounds();
        let ub = self.upper_bounds();
        itertools::izip!(x, &lb, &ub).fold(0., |acc, (&x, &l, &u)| {
            f64::max(acc, f64::max(l - x, x - u))
        })
    }

    /// Checks that `x` satisfies every constraint to within `tol`
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.num_vars()
            && self.max_inequality_residual(x) <= tol
            && self.max_equality_residual(x) <= tol
            && self.max_bound_violation(x) <= tol
    }
}

fn check_pair(
    n: usize,
    M: &Option<Matrix<f64>>,
    v: &Option<Vec<f64>>,
    names: (&'static str, &'static str),
) -> Result<(), DimensionError> {
    match (M, v) {
        (None, None) => Ok(()),
        (Some(M), Some(v)) => {
            M.check_format()?;
            check_length(names.0, n, M.ncols())?;
            check_length(names.1, M.nrows(), v.len())
        }
        (Some(M), None) => {
            M.check_format()?;
            check_length(names.1, M.nrows(), 0)
        }
        (None, Some(v)) => check_length(names.1, 0, v.len()),
    }
}

fn check_length(what: &'static str, expected: usize, found: usize) -> Result<(), DimensionError> {
    if expected != found {
        return Err(DimensionError::IncompatibleDimension {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_finite(what: &'static str, v: Option<&Vec<f64>>) -> Result<(), DimensionError> {
    match v {
        Some(v) if !v.is_finite() => Err(DimensionError::NonFinite { what }),
        _ => Ok(()),
    }
}

#[test]
fn test_check_dimensions() {
    let G = [[1., 2., -1.], [2., 0., 1.]];
    let problem = LinearProgram::new(&[1., 2., 3.]).with_inequalities(&G, &[4., 1.]);
    assert!(problem.check_dimensions().is_ok());

    // h too short
    let bad = LinearProgram::new(&[1., 2., 3.]).with_inequalities(&G, &[4.]);
    assert_eq!(
        bad.check_dimensions(),
        Err(DimensionError::IncompatibleDimension {
            what: "h length",
            expected: 2,
            found: 1
        })
    );

    // G with the wrong number of columns
    let bad = LinearProgram::new(&[1., 2.]).with_inequalities(&G, &[4., 1.]);
    assert!(bad.check_dimensions().is_err());

    // A / b mismatch
    let bad = LinearProgram::new(&[1., 2., 3.]).with_equalities(vec![1., 1., 1.], &[1., 2.]);
    assert!(bad.check_dimensions().is_err());

    // bounds of the wrong length
    let bad = LinearProgram::new(&[1., 2., 3.]).with_lower_bounds(&[0., 0.]);
    assert!(bad.check_dimensions().is_err());

    // empty cost
    assert_eq!(
        LinearProgram::new(&[]).check_dimensions(),
        Err(DimensionError::EmptyCost)
    );
}

#[test]
fn test_residuals() {
    let problem = LinearProgram::new(&[1., 1.])
        .with_inequalities(&[[1., 0.], [0., 1.]], &[1., 2.])
        .with_equalities(vec![1., -1.], &[0.])
        .with_bounds(&[0., f64::NEG_INFINITY], &[f64::INFINITY, 1.5]);

    let x = [1.5, 1.5];
    assert_eq!(problem.objective(&x), 3.);
    assert_eq!(problem.max_inequality_residual(&x), 0.5);
    assert_eq!(problem.max_equality_residual(&x), 0.);
    assert_eq!(problem.max_bound_violation(&x), 0.);
    assert!(!problem.is_feasible(&x, 1e-9));
    assert!(problem.is_feasible(&[1., 1.], 1e-9));
    assert!(!problem.is_feasible(&[-1., -1.], 1e-9));

    let unconstrained = LinearProgram::new(&[1., 1.]);
    assert_eq!(
        unconstrained.max_inequality_residual(&x),
        f64::NEG_INFINITY
    );
    assert!(unconstrained.is_feasible(&x, 0.));
}

#[test]
fn test_check_shape_errors() {
    // ragged rows are held until the problem is checked
    let problem = LinearProgram::new(&[1., 2., 3.])
        .with_inequalities(vec![vec![1., 2., 3.], vec![1., 2.]], &[1., 1.]);
    assert_eq!(problem.check_dimensions(), Err(DimensionError::RaggedRows));
    assert!(problem.G.is_none());

    // data length disagreeing with the stated shape
    let mut problem = LinearProgram::new(&[1., 2., 3.]);
    problem.G = Some(Matrix {
        m: 2,
        n: 3,
        data: vec![1.; 3],
    });
    problem.h = Some(vec![1., 1.]);
    assert!(matches!(
        problem.check_dimensions(),
        Err(DimensionError::IncompatibleDimension {
            what: "matrix data length",
            ..
        })
    ));
}

#[test]
fn test_check_finite() {
    let G = [[1., 2., -1.], [2., 0., 1.]];
    let problem = LinearProgram::new(&[f64::NAN, 2., 3.]);
    assert_eq!(
        problem.check_dimensions(),
        Err(DimensionError::NonFinite { what: "c" })
    );

    let problem = LinearProgram::new(&[1., 2., 3.])
        .with_inequalities(&[[1., f64::INFINITY, 0.]], &[1.]);
    assert_eq!(
        problem.check_dimensions(),
        Err(DimensionError::NonFinite { what: "G" })
    );

    let problem = LinearProgram::new(&[1., 2., 3.]).with_inequalities(&G, &[1., f64::NAN]);
    assert_eq!(
        problem.check_dimensions(),
        Err(DimensionError::NonFinite { what: "h" })
    );

    let problem = LinearProgram::new(&[1., 2., 3.]).with_equalities(&[1., 1., 1.], &[f64::INFINITY]);
    assert_eq!(
        problem.check_dimensions(),
        Err(DimensionError::NonFinite { what: "b" })
    );

    // infinite bounds are fine, NaN bounds are not
    let problem = LinearProgram::new(&[1., 2., 3.])
        .with_bounds(&[f64::NEG_INFINITY; 3], &[f64::INFINITY; 3]);
    assert!(problem.check_dimensions().is_ok());

    let problem = LinearProgram::new(&[1., 2., 3.]).with_upper_bounds(&[1., f64::NAN, 1.]);
    assert_eq!(
        problem.check_dimensions(),
        Err(DimensionError::NonFinite { what: "ub" })
    );
}
