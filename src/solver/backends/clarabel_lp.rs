#![allow(non_snake_case)]

use super::LpSolver;
use crate::solver::{LinearProgram, Solution, SolverError, SolverSettings};

/// Adapter for the [Clarabel](https://github.com/oxfordcontrol/Clarabel.rs)
/// conic interior point solver.
///
/// The LP is posed as a conic program with a zero quadratic cost.
/// Equalities go to a zero cone, and inequalities together with every
/// finite variable bound go to a nonnegative cone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClarabelSolver;

impl LpSolver for ClarabelSolver {
    fn name(&self) -> &'static str {
        "clarabel"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "clarabel")
    }

    fn solve(
        &self,
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "clarabel")] {
                imp::solve(problem, settings)
            } else {
                let _ = (problem, settings);
                Err(super::not_compiled(self.name()))
            }
        }
    }
}

#[cfg(feature = "clarabel")]
mod imp {
    use crate::algebra::*;
    use crate::solver::{
        LinearProgram, OptionValue, SolveStatus, Solution, SolverError, SolverSettings,
    };
    use clarabel::algebra::CscMatrix;
    use clarabel::solver::{
        DefaultSettings, DefaultSettingsBuilder, DefaultSolver, IPSolver, NonnegativeConeT,
        SolverStatus, ZeroConeT,
    };
    use tracing::debug;

    const NAME: &str = "clarabel";

    // conic form data  minimize ½xᵀPx + qᵀx  s.t.  Ax + s = b, s ∈ K
    pub(super) struct ConicData {
        pub P: CscMatrix<f64>,
        pub A: CscMatrix<f64>,
        pub b: Vec<f64>,
        // rows of A in the zero and nonnegative cones, in that order
        pub n_zero: usize,
        pub n_nonneg: usize,
    }

    impl ConicData {
        pub fn new(problem: &LinearProgram, sym_proj: bool) -> Result<Self, SolverError> {
            let n = problem.num_vars();

            let mut A = Matrix::zeros((0, n));
            let mut b = Vec::new();

            // equalities first, in the zero cone
            if let (Some(Aeq), Some(beq)) = (&problem.A, &problem.b) {
                A = A.vcat(Aeq)?;
                b.extend_from_slice(beq);
            }
            let n_zero = A.nrows();

            if let (Some(G), Some(h)) = (&problem.G, &problem.h) {
                A = A.vcat(G)?;
                b.extend_from_slice(h);
            }

            // finite bounds become rows of ±I
            let (Ibounds, bbounds) = bound_rows(problem);
            A = A.vcat(&Ibounds)?;
            b.extend_from_slice(&bbounds);
            let n_nonneg = A.nrows() - n_zero;

            Ok(Self {
                P: quadratic_cost(n, sym_proj)?,
                A: dense_to_csc(&A),
                b,
                n_zero,
                n_nonneg,
            })
        }
    }

    // the LP has no quadratic cost, but Clarabel still expects an
    // upper triangular P.   Under sym_proj it is symmetrized first.
    fn quadratic_cost(n: usize, sym_proj: bool) -> Result<CscMatrix<f64>, SolverError> {
        let mut P = Matrix::<f64>::zeros((n, n));
        if sym_proj {
            P = symmetric_projection(&P)?;
        }
        Ok(dense_to_csc(&P.triu()))
    }

    fn bound_rows(problem: &LinearProgram) -> (Matrix<f64>, Vec<f64>) {
        let n = problem.num_vars();
        let mut rows = Vec::new();
        let mut rhs = Vec::new();

        // -x_i <= -lb_i
        for (i, &lb) in problem.lower_bounds().iter().enumerate() {
            if lb.is_finite() {
                let mut row = vec![0.; n];
                row[i] = -1.;
                rows.push(row);
                rhs.push(-lb);
            }
        }
        //  x_i <= ub_i
        for (i, &ub) in problem.upper_bounds().iter().enumerate() {
            if ub.is_finite() {
                let mut row = vec![0.; n];
                row[i] = 1.;
                rows.push(row);
                rhs.push(ub);
            }
        }

        let mut M = Matrix::zeros((rows.len(), n));
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                M[(r, c)] = v;
            }
        }
        (M, rhs)
    }

    pub(super) fn dense_to_csc(M: &Matrix<f64>) -> CscMatrix<f64> {
        let mut colptr = Vec::with_capacity(M.ncols() + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();

        colptr.push(0);
        for col in 0..M.ncols() {
            for (row, &v) in M.col_slice(col).iter().enumerate() {
                if v != 0. {
                    rowval.push(row);
                    nzval.push(v);
                }
            }
            colptr.push(rowval.len());
        }
        CscMatrix::new(M.nrows(), M.ncols(), colptr, rowval, nzval)
    }

    fn unsupported(option: &str) -> SolverError {
        SolverError::UnsupportedOption {
            solver: NAME,
            option: option.to_string(),
        }
    }

    fn as_string(v: &OptionValue) -> Option<String> {
        v.as_str().map(String::from)
    }

    // forward a backend option to the settings field of the same name
    macro_rules! apply_backend_option {
        ($builder:expr, $key:expr, $value:expr, { $($field:ident => $conv:expr),* $(,)? }) => {
            match $key {
                $(k if k == stringify!($field) => {
                    let v = ($conv)($value).ok_or_else(|| unsupported($key))?;
                    $builder.$field(v);
                })*
                _ => return Err(unsupported($key)),
            }
        };
    }

    fn build_settings(settings: &SolverSettings) -> Result<DefaultSettings<f64>, SolverError> {
        let mut builder = DefaultSettingsBuilder::<f64>::default();
        builder
            .verbose(settings.verbose)
            .time_limit(settings.time_limit);

        if let Some(max_iter) = settings.max_iter {
            builder.max_iter(max_iter);
        }
        if let Some(tol) = settings.tol_gap_abs {
            builder.tol_gap_abs(tol);
        }
        if let Some(tol) = settings.tol_gap_rel {
            builder.tol_gap_rel(tol);
        }
        if let Some(tol) = settings.tol_feas {
            builder.tol_feas(tol);
        }

        for (key, value) in &settings.backend_options {
            apply_backend_option!(builder, key.as_str(), value, {
                verbose => OptionValue::as_bool,
                max_iter => OptionValue::as_u32,
                time_limit => OptionValue::as_f64,
                max_step_fraction => OptionValue::as_f64,
                tol_gap_abs => OptionValue::as_f64,
                tol_gap_rel => OptionValue::as_f64,
                tol_feas => OptionValue::as_f64,
                tol_infeas_abs => OptionValue::as_f64,
                tol_infeas_rel => OptionValue::as_f64,
                tol_ktratio => OptionValue::as_f64,
                equilibrate_enable => OptionValue::as_bool,
                equilibrate_max_iter => OptionValue::as_u32,
                equilibrate_min_scaling => OptionValue::as_f64,
                equilibrate_max_scaling => OptionValue::as_f64,
                static_regularization_enable => OptionValue::as_bool,
                static_regularization_constant => OptionValue::as_f64,
                dynamic_regularization_enable => OptionValue::as_bool,
                iterative_refinement_enable => OptionValue::as_bool,
                iterative_refinement_max_iter => OptionValue::as_u32,
                presolve_enable => OptionValue::as_bool,
                direct_solve_method => as_string,
            });
        }

        builder.build().map_err(|e| SolverError::Backend {
            solver: NAME,
            message: e.to_string(),
        })
    }

    // Solver construction is infallible in some clarabel releases and
    // returns a Result in others.   Both are accepted here.
    pub(super) trait IntoSetupResult {
        fn into_setup_result(self) -> Result<DefaultSolver<f64>, SolverError>;
    }

    impl IntoSetupResult for DefaultSolver<f64> {
        fn into_setup_result(self) -> Result<DefaultSolver<f64>, SolverError> {
            Ok(self)
        }
    }

    impl<E: std::fmt::Display> IntoSetupResult for Result<DefaultSolver<f64>, E> {
        fn into_setup_result(self) -> Result<DefaultSolver<f64>, SolverError> {
            self.map_err(|e| SolverError::Backend {
                solver: NAME,
                message: e.to_string(),
            })
        }
    }

    pub(super) fn map_status(status: SolverStatus) -> SolveStatus {
        match status {
            SolverStatus::Unsolved => SolveStatus::Unsolved,
            SolverStatus::Solved => SolveStatus::Optimal,
            SolverStatus::AlmostSolved => SolveStatus::Inaccurate,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                SolveStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                SolveStatus::Unbounded
            }
            SolverStatus::MaxIterations => SolveStatus::MaxIterations,
            SolverStatus::MaxTime => SolveStatus::MaxTime,
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
                SolveStatus::NumericalError
            }
            #[allow(unreachable_patterns)]
            _ => SolveStatus::Unknown,
        }
    }

    pub(super) fn solve(
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        let data = ConicData::new(problem, settings.sym_proj)?;
        let clarabel_settings = build_settings(settings)?;

        // empty cones are left out
        let mut cones = Vec::with_capacity(2);
        if data.n_zero > 0 {
            cones.push(ZeroConeT(data.n_zero));
        }
        if data.n_nonneg > 0 {
            cones.push(NonnegativeConeT(data.n_nonneg));
        }

        let mut solver = DefaultSolver::new(
            &data.P,
            &problem.c,
            &data.A,
            &data.b,
            &cones,
            clarabel_settings,
        )
        .into_setup_result()?;

        solver.solve();

        let result = &solver.solution;
        let status = map_status(result.status);
        debug!(
            solver = NAME,
            clarabel_status = ?result.status,
            %status,
            iterations = result.iterations,
            "backend finished"
        );

        let solution = match status {
            SolveStatus::Optimal => {
                let x = result.x.clone();
                let obj_val = problem.objective(&x);
                Solution::optimal(NAME, x, obj_val)
            }
            _ => Solution::failed(NAME, status),
        };

        Ok(solution
            .with_iterations(result.iterations)
            .with_solve_time(result.solve_time))
    }
}

#[cfg(all(test, feature = "clarabel"))]
mod tests {
    #![allow(non_snake_case)]
    use super::imp::*;
    use crate::algebra::Matrix;
    use crate::solver::{LinearProgram, SolveStatus};
    use clarabel::solver::SolverStatus;

    #[test]
    fn test_dense_to_csc() {
        let M = Matrix::from(&[[1., 0., 5.], [2., 0., 6.], [0., 4., 7.]]);
        let A = dense_to_csc(&M);
        assert_eq!((A.m, A.n), (3, 3));
        assert_eq!(A.colptr, vec![0, 2, 3, 6]);
        assert_eq!(A.rowval, vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(A.nzval, vec![1., 2., 4., 5., 6., 7.]);
        assert!(A.check_format().is_ok());
    }

    #[test]
    fn test_conic_stacking() {
        let problem = LinearProgram::new(&[1., 1.])
            .with_equalities(vec![1., 1.], &[1.])
            .with_inequalities(&[[1., -1.]], &[2.])
            .with_bounds(&[0., f64::NEG_INFINITY], &[f64::INFINITY, 3.]);

        let data = ConicData::new(&problem, true).unwrap();

        // one equality, one inequality and two finite bounds
        assert_eq!((data.A.m, data.A.n), (4, 2));
        assert_eq!(data.b, vec![1., 2., 0., 3.]);
        assert_eq!((data.n_zero, data.n_nonneg), (1, 3));
        assert_eq!((data.P.m, data.P.n), (2, 2));
        assert_eq!(data.P.nnz(), 0);
    }

    #[test]
    fn test_conic_stacking_unconstrained() {
        let problem = LinearProgram::new(&[1., 2., 3.]);
        let data = ConicData::new(&problem, false).unwrap();
        assert_eq!((data.A.m, data.A.n), (0, 3));
        assert!(data.b.is_empty());
        assert_eq!((data.n_zero, data.n_nonneg), (0, 0));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(map_status(SolverStatus::Solved), SolveStatus::Optimal);
        assert_eq!(
            map_status(SolverStatus::AlmostPrimalInfeasible),
            SolveStatus::Infeasible
        );
        assert_eq!(
            map_status(SolverStatus::DualInfeasible),
            SolveStatus::Unbounded
        );
        assert_eq!(
            map_status(SolverStatus::InsufficientProgress),
            SolveStatus::NumericalError
        );
    }
}
