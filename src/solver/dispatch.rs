use crate::solver::backends::{Backend, LpSolver};
use crate::solver::{LinearProgram, Solution, SolverError, SolverSettings};
use tracing::debug;

/// Solve a linear program with the named backend.
///
/// Returns `Ok(Some(x))` with the optimal point, or `Ok(None)` when the
/// backend finds no optimal point (infeasible or unbounded problem,
/// iteration or time limit, numerical failure).   Errors are reserved for
/// calls that never reach a solve: an unknown `solver`, invalid
/// settings or problem data of incompatible dimensions.
///
/// ```
/// use lpsolvers::{solve_lp, LinearProgram, SolverSettings, available_solvers};
///
/// let problem = LinearProgram::new(&[1., 2., 3.])
///     .with_inequalities(
///         &[[1., 2., -1.], [2., 0., 1.], [1., 2., 1.], [-1., -1., -1.]],
///         &[4., 1., 3., 2.],
///     );
///
/// for solver in available_solvers() {
///     let x = solve_lp(&problem, solver, &SolverSettings::default()).unwrap();
///     assert!(x.is_some());
/// }
///
/// let err = solve_lp(&problem, "ideal", &SolverSettings::default()).unwrap_err();
/// assert!(err.is_solver_not_found());
/// ```
pub fn solve_lp(
    problem: &LinearProgram,
    solver: &str,
    settings: &SolverSettings,
) -> Result<Option<Vec<f64>>, SolverError> {
    Ok(solve_problem(problem, solver, settings)?.into_x())
}

/// As [`solve_lp`], but returning the full normalized [`Solution`]
/// including the backend status.
pub fn solve_problem(
    problem: &LinearProgram,
    solver: &str,
    settings: &SolverSettings,
) -> Result<Solution, SolverError> {
    validate(problem, settings)?;
    let backend = Backend::from_name(solver)?;
    solve_with(backend, problem, settings)
}

/// Solve with the first backend in the registry and default settings.
pub fn solve_lp_default(problem: &LinearProgram) -> Result<Option<Vec<f64>>, SolverError> {
    let settings = SolverSettings::default();
    validate(problem, &settings)?;
    let backend = Backend::preferred()?;
    Ok(solve_with(backend, problem, &settings)?.into_x())
}

// bad input is reported before any registry lookup
fn validate(problem: &LinearProgram, settings: &SolverSettings) -> Result<(), SolverError> {
    settings.validate()?;
    problem.check_dimensions()?;
    Ok(())
}

fn solve_with(
    backend: Backend,
    problem: &LinearProgram,
    settings: &SolverSettings,
) -> Result<Solution, SolverError> {
    debug!(
        solver = backend.name(),
        n = problem.num_vars(),
        m_ineq = problem.num_inequalities(),
        m_eq = problem.num_equalities(),
        sym_proj = settings.sym_proj,
        "dispatching linear program"
    );

    let solution = backend.solve(problem, settings)?;

    // adapters must hand back a point of the right size
    debug_assert!(solution
        .x
        .as_ref()
        .map_or(true, |x| x.len() == problem.num_vars()));

    Ok(solution)
}
