//! Adapters for the solvers reachable through [`good_lp`](https://docs.rs/good_lp).
//!
//! All of them share the same model assembly: one variable per column
//! carrying its bounds, a minimised objective `Σ cᵢxᵢ`, one `<=` row per
//! row of `G` and one `==` row per row of `A`.   Only the final call into
//! the backend differs.

use super::LpSolver;
use crate::solver::{LinearProgram, Solution, SolverError, SolverSettings};

/// Adapter for [microlp](https://docs.rs/microlp), a pure Rust simplex solver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MicroLpSolver;

impl LpSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "microlp")
    }

    fn solve(
        &self,
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "microlp")] {
                imp::solve_microlp(problem, settings)
            } else {
                let _ = (problem, settings);
                Err(super::not_compiled(self.name()))
            }
        }
    }
}

/// Adapter for the [HiGHS](https://highs.dev) solver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HighsSolver;

impl LpSolver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "highs")
    }

    fn solve(
        &self,
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "highs")] {
                imp::solve_highs(problem, settings)
            } else {
                let _ = (problem, settings);
                Err(super::not_compiled(self.name()))
            }
        }
    }
}

/// Adapter for the COIN-OR [Cbc](https://github.com/coin-or/Cbc) solver.
///
/// Backend options are forwarded to Cbc as string parameters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CbcSolver;

impl LpSolver for CbcSolver {
    fn name(&self) -> &'static str {
        "cbc"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "cbc")
    }

    fn solve(
        &self,
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "cbc")] {
                imp::solve_cbc(problem, settings)
            } else {
                let _ = (problem, settings);
                Err(super::not_compiled(self.name()))
            }
        }
    }
}

/// Adapter for the [lp_solve](https://lpsolve.sourceforge.net) solver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LpSolveSolver;

impl LpSolver for LpSolveSolver {
    fn name(&self) -> &'static str {
        "lp_solve"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "lpsolve")
    }

    fn solve(
        &self,
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "lpsolve")] {
                imp::solve_lp_solve(problem, settings)
            } else {
                let _ = (problem, settings);
                Err(super::not_compiled(self.name()))
            }
        }
    }
}

#[cfg(any(
    feature = "microlp",
    feature = "highs",
    feature = "cbc",
    feature = "lpsolve"
))]
mod imp {
    #![allow(dead_code)]
    #![allow(non_snake_case)]

    use crate::solver::{LinearProgram, SolveStatus, Solution, SolverError, SolverSettings};
    use good_lp::solvers::SolutionStatus;
    use good_lp::{
        constraint, variable, Constraint, Expression, ProblemVariables, ResolutionError,
        Solution as _, SolverModel, Variable,
    };
    use itertools::izip;
    use std::time::Instant;
    use tracing::{debug, warn};

    // a problem assembled in good_lp form, but not yet bound to a backend
    pub(super) struct GoodLpProblem {
        pub vars: ProblemVariables,
        pub objective: Expression,
        pub x: Vec<Variable>,
        pub constraints: Vec<Constraint>,
    }

    fn linear_expression(x: &[Variable], coefs: impl Iterator<Item = f64>) -> Expression {
        izip!(x, coefs)
            .filter(|(_, c)| *c != 0.)
            .map(|(&v, c)| c * v)
            .sum()
    }

    pub(super) fn assemble(problem: &LinearProgram) -> GoodLpProblem {
        let mut vars = ProblemVariables::new();
        let lb = problem.lower_bounds();
        let ub = problem.upper_bounds();

        let x: Vec<Variable> = izip!(&lb, &ub)
            .map(|(&lb, &ub)| {
                let mut v = variable();
                if lb.is_finite() {
                    v = v.min(lb);
                }
                if ub.is_finite() {
                    v = v.max(ub);
                }
                vars.add(v)
            })
            .collect();

        let objective = linear_expression(&x, problem.c.iter().copied());

        let mut constraints =
            Vec::with_capacity(problem.num_inequalities() + problem.num_equalities());
        if let (Some(G), Some(h)) = (&problem.G, &problem.h) {
            for (i, &hi) in h.iter().enumerate() {
                let lhs = linear_expression(&x, G.row(i));
                constraints.push(constraint!(lhs <= hi));
            }
        }
        if let (Some(A), Some(b)) = (&problem.A, &problem.b) {
            for (i, &bi) in b.iter().enumerate() {
                let lhs = linear_expression(&x, A.row(i));
                constraints.push(constraint!(lhs == bi));
            }
        }

        GoodLpProblem {
            vars,
            objective,
            x,
            constraints,
        }
    }

    // attach constraints, solve and normalize the outcome
    pub(super) fn finish<M>(
        name: &'static str,
        problem: &LinearProgram,
        model: M,
        x: &[Variable],
        constraints: Vec<Constraint>,
    ) -> Solution
    where
        M: SolverModel<Error = ResolutionError>,
    {
        let model = constraints.into_iter().fold(model, |m, c| m.with(c));

        let start = Instant::now();
        let result = model.solve();
        let solve_time = start.elapsed().as_secs_f64();

        // a backend stopped early by a limit still hands back its
        // incumbent point, which is not reported as a solution
        let solution = match result {
            Ok(sol) => match map_status(sol.status()) {
                SolveStatus::Optimal => {
                    let values: Vec<f64> = x.iter().map(|&v| sol.value(v)).collect();
                    let obj_val = problem.objective(&values);
                    Solution::optimal(name, values, obj_val)
                }
                status => Solution::failed(name, status),
            },
            Err(e) => Solution::failed(name, map_error(name, e)),
        };
        debug!(solver = name, status = %solution.status, "backend finished");

        solution.with_solve_time(solve_time)
    }

    pub(super) fn map_status(status: SolutionStatus) -> SolveStatus {
        match status {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            SolutionStatus::TimeLimit => SolveStatus::MaxTime,
            SolutionStatus::GapLimit => SolveStatus::Inaccurate,
            #[allow(unreachable_patterns)]
            _ => SolveStatus::Unknown,
        }
    }

    // backends without a dedicated variant report hitting the time
    // limit through a message
    fn is_time_limit(message: &str) -> bool {
        let message: String = message
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        message.contains("timelimit")
    }

    pub(super) fn map_error(name: &'static str, e: ResolutionError) -> SolveStatus {
        match e {
            ResolutionError::Infeasible => SolveStatus::Infeasible,
            ResolutionError::Unbounded => SolveStatus::Unbounded,
            ResolutionError::Other(msg) if is_time_limit(msg) => SolveStatus::MaxTime,
            ResolutionError::Str(ref msg) if is_time_limit(msg) => SolveStatus::MaxTime,
            other => {
                warn!(solver = name, error = %other, "backend reported a failure");
                SolveStatus::NumericalError
            }
        }
    }

    // a variable with lb > ub makes the problem infeasible before any
    // backend sees it
    pub(super) fn crossed_bounds(name: &'static str, problem: &LinearProgram) -> Option<Solution> {
        let crossed = izip!(problem.lower_bounds(), problem.upper_bounds()).any(|(lb, ub)| lb > ub);
        if crossed {
            debug!(solver = name, "lower bound above upper bound, problem is infeasible");
            return Some(Solution::failed(name, SolveStatus::Infeasible));
        }
        None
    }

    fn ignore_sym_proj(name: &'static str, settings: &SolverSettings) {
        if settings.sym_proj {
            debug!(solver = name, "no symmetric input to project, sym_proj ignored");
        }
    }

    #[cfg(feature = "microlp")]
    pub(super) fn solve_microlp(
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        use good_lp::solvers::microlp::microlp;
        use good_lp::solvers::WithTimeLimit;
        const NAME: &str = "microlp";

        super::super::reject_backend_options(NAME, settings)?;
        ignore_sym_proj(NAME, settings);
        if let Some(solution) = crossed_bounds(NAME, problem) {
            return Ok(solution);
        }

        let GoodLpProblem {
            vars,
            objective,
            x,
            constraints,
        } = assemble(problem);
        let mut model = vars.minimise(objective).using(microlp);
        if settings.time_limit.is_finite() {
            model = model.with_time_limit(settings.time_limit);
        }
        Ok(finish(NAME, problem, model, &x, constraints))
    }

    #[cfg(feature = "highs")]
    pub(super) fn solve_highs(
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        use good_lp::solvers::highs::highs;
        const NAME: &str = "highs";

        super::super::reject_backend_options(NAME, settings)?;
        ignore_sym_proj(NAME, settings);
        if let Some(solution) = crossed_bounds(NAME, problem) {
            return Ok(solution);
        }

        let GoodLpProblem {
            vars,
            objective,
            x,
            constraints,
        } = assemble(problem);
        let mut model = vars.minimise(objective).using(highs).set_verbose(settings.verbose);
        if settings.time_limit.is_finite() {
            model = model.set_time_limit(settings.time_limit);
        }
        Ok(finish(NAME, problem, model, &x, constraints))
    }

    #[cfg(feature = "cbc")]
    pub(super) fn solve_cbc(
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        use good_lp::solvers::coin_cbc::coin_cbc;
        const NAME: &str = "cbc";

        ignore_sym_proj(NAME, settings);
        if let Some(solution) = crossed_bounds(NAME, problem) {
            return Ok(solution);
        }

        let GoodLpProblem {
            vars,
            objective,
            x,
            constraints,
        } = assemble(problem);
        let mut model = vars.minimise(objective).using(coin_cbc);
        model.set_parameter("log", if settings.verbose { "1" } else { "0" });
        if settings.time_limit.is_finite() {
            model.set_parameter("seconds", &settings.time_limit.to_string());
        }
        for (key, value) in &settings.backend_options {
            model.set_parameter(key, &value.to_string());
        }
        Ok(finish(NAME, problem, model, &x, constraints))
    }

    #[cfg(feature = "lpsolve")]
    pub(super) fn solve_lp_solve(
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError> {
        use good_lp::solvers::lpsolve::lp_solve;
        const NAME: &str = "lp_solve";

        super::super::reject_backend_options(NAME, settings)?;
        ignore_sym_proj(NAME, settings);
        if let Some(solution) = crossed_bounds(NAME, problem) {
            return Ok(solution);
        }

        let GoodLpProblem {
            vars,
            objective,
            x,
            constraints,
        } = assemble(problem);
        let model = vars.minimise(objective).using(lp_solve);
        Ok(finish(NAME, problem, model, &x, constraints))
    }
}
