#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalized status reported by a backend
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolveStatus {
    /// Backend has not run.
    #[default]
    Unsolved,
    /// Backend terminated with an optimal point.
    Optimal,
    /// Problem is primal infeasible.
    Infeasible,
    /// Problem is unbounded below (dual infeasible).
    Unbounded,
    /// Iteration limit reached before a solution was found.
    MaxIterations,
    /// Time limit reached before a solution was found.
    MaxTime,
    /// Backend terminated near a solution, but with reduced accuracy.
    Inaccurate,
    /// Backend terminated with a numerical error.
    NumericalError,
    /// Backend reported a status with no normalized equivalent.
    Unknown,
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(*self, SolveStatus::Optimal)
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(*self, SolveStatus::Infeasible | SolveStatus::Unbounded)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Normalized backend result
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// primal solution.  Present if and only if `status` is `Optimal`
    pub x: Option<Vec<f64>>,
    /// final status
    pub status: SolveStatus,
    /// objective value `cᵀx` at the returned point
    pub obj_val: Option<f64>,
    /// name of the backend that produced this solution
    pub solver: &'static str,
    /// number of iterations, for backends that report it
    pub iterations: Option<u32>,
    /// solve time in seconds, as measured by the backend or the adapter
    pub solve_time: f64,
}

impl Solution {
    /// A solution with no primal point
    pub fn failed(solver: &'static str, status: SolveStatus) -> Self {
        Self {
            x: None,
            status,
            obj_val: None,
            solver,
            iterations: None,
            solve_time: 0.,
        }
    }

    /// An optimal solution at `x` with objective value `obj_val`
    pub fn optimal(solver: &'static str, x: Vec<f64>, obj_val: f64) -> Self {
        Self {
            x: Some(x),
            status: SolveStatus::Optimal,
            obj_val: Some(obj_val),
            solver,
            iterations: None,
            solve_time: 0.,
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn with_solve_time(mut self, solve_time: f64) -> Self {
        self.solve_time = solve_time;
        self
    }

    /// Consume the solution, returning the primal point if optimal
    pub fn into_x(self) -> Option<Vec<f64>> {
        match self.status {
            SolveStatus::Optimal => self.x,
            _ => None,
        }
    }
}

#[test]
fn test_solution_status() {
    let sol = Solution::optimal("clarabel", vec![1., 2.], 3.).with_iterations(7);
    assert!(sol.status.is_optimal());
    assert_eq!(sol.iterations, Some(7));
    assert_eq!(sol.into_x(), Some(vec![1., 2.]));

    let sol = Solution::failed("microlp", SolveStatus::Unbounded);
    assert!(sol.status.is_infeasible());
    assert!(!sol.status.is_optimal());
    assert_eq!(sol.into_x(), None);

    assert!(!SolveStatus::MaxIterations.is_infeasible());
    assert_eq!(SolveStatus::default(), SolveStatus::Unsolved);
    assert_eq!(SolveStatus::NumericalError.to_string(), "NumericalError");
}
