//! Backend adapters.
//!
//! Every backend is a unit struct implementing [`LpSolver`].   Backends
//! exist in every build, but only those compiled in through their cargo
//! feature report [`is_available`](LpSolver::is_available) and appear in
//! the [registry](crate::solver::registry).

use crate::solver::{LinearProgram, Solution, SolverError, SolverSettings};
use enum_dispatch::*;

mod clarabel_lp;
mod goodlp;

pub use clarabel_lp::*;
pub use goodlp::*;

/// Uniform calling convention implemented by every backend adapter.
#[enum_dispatch]
pub trait LpSolver {
    /// registry key of the backend
    fn name(&self) -> &'static str;

    /// true if the backend was compiled into this build
    fn is_available(&self) -> bool;

    /// Solve `problem`, mapping the backend's own result and status
    /// back into a normalized [`Solution`].   Problem dimensions have
    /// already been checked by the caller.
    fn solve(
        &self,
        problem: &LinearProgram,
        settings: &SolverSettings,
    ) -> Result<Solution, SolverError>;
}

/// Wrapper over every backend adapter, in registry order.
#[enum_dispatch(LpSolver)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    ClarabelSolver,
    MicroLpSolver,
    HighsSolver,
    CbcSolver,
    LpSolveSolver,
}

impl Backend {
    /// every backend known to this crate, available or not
    pub fn all() -> [Backend; 5] {
        [
            ClarabelSolver.into(),
            MicroLpSolver.into(),
            HighsSolver.into(),
            CbcSolver.into(),
            LpSolveSolver.into(),
        ]
    }
}

// error returned by adapters compiled without their backend.  Only
// reachable by calling an adapter directly, since the registry never
// hands these out.
#[allow(dead_code)]
pub(crate) fn not_compiled(name: &'static str) -> SolverError {
    SolverError::Backend {
        solver: name,
        message: "backend was not compiled into this build".to_string(),
    }
}

// error returned by backends that take no backend specific options
#[allow(dead_code)]
pub(crate) fn reject_backend_options(
    name: &'static str,
    settings: &SolverSettings,
) -> Result<(), SolverError> {
    match settings.backend_options.keys().next() {
        Some(option) => Err(SolverError::UnsupportedOption {
            solver: name,
            option: option.clone(),
        }),
        None => Ok(()),
    }
}

#[test]
fn test_backend_names() {
    let names: Vec<_> = Backend::all().iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["clarabel", "microlp", "highs", "cbc", "lp_solve"]);

    let clarabel: Backend = ClarabelSolver.into();
    assert_eq!(clarabel.is_available(), cfg!(feature = "clarabel"));
    let microlp: Backend = MicroLpSolver.into();
    assert_eq!(microlp.is_available(), cfg!(feature = "microlp"));
}
