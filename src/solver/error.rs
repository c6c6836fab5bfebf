use crate::algebra::DimensionError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Error type returned by [`solve_lp`](crate::solve_lp) and friends.
///
/// Failing to find an optimal point is __not__ an error: an infeasible,
/// unbounded or unconverged problem produces `Ok(None)` from
/// [`solve_lp`](crate::solve_lp).   Errors are reserved for calls
/// that never reach a backend solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The requested solver is not in the registry of this build
    #[error("solver \"{requested}\" not found; available solvers are {available:?}")]
    SolverNotFound {
        requested: String,
        available: Vec<&'static str>,
    },
    /// This build was compiled without any solver backend
    #[error("no solver backend is available in this build")]
    NoSolverAvailable,
    /// Problem data have incompatible dimensions
    #[error("invalid problem data: {0}")]
    Dimension(#[from] DimensionError),
    /// Settings failed validation
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    /// A backend option is unknown to the selected solver or has the wrong type
    #[error("solver \"{solver}\" does not accept option \"{option}\"")]
    UnsupportedOption {
        solver: &'static str,
        option: String,
    },
    /// The backend rejected the problem during setup
    #[error("solver \"{solver}\" failed: {message}")]
    Backend {
        solver: &'static str,
        message: String,
    },
}

impl SolverError {
    /// True if the error is a registry miss
    pub fn is_solver_not_found(&self) -> bool {
        matches!(self, SolverError::SolverNotFound { .. })
    }
}

#[test]
fn test_error_messages() {
    let err = SolverError::SolverNotFound {
        requested: "ideal".to_string(),
        available: vec!["clarabel", "microlp"],
    };
    assert!(err.is_solver_not_found());
    let msg = err.to_string();
    assert!(msg.contains("ideal"));
    assert!(msg.contains("clarabel"));
    assert!(msg.contains("microlp"));

    let err: SolverError = DimensionError::EmptyCost.into();
    assert!(!err.is_solver_not_found());
    assert_eq!(err.to_string(), "invalid problem data: cost vector is empty");

    let err: SolverError = SettingsError::BadFieldValue("max_iter").into();
    assert_eq!(
        err.to_string(),
        "invalid settings: Bad value for field \"max_iter\""
    );
}
