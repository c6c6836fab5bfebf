use crate::solver::backends::{Backend, LpSolver};
use crate::solver::SolverError;
use lazy_static::lazy_static;

lazy_static! {
    /// Names of the backends compiled into this build, in preference order.
    ///
    /// Built once on first use.   A backend is present exactly when its
    /// cargo feature is enabled.
    pub static ref AVAILABLE_SOLVERS: Vec<&'static str> = Backend::all()
        .iter()
        .filter(|b| b.is_available())
        .map(|b| b.name())
        .collect();
}

/// Names of the backends compiled into this build, in preference order.
pub fn available_solvers() -> &'static [&'static str] {
    AVAILABLE_SOLVERS.as_slice()
}

/// True if `name` is a registered backend
pub fn is_available(name: &str) -> bool {
    AVAILABLE_SOLVERS.iter().any(|&s| s == name)
}

impl Backend {
    /// Registry lookup.   Fails with
    /// [`SolverNotFound`](SolverError::SolverNotFound) if `name` is
    /// unknown or not compiled into this build.
    pub fn from_name(name: &str) -> Result<Backend, SolverError> {
        Backend::all()
            .into_iter()
            .find(|b| b.is_available() && b.name() == name)
            .ok_or_else(|| SolverError::SolverNotFound {
                requested: name.to_string(),
                available: AVAILABLE_SOLVERS.clone(),
            })
    }

    /// The first registered backend
    pub fn preferred() -> Result<Backend, SolverError> {
        match AVAILABLE_SOLVERS.first() {
            Some(name) => Backend::from_name(name),
            None => Err(SolverError::NoSolverAvailable),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = SolverError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::from_name(s)
    }
}

#[test]
fn test_registry() {
    for &name in available_solvers() {
        assert!(is_available(name));
        assert_eq!(Backend::from_name(name).unwrap().name(), name);
    }
    assert!(!is_available("ideal"));

    let err = Backend::from_name("ideal").unwrap_err();
    assert_eq!(
        err,
        SolverError::SolverNotFound {
            requested: "ideal".to_string(),
            available: AVAILABLE_SOLVERS.clone(),
        }
    );
    assert!("ideal".parse::<Backend>().is_err());

    // registry order follows the backend table
    let expected: Vec<_> = Backend::all()
        .iter()
        .map(|b| b.name())
        .filter(|name| available_solvers().contains(name))
        .collect();
    assert_eq!(available_solvers(), expected.as_slice());
}

#[cfg(feature = "clarabel")]
#[test]
fn test_registry_clarabel_preferred() {
    assert_eq!(available_solvers()[0], "clarabel");
    assert_eq!(Backend::preferred().unwrap().name(), "clarabel");
}
