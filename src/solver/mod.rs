//! Solver dispatch layer.
//!
//! A [`LinearProgram`] is handed to [`solve_lp`] together with the name of
//! a backend.   The name is looked up in the [registry](registry) of
//! backends compiled into this build, and the problem is forwarded to that
//! backend's [adapter](backends), which converts it to the backend's own
//! format and maps the result back into a normalized [`Solution`].

// internal module structure
pub mod backends;
mod dispatch;
mod error;
mod problem;
pub mod registry;
mod settings;
mod solution;

#[cfg(feature = "serde")]
mod json;

//user facing problem, settings and result types
pub use error::*;
pub use problem::*;
pub use settings::*;
pub use solution::*;

//user facing entry points
pub use backends::{Backend, LpSolver};
pub use dispatch::*;
pub use registry::{available_solvers, is_available, AVAILABLE_SOLVERS};
