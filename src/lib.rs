//! __lpsolvers__ provides a single entry point for solving linear programs
//! with any of several solver backends.   It solves problems of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & c^T x\\\\\[2ex\]
//!  \text{subject to} & G x \le h \\\\\[1ex\]
//!         & A x = b \\\\\[1ex\]
//!         & l_b \le x \le u_b
//!  \end{array}
//! $$
//!
//! with decision variables $x \in \mathbb{R}^n$.   Only $c$ is required;
//! every constraint block is optional.
//!
//! ```
//! use lpsolvers::{solve_lp, LinearProgram, SolverSettingsBuilder};
//!
//! let problem = LinearProgram::new(&[1., 2., 3.])
//!     .with_inequalities(
//!         &[[1., 2., -1.], [2., 0., 1.], [1., 2., 1.], [-1., -1., -1.]],
//!         &[4., 1., 3., 2.],
//!     );
//!
//! let settings = SolverSettingsBuilder::default().build().unwrap();
//! # #[cfg(feature = "clarabel")]
//! # {
//! let x = solve_lp(&problem, "clarabel", &settings).unwrap().unwrap();
//! assert!(problem.max_inequality_residual(&x) <= 1e-7);
//! # }
//! ```
//!
//! ## Backends
//!
//! Each backend is enabled by a cargo feature.   The names of those
//! compiled into a build are listed, in preference order, in
//! [`AVAILABLE_SOLVERS`].
//!
//! | name       | feature    | method                 |
//! |------------|------------|------------------------|
//! | `clarabel` | `clarabel` | interior point (conic) |
//! | `microlp`  | `microlp`  | simplex (pure Rust)    |
//! | `highs`    | `highs`    | simplex / IPM          |
//! | `cbc`      | `cbc`      | simplex                |
//! | `lp_solve` | `lpsolve`  | simplex                |
//!
//! Requesting a name that is not in the registry fails with
//! [`SolverError::SolverNotFound`].   A problem with no optimal point
//! is not an error: [`solve_lp`] then returns `Ok(None)`.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

pub mod algebra;
pub mod solver;

pub use crate::solver::{
    available_solvers, is_available, solve_lp, solve_lp_default, solve_problem, Backend,
    BackendOptions, LinearProgram, LpSolver, OptionValue, SettingsError, SolveStatus, Solution,
    SolverError, SolverSettings, SolverSettingsBuilder, AVAILABLE_SOLVERS,
};
