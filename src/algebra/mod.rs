//! Dense linear algebra for problem data.
//!
//! Problem data is supplied in dense form and converted to each
//! backend's native layout by its adapter.   Only the handful of
//! operations needed for shape normalization, residual checks and
//! `sym_proj` live here.

#![allow(non_snake_case)]

mod dense;
mod error_types;
mod floats;
mod math_traits;
mod symmetric;
mod vecmath;

pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use symmetric::*;
