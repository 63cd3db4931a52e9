//! optimization — Newton building blocks, special functions, and error surface.
//!
//! Purpose
//! -------
//! Provide the numerical machinery the mixture M-step is built from: randomly
//! damped Newton directions, a backtracking line search, and the special
//! functions that appear in Gamma-family gradients and Hessians. Everything
//! shares a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - [`newton`]: `-(H + tol·E)⁻¹ g` directions and shrink-until-no-worse
//!   step acceptance.
//! - [`numerical_stability`]: `ln Γ`, ψ, ψ₁ and shared tolerances.
//! - [`errors`]: `OptError` / `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are minimized. Model code that maximizes a likelihood passes
//!   the negated value.
//! - Randomness is injected by callers; no submodule owns a generator.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` types; `nalgebra` is used internally
//!   for inversion and eigen-decomposition only.
//! - This layer never logs. Progress and rejected-step warnings are emitted
//!   by the mixture layer that drives it.
//!
//! Downstream usage
//! ----------------
//! - `mixture::models::igmm` drives a full M-step with these helpers.
//! - `inference::hessian` reuses `EIGEN_EPS` and `OptError` for its
//!   finite-difference standard errors.

pub mod errors;
pub mod newton;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bfactor_mixtures::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::newton::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
