//! newton::types — shared numeric aliases for second-order steps.
//!
//! Purpose
//! -------
//! Centralize the vector and matrix aliases used by the damped Newton step,
//! the Fisher-matrix computation, and the finite-difference helpers, so the
//! rest of the crate does not spell out `ndarray` generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors in the per-mode triple layout
//!   `(alpha_1, betta_1, shift_1, alpha_2, ...)`.
//! - `Hessian` is a dense `theta.len() × theta.len()` matrix.
use ndarray::{Array1, Array2};

/// Parameter vector `θ` in the per-mode triple layout.
pub type Theta = Array1<f64>;

/// Gradient of the objective, matching the shape of [`Theta`].
pub type Grad = Array1<f64>;

/// Dense Hessian (or Fisher) matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value (a negative log-likelihood-like quantity).
pub type Cost = f64;
