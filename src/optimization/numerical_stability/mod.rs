//! numerical_stability — special functions and shared numeric tolerances.
//!
//! Purpose
//! -------
//! Collect the scalar special functions the Inverse-Gamma likelihood needs
//! (`ln Γ`, ψ, ψ₁, the regularized upper incomplete gamma) together with
//! small tolerances shared by the optimizer and inference layers.
//!
//! Key behaviors
//! -------------
//! - Re-export `statrs`' `ln_gamma` and `digamma` so callers have
//!   a single import point.
//! - Provide [`trigamma`](special::trigamma), which `statrs` does not ship.
//! - Centralize `EIGEN_EPS`, the eigenvalue floor used when pseudo-inverting
//!   information matrices.
//!
//! Conventions
//! -----------
//! - Pure functions only. No logging, I/O or global state; safe for tight
//!   inner loops.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`special`] check trigamma against closed forms, against a
//!   central difference of `digamma`, and at poles.

pub mod special;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::special::{EIGEN_EPS, digamma, ln_gamma, trigamma};

pub mod prelude {
    pub use super::special::{EIGEN_EPS, digamma, ln_gamma, trigamma};
}
