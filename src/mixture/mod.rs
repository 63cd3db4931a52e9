//! mixture — shifted Inverse-Gamma mixtures of B-factor distributions.
//!
//! Purpose
//! -------
//! Bundle the mixture stack under one namespace: validated data and
//! responsibilities, the Inverse-Gamma fitting mathematics ([`core`]), the
//! EM driver and model type ([`models`]), and the shared error type
//! ([`errors`]).
//!
//! Key behaviors
//! -------------
//! - Fit K shifted Inverse-Gamma modes by EM; each M-step is a randomly
//!   damped Newton step on an analytic Fisher matrix with backtracking.
//! - Expose per-mode and mixture pdf / cdf / ppf, a parameter snapshot,
//!   standard errors and a structured report.
//!
//! Conventions
//! -----------
//! - Objectives are negative log-likelihoods (plus a shape prior on mode 0)
//!   and are minimized.
//! - θ layout: `(alpha_0, betta_0, shift_0, alpha_1, …)`.
//! - The stack logs through the `log` facade and never installs a logger.
//!
//! Downstream usage
//! ----------------
//! - Most callers only need [`prelude`]; see `mixture::models` for an
//!   end-to-end example.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    BFactorData, FittedMixture, MixtureOptions, MixtureParams, Responsibilities,
    ShiftedInverseGamma,
};
pub use self::errors::{MixtureError, MixtureResult};
pub use self::models::{FitOutcome, InverseGammaMixture, MixtureFamily};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bfactor_mixtures::mixture::prelude::*;
//
// to import the main mixture surface in a single line.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{MixtureError, MixtureResult};
    pub use super::models::prelude::*;
}
