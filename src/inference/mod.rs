//! inference — post-estimation uncertainty for fitted mixtures.
//!
//! Purpose
//! -------
//! Compute classical standard errors of fitted parameters from the observed
//! information, i.e. the finite-difference Jacobian of an analytic gradient.
//!
//! Conventions
//! -----------
//! - Parameters use the θ layout of the model that supplies the gradient
//!   (for the Inverse-Gamma mixture: `alpha_0, betta_0, shift_0, …`).
//! - Failures are reported as `OptError`; model layers convert them.
//!
//! Downstream usage
//! ----------------
//! - `InverseGammaMixture::standard_errors` and the report's output table.

pub mod hessian;

pub use self::hessian::{calc_standard_errors, observed_information};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bfactor_mixtures::inference::prelude::*;
//
// to import the inference surface in a single line.

pub mod prelude {
    pub use super::hessian::{calc_standard_errors, observed_information};
}
