//! core — data, parameters and the Inverse-Gamma fitting mathematics.
//!
//! Purpose
//! -------
//! Collect the building blocks of a shifted Inverse-Gamma mixture fit:
//! validated observations and responsibilities, options, component
//! parameters, initialization, the Fisher matrix / gradient / objective
//! bundle, and the per-mode distribution query surface. The EM driver in
//! `mixture::models` composes these.
//!
//! Key behaviors
//! -------------
//! - [`BFactorData`] and [`Responsibilities`] validate inputs once at the
//!   boundary.
//! - [`init_components`] places each mode's shift strictly below its member
//!   observations and inverts the mean formula for `betta`.
//! - [`calc_fisher_matrix`] returns an explicit [`FisherBundle`]; no scratch
//!   state is shared between evaluations.
//! - [`ShiftedInverseGamma`] exposes pdf / cdf / ppf of a single mode.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ layout is `(alpha_0, betta_0, shift_0, alpha_1, …)` everywhere.
//! - `alpha` and `betta` never fall below `PARAM_FLOOR` after an update.
//!
//! Conventions
//! -----------
//! - No I/O. The only logging is a `trace!` when support exclusion happens
//!   inside [`calc_fisher_matrix`].
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; end-to-end fits are tested
//!   in `tests/integration_igmm_pipeline.rs`.

pub mod constants;
pub mod data;
pub mod distribution;
pub mod fisher;
pub mod init;
pub mod options;
pub mod params;
pub mod responsibilities;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::BFactorData;
pub use self::distribution::{FittedMixture, ShiftedInverseGamma};
pub use self::fisher::{FisherBundle, SufficientStats, calc_fisher_matrix};
pub use self::init::init_components;
pub use self::options::MixtureOptions;
pub use self::params::{IGComponents, MixtureParams};
pub use self::responsibilities::Responsibilities;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bfactor_mixtures::mixture::core::prelude::*;
//
// to import the main core surface in a single line.

pub mod prelude {
    pub use super::data::BFactorData;
    pub use super::distribution::{FittedMixture, ShiftedInverseGamma};
    pub use super::fisher::{FisherBundle, calc_fisher_matrix};
    pub use super::options::MixtureOptions;
    pub use super::params::{IGComponents, MixtureParams};
    pub use super::responsibilities::Responsibilities;
}
