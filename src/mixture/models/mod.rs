//! models — EM driver and the Inverse-Gamma mixture family.
//!
//! Purpose
//! -------
//! Sit on top of `mixture::core` and turn its building blocks into a
//! fittable model: the family-independent EM bookkeeping lives in [`base`],
//! the shifted Inverse-Gamma family with its Newton M-step, query surface
//! and report in [`igmm`].
//!
//! Key behaviors
//! -------------
//! - [`MixtureFamily`] is the seam between the EM loop and a distribution
//!   family; [`run_em`] only talks to that trait.
//! - [`InverseGammaMixture::fit`] validates configuration, builds the
//!   [`EmState`], initializes parameters and runs the loop.
//!
//! Invariants & assumptions
//! ------------------------
//! - One model instance owns its parameters, responsibilities and random
//!   generator; instances are not shared between threads while fitting.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use bfactor_mixtures::mixture::prelude::*;
//! use ndarray::array;
//!
//! let data = BFactorData::new(array![1.0, 1.2, 1.5, 2.0, 3.0, 5.0])?;
//! let mut model = InverseGammaMixture::new(MixtureOptions::default().with_seed(1));
//! let outcome = model.fit(&data, None)?;
//! assert!(outcome.objective <= outcome.initial_objective);
//! # Ok::<(), MixtureError>(())
//! ```

pub mod base;
pub mod igmm;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::base::{EmState, FitOutcome, MAX_CONSECUTIVE_REJECTIONS, MixtureFamily, run_em};
pub use self::igmm::InverseGammaMixture;

pub mod prelude {
    pub use super::base::{EmState, FitOutcome, MixtureFamily};
    pub use super::igmm::InverseGammaMixture;
}
