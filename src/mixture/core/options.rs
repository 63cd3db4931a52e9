//! Mixture options — configuration for EM fitting.
//!
//! Purpose
//! -------
//! Collect the recognized fitting knobs in one validated structure so that
//! models are configured explicitly rather than through ad-hoc arguments.
//!
//! Key behaviors
//! -------------
//! - [`MixtureOptions::new`] validates `n_modes >= 1`, `tol` finite and
//!   `> 0`, and `max_iter > 0`.
//! - `tol` serves two roles: the outer-loop stopping threshold on the change
//!   of the objective, and the scale of the random Hessian damping.
//! - `seed` makes the damping perturbation reproducible; `None` draws the
//!   seed from OS entropy.
//!
//! Testing notes
//! -------------
//! - Unit tests check defaults and each rejection branch.
use crate::mixture::errors::{MixtureError, MixtureResult};

/// Default number of modes.
pub const DEFAULT_N_MODES: usize = 1;
/// Default convergence tolerance / damping scale.
pub const DEFAULT_TOL: f64 = 1e-5;
/// Default outer iteration cap.
pub const DEFAULT_MAX_ITER: usize = 100;

/// MixtureOptions — validated EM configuration.
///
/// Fields are private; build through [`MixtureOptions::new`] or
/// [`MixtureOptions::default`] so every instance satisfies the checks below.
///
/// Fields
/// ------
/// - `n_modes`: `usize`
///   Number of mixture components K (≥ 1).
/// - `tol`: `f64`
///   Outer-loop stopping threshold on |Δobjective| and Hessian damping scale.
/// - `max_iter`: `usize`
///   Outer iteration cap (> 0).
/// - `seed`: `Option<u64>`
///   Seed of the damping random source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureOptions {
    n_modes: usize,
    tol: f64,
    max_iter: usize,
    seed: Option<u64>,
}

impl MixtureOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::InvalidModeCount` if `n_modes == 0`.
    /// - `MixtureError::InvalidTolerance` if `tol` is non-finite or `<= 0`.
    /// - `MixtureError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        n_modes: usize, tol: f64, max_iter: usize, seed: Option<u64>,
    ) -> MixtureResult<Self> {
        if n_modes == 0 {
            return Err(MixtureError::InvalidModeCount {
                n_modes,
                reason: "Number of modes must be at least 1.",
            });
        }
        if !tol.is_finite() || tol <= 0.0 {
            return Err(MixtureError::InvalidTolerance {
                tol,
                reason: "Tolerance must be finite and > 0.",
            });
        }
        if max_iter == 0 {
            return Err(MixtureError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be > 0.",
            });
        }
        Ok(MixtureOptions { n_modes, tol, max_iter, seed })
    }

    pub fn n_modes(&self) -> usize {
        self.n_modes
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Same as `self` with a fixed damping seed.
    pub fn with_seed(self, seed: u64) -> Self {
        MixtureOptions { seed: Some(seed), ..self }
    }
}

impl Default for MixtureOptions {
    fn default() -> Self {
        MixtureOptions {
            n_modes: DEFAULT_N_MODES,
            tol: DEFAULT_TOL,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Default values.
    // - Validation of each field.
    // -------------------------------------------------------------------------

    #[test]
    fn default_matches_documented_values() {
        let opts = MixtureOptions::default();

        assert_eq!(opts.n_modes(), 1);
        assert_eq!(opts.tol(), 1e-5);
        assert_eq!(opts.max_iter(), 100);
        assert_eq!(opts.seed(), None);
        assert_eq!(opts.with_seed(9).seed(), Some(9));
    }

    #[test]
    fn new_rejects_invalid_fields() {
        assert!(matches!(
            MixtureOptions::new(0, 1e-5, 100, None),
            Err(MixtureError::InvalidModeCount { n_modes: 0, .. })
        ));
        assert!(matches!(
            MixtureOptions::new(2, 0.0, 100, None),
            Err(MixtureError::InvalidTolerance { .. })
        ));
        assert!(matches!(
            MixtureOptions::new(2, f64::NAN, 100, None),
            Err(MixtureError::InvalidTolerance { .. })
        ));
        assert!(matches!(
            MixtureOptions::new(2, 1e-5, 0, None),
            Err(MixtureError::InvalidMaxIter { max_iter: 0, .. })
        ));
        assert!(MixtureOptions::new(3, 1e-4, 50, Some(1)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Accessors return exactly what `new` validated, and a reseeded copy keeps
    // the validated fields.
    fn accessors_expose_validated_values() {
        let opts = MixtureOptions::new(2, 1e-3, 40, None).unwrap().with_seed(7);

        assert_eq!(
            (opts.n_modes(), opts.tol(), opts.max_iter(), opts.seed()),
            (2, 1e-3, 40, Some(7))
        );
    }
}
