//! Fixed constants of the Inverse-Gamma mixture fit.
//!
//! These are part of the model definition and are not exposed through
//! `MixtureOptions`. The line-search schedule lives with
//! `optimization::newton::LineSearchOptions`.

/// Responsibility above which an observation counts as a member of a mode
/// when locating the initial shift.
pub const MEMBERSHIP_THRESHOLD: f64 = 0.1;

/// Prior target for the shape of mode 0 (also the initial shape of every
/// mode).
pub const ALPHA_PRIOR_TARGET: f64 = 3.5;

/// Prior standard deviation on the shape of mode 0; the prior precision is
/// `1 / ALPHA_PRIOR_SIGMA²`.
pub const ALPHA_PRIOR_SIGMA: f64 = 0.1;

/// Lower bound applied to `alpha` and `betta` after every update.
pub const PARAM_FLOOR: f64 = 0.1;

/// Relative margin placing the initial shift strictly below the smallest
/// member observation.
pub const SHIFT_MARGIN: f64 = 0.01;

/// Prior precision on the shape of mode 0.
pub fn alpha_prior_precision() -> f64 {
    1.0 / (ALPHA_PRIOR_SIGMA * ALPHA_PRIOR_SIGMA)
}
