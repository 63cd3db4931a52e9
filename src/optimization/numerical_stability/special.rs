//! Special functions for Gamma-family likelihoods.
//!
//! `statrs` ships `ln_gamma`, `digamma` and the regularized incomplete gamma
//! functions but no trigamma, so [`trigamma`] is implemented here with the
//! usual recurrence-plus-asymptotic-series scheme.
//!
//! # Provided items
//! - [`EIGEN_EPS`]: eigenvalue floor for pseudo-inverses of information
//!   matrices.
//! - [`digamma`], [`ln_gamma`]: re-exported from `statrs`.
//! - [`trigamma`]: ψ₁(x) = d²/dx² ln Γ(x).
pub use statrs::function::gamma::{digamma, ln_gamma};

/// Eigenvalues at or below this value are treated as zero when inverting an
/// information matrix.
pub const EIGEN_EPS: f64 = 1e-12;

/// Below this argument the recurrence ψ₁(x) = ψ₁(x + 1) + 1/x² is applied
/// before switching to the asymptotic series.
const TRIGAMMA_SERIES_CUTOFF: f64 = 6.0;

/// Trigamma function ψ₁(x), the second derivative of `ln Γ(x)`.
///
/// - For `x > 0`, shifts `x` upward with ψ₁(x) = ψ₁(x + 1) + 1/x² until
///   `x >= 6`, then evaluates the Bernoulli asymptotic series
///   `1/x + 1/(2x²) + 1/(6x³) − 1/(30x⁵) + 1/(42x⁷) − 1/(30x⁹) + 5/(66x¹¹)`.
/// - For negative non-integers, uses the reflection formula
///   ψ₁(1 − x) + ψ₁(x) = π² / sin²(πx).
/// - Returns `+∞` at the poles `x ∈ {0, −1, −2, ...}` and NaN for NaN input.
///
/// Absolute error is below `1e-10` on `(0, ∞)`.
pub fn trigamma(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    if x <= 0.0 {
        if x == x.floor() {
            return f64::INFINITY;
        }
        let s = (std::f64::consts::PI * x).sin();
        return std::f64::consts::PI * std::f64::consts::PI / (s * s) - trigamma(1.0 - x);
    }

    let mut z = x;
    let mut acc = 0.0;
    while z < TRIGAMMA_SERIES_CUTOFF {
        acc += 1.0 / (z * z);
        z += 1.0;
    }
    let inv = 1.0 / z;
    let inv2 = inv * inv;
    let tail = inv
        * inv2
        * (1.0 / 6.0
            - inv2 * (1.0 / 30.0 - inv2 * (1.0 / 42.0 - inv2 * (1.0 / 30.0 - inv2 * 5.0 / 66.0))));
    acc + inv + 0.5 * inv2 + tail
}
