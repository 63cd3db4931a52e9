//! distribution — the shifted Inverse-Gamma query surface.
//!
//! Purpose
//! -------
//! Evaluate density, log-density, CDF and quantile of one fitted mode,
//! `X = shift + Y` with `Y ~ InvGamma(alpha, betta)`:
//!
//! ```text
//! f(x) = β^α / Γ(α) · (x − s)^(−α−1) · exp(−β / (x − s)),   x > s
//! F(x) = Q(α, β / (x − s))                                   (upper regularized Γ)
//! ```
//!
//! Key behaviors
//! -------------
//! - Parameters are validated through `statrs::distribution::InverseGamma`.
//! - Outside the support (`x <= shift`) the density is 0 and the CDF is 0.
//! - The quantile is found by bisection on `ln(x − shift)`, bracketed
//!   outward from the mode `β / (α + 1)`.
//! - [`FittedMixture`] combines the modes with their weights:
//!   `f(x) = Σ mix_k·f_k(x)`, `F(x) = Σ mix_k·F_k(x)`, and `F⁻¹(p)` by
//!   bisection between the smallest and largest per-mode quantile.
//!
//! Invariants & assumptions
//! ------------------------
//! - `alpha > 0`, `betta > 0`, `shift` finite.
//! - All functions are pure; they never mutate the fitted model.
use crate::mixture::{
    core::params::MixtureParams,
    errors::{MixtureError, MixtureResult},
};
use statrs::distribution::{Continuous, ContinuousCDF, InverseGamma};

/// Bracket-expansion cap in `ln` units; `e^800` overflows `f64`.
const MAX_LOG_EXPANSION: usize = 800;
/// Bisection iterations for [`ShiftedInverseGamma::ppf`].
const PPF_BISECTION_ITERS: usize = 200;
/// Bracket width at which quantile bisection stops (absolute on `ln(x − shift)`
/// for single modes, relative on `x` for mixtures).
const PPF_TOL: f64 = 1e-13;

/// One shifted Inverse-Gamma component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftedInverseGamma {
    alpha: f64,
    betta: f64,
    shift: f64,
    dist: InverseGamma,
}

impl ShiftedInverseGamma {
    /// Errors
    /// ------
    /// - `MixtureError::InvalidDistribution` if `alpha` or `betta` is not
    ///   finite and > 0, or if `shift` is not finite.
    pub fn new(alpha: f64, betta: f64, shift: f64) -> MixtureResult<Self> {
        if !shift.is_finite() {
            return Err(MixtureError::InvalidDistribution {
                text: format!("shift must be finite, got {shift}"),
            });
        }
        let dist = InverseGamma::new(alpha, betta)?;
        Ok(ShiftedInverseGamma { alpha, betta, shift, dist })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn betta(&self) -> f64 {
        self.betta
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn pdf(&self, x: f64) -> f64 {
        if x <= self.shift { 0.0 } else { self.dist.pdf(x - self.shift) }
    }

    pub fn ln_pdf(&self, x: f64) -> f64 {
        if x <= self.shift { f64::NEG_INFINITY } else { self.dist.ln_pdf(x - self.shift) }
    }

    pub fn cdf(&self, x: f64) -> f64 {
        if x <= self.shift { 0.0 } else { self.dist.cdf(x - self.shift) }
    }

    /// Quantile function `F⁻¹(p)`.
    ///
    /// Returns `shift` for `p = 0` and `+∞` for `p = 1`.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::InvalidProbability` if `p` is NaN or outside `[0, 1]`.
    pub fn ppf(&self, p: f64) -> MixtureResult<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(MixtureError::InvalidProbability { value: p });
        }
        if p == 0.0 {
            return Ok(self.shift);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }

        let cdf_log = |t: f64| self.dist.cdf(t.exp());
        let start = (self.betta / (self.alpha + 1.0)).ln();
        let (mut lo, mut hi) = (start, start);
        let mut expansions = 0;
        while cdf_log(hi) < p && expansions < MAX_LOG_EXPANSION {
            lo = hi;
            hi += 1.0;
            expansions += 1;
        }
        expansions = 0;
        while cdf_log(lo) > p && expansions < MAX_LOG_EXPANSION {
            hi = lo;
            lo -= 1.0;
            expansions += 1;
        }

        for _ in 0..PPF_BISECTION_ITERS {
            if hi - lo < PPF_TOL {
                break;
            }
            let mid = 0.5 * (lo + hi);
            if cdf_log(mid) < p {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(self.shift + (0.5 * (lo + hi)).exp())
    }
}

/// Weighted collection of fitted modes.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedMixture {
    mix: Vec<f64>,
    modes: Vec<ShiftedInverseGamma>,
}

impl FittedMixture {
    /// Errors
    /// ------
    /// - `MixtureError::InvalidDistribution` if any mode has invalid
    ///   parameters.
    pub fn from_params(params: &MixtureParams) -> MixtureResult<Self> {
        let modes = (0..params.n_modes())
            .map(|k| ShiftedInverseGamma::new(params.alpha[k], params.betta[k], params.shift[k]))
            .collect::<MixtureResult<Vec<_>>>()?;
        Ok(FittedMixture { mix: params.mix.clone(), modes })
    }

    pub fn mix(&self) -> &[f64] {
        &self.mix
    }

    pub fn modes(&self) -> &[ShiftedInverseGamma] {
        &self.modes
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.mix.iter().zip(&self.modes).map(|(w, d)| w * d.pdf(x)).sum()
    }

    pub fn cdf(&self, x: f64) -> f64 {
        self.mix.iter().zip(&self.modes).map(|(w, d)| w * d.cdf(x)).sum()
    }

    /// Mixture quantile.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::InvalidProbability` if `p` is NaN or outside `[0, 1]`.
    pub fn ppf(&self, p: f64) -> MixtureResult<f64> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for d in &self.modes {
            let q = d.ppf(p)?;
            lo = lo.min(q);
            hi = hi.max(q);
        }
        if !hi.is_finite() || hi - lo <= 0.0 {
            return Ok(hi);
        }
        for _ in 0..PPF_BISECTION_ITERS {
            let mid = 0.5 * (lo + hi);
            if hi - lo <= PPF_TOL * mid.abs().max(1.0) {
                break;
            }
            if self.cdf(mid) < p {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(0.5 * (lo + hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Support handling and the closed-form log-density.
    // - The round-trip law cdf(ppf(p)) ≈ p.
    // - Normalization of the density.
    // - Parameter and probability validation.
    // -------------------------------------------------------------------------

    #[test]
    fn density_is_zero_outside_support_and_matches_closed_form() {
        let d = ShiftedInverseGamma::new(3.5, 4.0, 1.0).unwrap();

        assert_eq!(d.pdf(1.0), 0.0);
        assert_eq!(d.cdf(0.5), 0.0);
        assert_eq!(d.ln_pdf(1.0), f64::NEG_INFINITY);

        let u: f64 = 2.0;
        let expected = 3.5 * 4.0_f64.ln() - statrs::function::gamma::ln_gamma(3.5)
            - 4.5 * u.ln()
            - 4.0 / u;
        assert!((d.ln_pdf(3.0) - expected).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // `ppf` must invert `cdf` across the unit interval, including the tails.
    fn cdf_of_ppf_round_trips() {
        let d = ShiftedInverseGamma::new(3.5, 12.0, 5.0).unwrap();

        for &p in &[1e-6, 0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99, 1.0 - 1e-6] {
            let q = d.ppf(p).unwrap();
            assert!(q > 5.0);
            assert!((d.cdf(q) - p).abs() < 1e-9, "p = {p}: cdf(ppf(p)) = {}", d.cdf(q));
        }
        assert_eq!(d.ppf(0.0).unwrap(), 5.0);
        assert_eq!(d.ppf(1.0).unwrap(), f64::INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Composite Simpson integration of the density over a wide window must
    // be close to 1.
    fn pdf_integrates_to_one() {
        let d = ShiftedInverseGamma::new(4.0, 6.0, 2.0).unwrap();
        let (a, b) = (2.0, d.ppf(1.0 - 1e-9).unwrap());
        let m = 20_000;
        let h = (b - a) / m as f64;

        let mut s = d.pdf(a) + d.pdf(b);
        for i in 1..m {
            let w = if i % 2 == 1 { 4.0 } else { 2.0 };
            s += w * d.pdf(a + i as f64 * h);
        }
        let integral = s * h / 3.0;

        assert!((integral - 1.0).abs() < 1e-4, "integral = {integral}");
    }

    #[test]
    // Purpose
    // -------
    // The mixture quantile must invert the mixture CDF and lie between the
    // per-mode quantiles.
    fn mixture_ppf_inverts_mixture_cdf() {
        let params = MixtureParams {
            mix: vec![0.3, 0.7],
            alpha: vec![3.5, 5.0],
            betta: vec![10.0, 80.0],
            shift: vec![5.0, 20.0],
        };
        let fitted = FittedMixture::from_params(&params).unwrap();

        for &p in &[0.05, 0.3, 0.5, 0.9] {
            let q = fitted.ppf(p).unwrap();
            assert!((fitted.cdf(q) - p).abs() < 1e-9, "p = {p}");
            let q0 = fitted.modes()[0].ppf(p).unwrap();
            let q1 = fitted.modes()[1].ppf(p).unwrap();
            assert!(q >= q0.min(q1) - 1e-9 && q <= q0.max(q1) + 1e-9);
        }
        assert!((fitted.pdf(30.0) - (0.3 * fitted.modes()[0].pdf(30.0)
            + 0.7 * fitted.modes()[1].pdf(30.0)))
            .abs()
            < 1e-15);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(
            ShiftedInverseGamma::new(0.0, 1.0, 0.0),
            Err(MixtureError::InvalidDistribution { .. })
        ));
        assert!(ShiftedInverseGamma::new(1.0, 1.0, f64::NAN).is_err());

        let d = ShiftedInverseGamma::new(2.0, 1.0, 0.0).unwrap();
        assert_eq!(d.ppf(1.5).unwrap_err(), MixtureError::InvalidProbability { value: 1.5 });
        assert!(d.ppf(f64::NAN).is_err());
    }
}
