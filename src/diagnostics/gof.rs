//! diagnostics::gof — Kolmogorov–Smirnov goodness of fit.
//!
//! Purpose
//! -------
//! Quantify how well a fitted CDF describes the observations with the
//! one-sample Kolmogorov–Smirnov statistic and its asymptotic p-value.
//!
//! Key behaviors
//! -------------
//! - `D_n = max_i max(F(x_(i)) − i/n, (i+1)/n − F(x_(i)))` over the sorted
//!   sample.
//! - p-value from the Kolmogorov limiting distribution
//!   `Q(λ) = 2 Σ_{j≥1} (−1)^{j−1} exp(−2 j² λ²)` evaluated at
//!   `λ = (√n + 0.12 + 0.11/√n)·D_n` (Stephens' small-sample correction).
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters of the CDF were estimated from the same sample, so the
//!   p-value is conservative; it is reported for orientation only.
//!
//! Testing notes
//! -------------
//! - Unit tests check a perfect uniform grid, a grossly misfit CDF, and the
//!   limiting values of `Q`.
use serde::Serialize;

/// Series terms evaluated for the Kolmogorov tail sum.
const KOLMOGOROV_TERMS: usize = 100;

/// KSOutcome — Kolmogorov–Smirnov statistic and asymptotic p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KSOutcome {
    /// Sample size.
    pub n: usize,
    /// Sup-distance between empirical and fitted CDF.
    pub statistic: f64,
    /// Asymptotic p-value in [0, 1].
    pub p_value: f64,
}

impl KSOutcome {
    /// kolmogorov_smirnov — one-sample KS test against `cdf`.
    ///
    /// Parameters
    /// ----------
    /// - `sorted`: observations in ascending order (non-empty).
    /// - `cdf`: fitted cumulative distribution function.
    ///
    /// Returns
    /// -------
    /// `KSOutcome` with `statistic = 0` and `p_value = 1` for an empty
    /// sample.
    pub fn kolmogorov_smirnov<F: Fn(f64) -> f64>(sorted: &[f64], cdf: F) -> KSOutcome {
        let n = sorted.len();
        if n == 0 {
            return KSOutcome { n, statistic: 0.0, p_value: 1.0 };
        }
        let nf = n as f64;
        let statistic = sorted
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let f = cdf(x);
                (f - i as f64 / nf).max((i as f64 + 1.0) / nf - f)
            })
            .fold(0.0, f64::max);
        let sqrt_n = nf.sqrt();
        let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * statistic;
        KSOutcome { n, statistic, p_value: kolmogorov_q(lambda) }
    }
}

/// Tail of the Kolmogorov distribution, `P(K > λ)`.
fn kolmogorov_q(lambda: f64) -> f64 {
    if lambda < 1e-3 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for j in 1..=KOLMOGOROV_TERMS {
        let jf = j as f64;
        let term = (-2.0 * jf * jf * lambda * lambda).exp();
        sum += sign * term;
        if term < 1e-16 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}
