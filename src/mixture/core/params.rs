//! Inverse-Gamma component parameters and the fitted-model snapshot.
//!
//! This module provides the per-mode parameter container [`IGComponents`]
//! (shape `alpha`, scale `betta`, location `shift`) used by the Fisher and
//! Newton machinery, and the read-only snapshot [`MixtureParams`] handed to
//! callers and reports.
//!
//! ## θ layout
//! The optimizer-facing vector interleaves modes:
//! `θ = (alpha_0, betta_0, shift_0, alpha_1, betta_1, shift_1, …)`, length
//! `3K`. Gradients, Hessian blocks and Newton directions use the same layout.
//!
//! ## Clamping
//! [`IGComponents::propose`] floors `alpha` and `betta` at a caller-supplied
//! value after applying a step; `shift` is never clamped.
use crate::optimization::newton::types::Theta;
use ndarray::Array1;
use serde::Serialize;

/// Number of parameters per mode in the θ layout.
pub const PARAMS_PER_MODE: usize = 3;

/// Per-mode parameters of a shifted Inverse-Gamma mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct IGComponents {
    /// Shape, one per mode.
    pub alpha: Array1<f64>,
    /// Scale, one per mode.
    pub betta: Array1<f64>,
    /// Location, one per mode.
    pub shift: Array1<f64>,
}

impl IGComponents {
    /// Build from per-mode vectors of equal length.
    ///
    /// Panics
    /// ------
    /// - Debug builds assert equal lengths.
    pub fn new(alpha: Array1<f64>, betta: Array1<f64>, shift: Array1<f64>) -> Self {
        debug_assert!(alpha.len() == betta.len() && betta.len() == shift.len());
        IGComponents { alpha, betta, shift }
    }

    pub fn n_modes(&self) -> usize {
        self.alpha.len()
    }

    /// `(alpha_k, betta_k, shift_k)` of mode `k`.
    pub fn mode(&self, k: usize) -> (f64, f64, f64) {
        (self.alpha[k], self.betta[k], self.shift[k])
    }

    /// Flatten into the interleaved θ layout.
    pub fn to_theta(&self) -> Theta {
        let mut theta = Array1::zeros(PARAMS_PER_MODE * self.n_modes());
        for k in 0..self.n_modes() {
            theta[PARAMS_PER_MODE * k] = self.alpha[k];
            theta[PARAMS_PER_MODE * k + 1] = self.betta[k];
            theta[PARAMS_PER_MODE * k + 2] = self.shift[k];
        }
        theta
    }

    /// Inverse of [`IGComponents::to_theta`]. `theta.len()` must be a multiple
    /// of 3.
    pub fn from_theta(theta: &Theta) -> Self {
        let k = theta.len() / PARAMS_PER_MODE;
        let alpha = Array1::from_shape_fn(k, |i| theta[PARAMS_PER_MODE * i]);
        let betta = Array1::from_shape_fn(k, |i| theta[PARAMS_PER_MODE * i + 1]);
        let shift = Array1::from_shape_fn(k, |i| theta[PARAMS_PER_MODE * i + 2]);
        IGComponents { alpha, betta, shift }
    }

    /// Candidate `self + step · direction` with `alpha`/`betta` floored.
    ///
    /// `direction` uses the θ layout.
    pub fn propose(&self, direction: &Theta, step: f64, floor: f64) -> Self {
        let mut next = self.clone();
        for k in 0..self.n_modes() {
            let base = PARAMS_PER_MODE * k;
            next.alpha[k] = (self.alpha[k] + step * direction[base]).max(floor);
            next.betta[k] = (self.betta[k] + step * direction[base + 1]).max(floor);
            next.shift[k] = self.shift[k] + step * direction[base + 2];
        }
        next
    }
}

/// Read-only snapshot of a fitted mixture: `{mix, alpha, betta, shift}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixtureParams {
    pub mix: Vec<f64>,
    pub alpha: Vec<f64>,
    pub betta: Vec<f64>,
    pub shift: Vec<f64>,
}

impl MixtureParams {
    pub fn from_parts(mix: &Array1<f64>, comps: &IGComponents) -> Self {
        MixtureParams {
            mix: mix.to_vec(),
            alpha: comps.alpha.to_vec(),
            betta: comps.betta.to_vec(),
            shift: comps.shift.to_vec(),
        }
    }

    pub fn n_modes(&self) -> usize {
        self.mix.len()
    }
}
