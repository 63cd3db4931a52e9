//! Mixture base — EM bookkeeping shared by all mixture families.
//!
//! Purpose
//! -------
//! Own the parts of an EM fit that do not depend on the component
//! distribution: the responsibility matrix, mode sizes `N_k`, mixing weights,
//! the E-step, and the outer iteration loop. Distribution-specific work is
//! delegated to a [`MixtureFamily`].
//!
//! Key behaviors
//! -------------
//! - [`EmState`] keeps `Z`, `N_k = Σ_n Z[n,k]` and `mix_k = N_k / N` in sync.
//! - [`EmState::e_step`] recomputes
//!   `Z[n,k] = mix_k·f_k(x_n) / Σ_j mix_j·f_j(x_n)`; rows whose denominator is
//!   zero or non-finite keep their previous values. Skipped when K = 1.
//! - [`run_em`] alternates M-step and E-step until the objective changes by
//!   less than `tol`, the iteration cap is hit, or the family rejects
//!   `MAX_CONSECUTIVE_REJECTIONS` steps in a row.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Z` rows always sum to 1; the E-step writes normalized rows only.
//! - The family's stored objective is refreshed after every E-step, so the
//!   convergence test compares objectives under the current `Z`.
//!
//! Conventions
//! -----------
//! - Objectives are minimized.
//! - Progress is logged at `debug` level per iteration; nothing is printed.
use crate::{
    mixture::{
        core::{data::BFactorData, responsibilities::Responsibilities},
        errors::MixtureResult,
    },
    optimization::newton::types::Cost,
};
use log::{debug, warn};
use ndarray::Array1;
use serde::Serialize;

/// Stop after this many rejected M-steps in a row.
pub const MAX_CONSECUTIVE_REJECTIONS: usize = 3;

/// Distribution-specific half of an EM fit.
///
/// Required:
/// - `extension()`: suffix appended to report artifact names (e.g. `"_igmm"`).
/// - `n_modes()`: number of components K.
/// - `check_parameters(data, z)`: reject invalid configurations before any
///   numeric work.
/// - `init_parameters(data, state)`: set initial component parameters and
///   the initial objective.
/// - `m_step(data, state)`: update component parameters; return whether the
///   step was accepted.
/// - `refresh_objective(data, state)`: recompute and store the objective at
///   the current parameters under `state`.
/// - `objective()`: last stored objective.
/// - `component_pdf(k, x)`: density of mode `k` at `x`.
pub trait MixtureFamily {
    fn extension(&self) -> &'static str;
    fn n_modes(&self) -> usize;
    fn check_parameters(
        &self, data: &BFactorData, z: Option<&Responsibilities>,
    ) -> MixtureResult<()>;
    fn init_parameters(&mut self, data: &BFactorData, state: &EmState) -> MixtureResult<()>;
    fn m_step(&mut self, data: &BFactorData, state: &EmState) -> MixtureResult<bool>;
    fn refresh_objective(&mut self, data: &BFactorData, state: &EmState) -> MixtureResult<Cost>;
    fn objective(&self) -> Option<Cost>;
    fn component_pdf(&self, k: usize, x: f64) -> f64;
}

/// Responsibilities together with the derived mode sizes and weights.
#[derive(Debug, Clone, PartialEq)]
pub struct EmState {
    /// N × K responsibilities.
    pub z: Responsibilities,
    /// `N_k`, column sums of `z`.
    pub n_k: Array1<f64>,
    /// `N_k / N`.
    pub mix: Array1<f64>,
}

impl EmState {
    pub fn new(z: Responsibilities) -> Self {
        let n_k = z.column_sums();
        let mix = &n_k / z.n_obs() as f64;
        EmState { z, n_k, mix }
    }

    pub fn n_modes(&self) -> usize {
        self.z.n_modes()
    }

    /// Posterior update of `Z` followed by a refresh of `N_k` and `mix`.
    ///
    /// Returns the number of rows left unchanged because every mode had zero
    /// (or non-finite) weighted density there.
    pub fn e_step<F: MixtureFamily + ?Sized>(&mut self, family: &F, data: &BFactorData) -> usize {
        let k = self.n_modes();
        if k == 1 {
            return 0;
        }
        let mut probs = vec![0.0; k];
        let mut kept = 0;
        for (n, &x) in data.values().iter().enumerate() {
            let mut total = 0.0;
            for (j, p) in probs.iter_mut().enumerate() {
                *p = self.mix[j] * family.component_pdf(j, x);
                total += *p;
            }
            if !total.is_finite() || total <= 0.0 {
                kept += 1;
                continue;
            }
            probs.iter_mut().for_each(|p| *p /= total);
            self.z.set_row(n, &probs);
        }
        self.refresh();
        kept
    }

    fn refresh(&mut self) {
        self.n_k = self.z.column_sums();
        self.mix = &self.n_k / self.z.n_obs() as f64;
    }
}

/// Summary of an EM run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitOutcome {
    /// `true` once |Δobjective| < tol after an accepted step.
    pub converged: bool,
    /// Outer iterations performed.
    pub iterations: usize,
    /// Objective right after initialization.
    pub initial_objective: f64,
    /// Objective at termination.
    pub objective: f64,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    /// Human-readable termination reason.
    pub status: String,
}

/// run_em — outer EM loop.
///
/// Parameters
/// ----------
/// - `family`: initialized mixture family (`init_parameters` already called).
/// - `data`: observations.
/// - `state`: responsibilities / weights, updated in place by the E-step.
/// - `max_iter`: iteration cap (> 0).
/// - `tol`: stopping threshold on |Δobjective|.
///
/// Errors
/// ------
/// - Propagates errors from the family's `m_step` / `refresh_objective`.
pub fn run_em<F: MixtureFamily + ?Sized>(
    family: &mut F, data: &BFactorData, state: &mut EmState, max_iter: usize, tol: f64,
) -> MixtureResult<FitOutcome> {
    let initial_objective = match family.objective() {
        Some(v) => v,
        None => family.refresh_objective(data, state)?,
    };
    let mut previous = initial_objective;
    let mut accepted_steps = 0;
    let mut rejected_steps = 0;
    let mut consecutive_rejections = 0;
    let mut converged = false;
    let mut iterations = 0;
    let mut status = format!("Reached maximum iterations ({max_iter})");

    while iterations < max_iter {
        iterations += 1;
        let accepted = family.m_step(data, state)?;
        if accepted {
            accepted_steps += 1;
            consecutive_rejections = 0;
        } else {
            rejected_steps += 1;
            consecutive_rejections += 1;
        }

        let current = if state.n_modes() > 1 {
            let kept = state.e_step(&*family, data);
            if kept > 0 {
                warn!("E-step left {kept} rows unchanged (zero mixture density)");
            }
            family.refresh_objective(data, state)?
        } else {
            family.objective().unwrap_or(previous)
        };
        debug!(
            "EM iteration {iterations}: objective {current:.10e}, step {}",
            if accepted { "accepted" } else { "rejected" }
        );

        if accepted && (previous - current).abs() < tol {
            converged = true;
            status = format!("Objective change below tolerance {tol:e}");
            previous = current;
            break;
        }
        if consecutive_rejections >= MAX_CONSECUTIVE_REJECTIONS {
            status = format!("{consecutive_rejections} consecutive Newton steps rejected");
            previous = current;
            break;
        }
        previous = current;
    }

    Ok(FitOutcome {
        converged,
        iterations,
        initial_objective,
        objective: previous,
        accepted_steps,
        rejected_steps,
        status,
    })
}
