//! Inverse-Gamma mixture model: Newton M-step, query surface and report.
//!
//! [`InverseGammaMixture`] implements [`MixtureFamily`] for K shifted
//! Inverse-Gamma modes. Each M-step
//! 1. evaluates the [`FisherBundle`] (gradient, block-diagonal Fisher matrix,
//!    objective) at the current parameters under the current Z;
//! 2. asks [`damped_newton_direction`] for `−(H + tol·E)⁻¹ g` with `E` a
//!    random symmetric perturbation drawn from the model's own seeded
//!    generator;
//! 3. backtracks from step 1.0 by factor 0.7, flooring `alpha`/`betta` at
//!    0.1, until the objective does not increase;
//! 4. reverts to the exact pre-step parameters and objective if no step
//!    above 1e-16 is acceptable.
//!
//! A singular damped matrix or non-finite direction is treated like a failed
//! line search: logged at `warn` and reported as a rejected step.
//!
//! The query surface (`pdf`/`cdf`/`ppf` per mode and their mixture
//! counterparts), parameter snapshot, standard errors and the report all
//! read the fitted state and never mutate it.
use crate::{
    diagnostics::{
        gof::KSOutcome,
        plots::{mixture_plot, pp_plot, qq_plot},
    },
    inference::hessian::calc_standard_errors,
    mixture::{
        core::{
            constants::PARAM_FLOOR,
            data::BFactorData,
            distribution::{FittedMixture, ShiftedInverseGamma},
            fisher::{FisherBundle, calc_fisher_matrix},
            init::init_components,
            options::{DEFAULT_MAX_ITER, DEFAULT_N_MODES, DEFAULT_TOL, MixtureOptions},
            params::{IGComponents, MixtureParams},
            responsibilities::Responsibilities,
        },
        errors::{MixtureError, MixtureResult},
        models::base::{EmState, FitOutcome, MixtureFamily, run_em},
    },
    optimization::newton::{
        backtrack::{LineSearchOptions, backtrack},
        damping::damped_newton_direction,
        types::{Cost, Theta},
    },
    report::Report,
};
use log::{debug, info, warn};
use ndarray::{Array1, Array2};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::{Value, json};

/// Shifted Inverse-Gamma mixture fitted by EM with a damped Newton M-step.
///
/// Fields are populated by [`InverseGammaMixture::fit`]; before that the
/// query methods return [`MixtureError::ModelNotFitted`].
#[derive(Debug, Clone)]
pub struct InverseGammaMixture {
    /// Validated run-time options.
    pub options: MixtureOptions,
    /// Backtracking schedule of every M-step.
    pub line_search: LineSearchOptions,
    /// Current component parameters.
    pub components: Option<IGComponents>,
    /// Responsibilities, mode sizes and weights of the last fit.
    pub state: Option<EmState>,
    /// Objective at `components` under `state`.
    pub objective: Option<Cost>,
    /// Outcome of the last fit.
    pub results: Option<FitOutcome>,
    rng: StdRng,
}

impl InverseGammaMixture {
    /// Build an unfitted model. The damping generator is seeded from
    /// `options.seed()`, or from OS entropy when no seed is given.
    pub fn new(options: MixtureOptions) -> Self {
        let rng = match options.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        InverseGammaMixture {
            options,
            line_search: LineSearchOptions::default(),
            components: None,
            state: None,
            objective: None,
            results: None,
            rng,
        }
    }

    /// Fit the mixture to `data`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: observations.
    /// - `z`: initial responsibilities (N × K). Required when K > 1 unless
    ///   the model has already been fitted, in which case the stored Z is
    ///   reused. Ignored for K = 1, where every observation belongs to the
    ///   single mode.
    ///
    /// Returns
    /// -------
    /// The [`FitOutcome`], also stored in `self.results`.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::MissingResponsibilities` when K > 1, `z` is `None`
    ///   and there is no previous fit. Raised before any numeric work.
    /// - `MixtureError::ResponsibilityShapeMismatch` if `z` (or the stored Z
    ///   on resume) is not N × K.
    /// - `MixtureError::EmptyMode` if a mode has no member observation.
    pub fn fit(
        &mut self, data: &BFactorData, z: Option<Responsibilities>,
    ) -> MixtureResult<FitOutcome> {
        self.check_parameters(data, z.as_ref())?;
        let n_modes = self.options.n_modes();
        let mut state = match z {
            _ if n_modes == 1 => EmState::new(Responsibilities::single_mode(data.len())),
            Some(z) => EmState::new(z),
            None => {
                self.state.clone().ok_or(MixtureError::MissingResponsibilities { n_modes })?
            }
        };

        self.objective = None;
        self.init_parameters(data, &state)?;
        let (max_iter, tol) = (self.options.max_iter(), self.options.tol());
        let outcome = run_em(self, data, &mut state, max_iter, tol)?;
        info!(
            "Inverse Gamma mixture ({n_modes} modes) stopped after {} iterations: {} \
             (objective {:.6e} -> {:.6e})",
            outcome.iterations, outcome.status, outcome.initial_objective, outcome.objective
        );

        self.state = Some(state);
        self.results = Some(outcome.clone());
        Ok(outcome)
    }

    /// Snapshot `{mix, alpha, betta, shift}` of the fitted model.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::ModelNotFitted` before [`InverseGammaMixture::fit`].
    pub fn params(&self) -> MixtureResult<MixtureParams> {
        let (comps, state) = self.fitted_parts()?;
        Ok(MixtureParams::from_parts(&state.mix, comps))
    }

    /// The fitted modes with their weights.
    pub fn fitted(&self) -> MixtureResult<FittedMixture> {
        FittedMixture::from_params(&self.params()?)
    }

    /// Per-mode densities, `N × K`.
    pub fn pdf(&self, x: &Array1<f64>) -> MixtureResult<Array2<f64>> {
        let modes = self.modes()?;
        Ok(Array2::from_shape_fn((x.len(), modes.len()), |(i, k)| modes[k].pdf(x[i])))
    }

    /// Per-mode CDFs, `N × K`.
    pub fn cdf(&self, x: &Array1<f64>) -> MixtureResult<Array2<f64>> {
        let modes = self.modes()?;
        Ok(Array2::from_shape_fn((x.len(), modes.len()), |(i, k)| modes[k].cdf(x[i])))
    }

    /// Per-mode quantiles, `N × K`.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::InvalidProbability` if any `p` is outside `[0, 1]`.
    pub fn ppf(&self, p: &Array1<f64>) -> MixtureResult<Array2<f64>> {
        let modes = self.modes()?;
        let mut out = Array2::zeros((p.len(), modes.len()));
        for (i, &pi) in p.iter().enumerate() {
            for (k, mode) in modes.iter().enumerate() {
                out[[i, k]] = mode.ppf(pi)?;
            }
        }
        Ok(out)
    }

    pub fn mixture_pdf(&self, x: &Array1<f64>) -> MixtureResult<Array1<f64>> {
        let fitted = self.fitted()?;
        Ok(x.mapv(|xi| fitted.pdf(xi)))
    }

    pub fn mixture_cdf(&self, x: &Array1<f64>) -> MixtureResult<Array1<f64>> {
        let fitted = self.fitted()?;
        Ok(x.mapv(|xi| fitted.cdf(xi)))
    }

    pub fn mixture_ppf(&self, p: &Array1<f64>) -> MixtureResult<Array1<f64>> {
        let fitted = self.fitted()?;
        p.iter().map(|&pi| fitted.ppf(pi)).collect::<MixtureResult<Vec<_>>>().map(Array1::from)
    }

    /// Standard errors of `(alpha_k, betta_k, shift_k)` in θ layout, from the
    /// observed information of the per-mode objective with Z held fixed.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::ModelNotFitted` before fitting.
    /// - `MixtureError::OptimizationFailed` if the finite-difference
    ///   information is not finite.
    pub fn standard_errors(&self, data: &BFactorData) -> MixtureResult<Array1<f64>> {
        let (comps, state) = self.fitted_parts()?;
        let x = data.values();
        let grad = |theta: &Theta| {
            calc_fisher_matrix(x, &state.z, &state.mix, &IGComponents::from_theta(theta)).gradient
        };
        Ok(calc_standard_errors(&grad, &comps.to_theta())?)
    }

    /// Report with the input echo, fitted parameters, fit diagnostics and the
    /// mixture / P-P / Q-Q plots keyed by `filename` plus `.mixture_igmm`,
    /// `.pp_igmm` and `.qq_igmm`.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::ModelNotFitted` before fitting.
    pub fn report(&self, data: &BFactorData, filename: &str) -> MixtureResult<Report> {
        let params = self.params()?;
        let fitted = FittedMixture::from_params(&params)?;
        let sorted = data.sorted();
        let ks = KSOutcome::kolmogorov_smirnov(&sorted, |x| fitted.cdf(x));
        let ext = self.extension();

        let mut header = vec!["Parameter".to_string()];
        header.extend((1..=params.n_modes()).map(|k| format!("Mode {k}")));
        let numbers = |v: &[f64]| v.iter().map(|&x| json!(x)).collect::<Vec<Value>>();
        let mut rows = vec![
            ("Mix parameters".to_string(), numbers(&params.mix)),
            ("alpha".to_string(), numbers(&params.alpha)),
            ("beta".to_string(), numbers(&params.betta)),
            ("shift".to_string(), numbers(&params.shift)),
        ];
        match self.standard_errors(data) {
            Ok(se) => {
                let per_mode = |offset: usize| {
                    se.iter().skip(offset).step_by(3).map(|&x| json!(x)).collect::<Vec<Value>>()
                };
                rows.push(("alpha s.e.".to_string(), per_mode(0)));
                rows.push(("beta s.e.".to_string(), per_mode(1)));
                rows.push(("shift s.e.".to_string(), per_mode(2)));
            }
            Err(err) => warn!("Standard errors unavailable: {err}"),
        }

        let mut diagnostics = vec![
            vec![json!("KS statistic"), json!(ks.statistic)],
            vec![json!("KS p-value"), json!(ks.p_value)],
        ];
        if let Some(res) = &self.results {
            diagnostics.push(vec![json!("Converged"), json!(res.converged)]);
            diagnostics.push(vec![json!("Iterations"), json!(res.iterations)]);
            diagnostics.push(vec![json!("Objective"), json!(res.objective)]);
            diagnostics.push(vec![json!("Status"), json!(res.status)]);
        }

        Ok(Report::new("Inverse Gamma Mixture")
            .head("Input")
            .vtable(&["Parameter", "Value", "Default"], vec![
                vec![json!("File"), json!(filename), json!("")],
                vec![
                    json!("Number of modes"),
                    json!(self.options.n_modes()),
                    json!(DEFAULT_N_MODES),
                ],
                vec![json!("Tolerance"), json!(self.options.tol()), json!(DEFAULT_TOL)],
                vec![
                    json!("Maximum Iterations"),
                    json!(self.options.max_iter()),
                    json!(DEFAULT_MAX_ITER),
                ],
            ])
            .head("Output")
            .htable(header, rows)
            .vtable(&["Diagnostic", "Value"], diagnostics)
            .image(
                format!("{filename}.mixture{ext}"),
                mixture_plot(&sorted, &fitted, &format!("Inverse Gamma Mixture: {filename}")),
            )
            .image(
                format!("{filename}.pp{ext}"),
                pp_plot(&sorted, &fitted, &format!("P-P Plot: {filename}")),
            )
            .image(
                format!("{filename}.qq{ext}"),
                qq_plot(&sorted, &fitted, &format!("Q-Q Plot: {filename}"))?,
            ))
    }

    /// Backtrack along `direction` from the current components.
    ///
    /// Returns `true` and stores the accepted components and objective, or
    /// restores the pre-step components and `reference` and returns `false`.
    pub(crate) fn line_search(
        &mut self, data: &BFactorData, state: &EmState, direction: &Theta, reference: Cost,
    ) -> MixtureResult<bool> {
        let current = self.components.clone().ok_or(MixtureError::ModelNotFitted)?;
        let x = data.values();
        let outcome = backtrack(&self.line_search, reference, |step| {
            let candidate = current.propose(direction, step, PARAM_FLOOR);
            calc_fisher_matrix(x, &state.z, &state.mix, &candidate).loglike
        });

        if outcome.accepted {
            debug!(
                "Newton step accepted at step {:.3e} after {} trials: {:.10e} -> {:.10e}",
                outcome.step, outcome.trials, reference, outcome.value
            );
            self.components = Some(current.propose(direction, outcome.step, PARAM_FLOOR));
            self.objective = Some(outcome.value);
            Ok(true)
        } else {
            warn!("Newton step reverted after {} trials", outcome.trials);
            self.components = Some(current);
            self.objective = Some(reference);
            Ok(false)
        }
    }

    // ---- Helper methods ----

    fn fitted_parts(&self) -> MixtureResult<(&IGComponents, &EmState)> {
        match (&self.components, &self.state) {
            (Some(comps), Some(state)) => Ok((comps, state)),
            _ => Err(MixtureError::ModelNotFitted),
        }
    }

    fn modes(&self) -> MixtureResult<Vec<ShiftedInverseGamma>> {
        let comps = self.components.as_ref().ok_or(MixtureError::ModelNotFitted)?;
        (0..comps.n_modes())
            .map(|k| {
                let (alpha, betta, shift) = comps.mode(k);
                ShiftedInverseGamma::new(alpha, betta, shift)
            })
            .collect()
    }

    fn bundle(&self, data: &BFactorData, state: &EmState) -> MixtureResult<FisherBundle> {
        let comps = self.components.as_ref().ok_or(MixtureError::ModelNotFitted)?;
        Ok(calc_fisher_matrix(data.values(), &state.z, &state.mix, comps))
    }
}

impl MixtureFamily for InverseGammaMixture {
    fn extension(&self) -> &'static str {
        "_igmm"
    }

    fn n_modes(&self) -> usize {
        self.options.n_modes()
    }

    fn check_parameters(
        &self, data: &BFactorData, z: Option<&Responsibilities>,
    ) -> MixtureResult<()> {
        let n_modes = self.options.n_modes();
        match (z, &self.state) {
            (Some(z), _) => z.check_shape(data.len(), n_modes),
            _ if n_modes == 1 => Ok(()),
            (None, Some(state)) => state.z.check_shape(data.len(), n_modes),
            (None, None) => Err(MixtureError::MissingResponsibilities { n_modes }),
        }
    }

    fn init_parameters(&mut self, data: &BFactorData, state: &EmState) -> MixtureResult<()> {
        let comps = init_components(data, &state.z)?;
        let objective = calc_fisher_matrix(data.values(), &state.z, &state.mix, &comps).loglike;
        debug!("initial parameters {comps:?}, objective {objective:.10e}");
        self.components = Some(comps);
        self.objective = Some(objective);
        Ok(())
    }

    fn m_step(&mut self, data: &BFactorData, state: &EmState) -> MixtureResult<bool> {
        let bundle = self.bundle(data, state)?;
        self.objective = Some(bundle.loglike);
        let direction = match damped_newton_direction(
            &bundle.hessian,
            &bundle.gradient,
            self.options.tol(),
            &mut self.rng,
        ) {
            Ok(direction) => direction,
            Err(err) => {
                warn!("Newton direction unavailable, step skipped: {err}");
                return Ok(false);
            }
        };
        self.line_search(data, state, &direction, bundle.loglike)
    }

    fn refresh_objective(&mut self, data: &BFactorData, state: &EmState) -> MixtureResult<Cost> {
        let objective = self.bundle(data, state)?.loglike;
        self.objective = Some(objective);
        Ok(objective)
    }

    fn objective(&self) -> Option<Cost> {
        self.objective
    }

    fn component_pdf(&self, k: usize, x: f64) -> f64 {
        self.components
            .as_ref()
            .and_then(|comps| {
                let (alpha, betta, shift) = comps.mode(k);
                ShiftedInverseGamma::new(alpha, betta, shift).ok()
            })
            .map_or(0.0, |mode| mode.pdf(x))
    }
}
