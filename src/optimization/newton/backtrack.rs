//! newton::backtrack — shrink-until-no-worse line search.
//!
//! Purpose
//! -------
//! Find the largest step along a fixed direction whose objective does not
//! exceed a reference value. The objective is supplied as a closure over the
//! step size, so the search is independent of how candidates are built
//! (clamping, reshaping, etc. live with the caller).
//!
//! Key behaviors
//! -------------
//! - Start at `initial_step`, evaluate, and accept as soon as the candidate
//!   objective is `<=` the reference.
//! - Otherwise multiply the step by `shrink` and retry.
//! - Give up once the step falls to `min_step` or below; the outcome then
//!   reports `accepted = false` and the reference value, and the caller is
//!   expected to restore its pre-step state.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < min_step < initial_step` and `0 < shrink < 1` (validated by
//!   [`LineSearchOptions::new`]), so the loop terminates after at most
//!   `⌈ln(min_step / initial_step) / ln(shrink)⌉` evaluations.
//! - Non-finite candidate objectives never compare `<=` the reference and are
//!   therefore treated as worse.
use crate::optimization::{
    errors::{OptError, OptResult},
    newton::types::Cost,
};

/// Default first trial step.
pub const DEFAULT_INITIAL_STEP: f64 = 1.0;
/// Default multiplicative shrink factor applied after a rejected trial.
pub const DEFAULT_SHRINK: f64 = 0.7;
/// Default step floor; reaching it aborts the search.
pub const DEFAULT_MIN_STEP: f64 = 1e-16;

/// Step schedule for [`backtrack`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchOptions {
    pub initial_step: f64,
    pub shrink: f64,
    pub min_step: f64,
}

impl LineSearchOptions {
    /// Construct a validated step schedule.
    ///
    /// # Errors
    /// - [`OptError::InvalidStepSchedule`] if any value is non-finite, if
    ///   `min_step <= 0`, if `initial_step <= min_step`, or if `shrink` is
    ///   outside `(0, 1)`.
    pub fn new(initial_step: f64, shrink: f64, min_step: f64) -> OptResult<Self> {
        if !min_step.is_finite() || min_step <= 0.0 {
            return Err(OptError::InvalidStepSchedule {
                value: min_step,
                reason: "Minimum step must be finite and > 0.",
            });
        }
        if !initial_step.is_finite() || initial_step <= min_step {
            return Err(OptError::InvalidStepSchedule {
                value: initial_step,
                reason: "Initial step must be finite and larger than the minimum step.",
            });
        }
        if !shrink.is_finite() || shrink <= 0.0 || shrink >= 1.0 {
            return Err(OptError::InvalidStepSchedule {
                value: shrink,
                reason: "Shrink factor must lie strictly between 0 and 1.",
            });
        }
        Ok(Self { initial_step, shrink, min_step })
    }
}

impl Default for LineSearchOptions {
    fn default() -> Self {
        Self { initial_step: DEFAULT_INITIAL_STEP, shrink: DEFAULT_SHRINK, min_step: DEFAULT_MIN_STEP }
    }
}

/// Result of a [`backtrack`] run.
///
/// - `accepted`: whether a step with objective `<=` reference was found.
/// - `step`: the accepted step, or the last (sub-floor) step when rejected.
/// - `value`: the accepted objective, or the reference when rejected.
/// - `trials`: number of objective evaluations performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchOutcome {
    pub accepted: bool,
    pub step: f64,
    pub value: Cost,
    pub trials: usize,
}

/// backtrack — shrink the step until the objective does not increase.
///
/// Parameters
/// ----------
/// - `opts`: step schedule.
/// - `reference`: objective before the step.
/// - `eval`: maps a step size to the candidate objective.
///
/// Returns
/// -------
/// `LineSearchOutcome`
///   Accepted step and value, or `accepted = false` with the reference.
pub fn backtrack<F>(opts: &LineSearchOptions, reference: Cost, mut eval: F) -> LineSearchOutcome
where
    F: FnMut(f64) -> Cost,
{
    let mut step = opts.initial_step;
    let mut trials = 0;
    loop {
        trials += 1;
        let value = eval(step);
        if value <= reference {
            return LineSearchOutcome { accepted: true, step, value, trials };
        }
        step *= opts.shrink;
        if step <= opts.min_step {
            return LineSearchOutcome { accepted: false, step, value: reference, trials };
        }
    }
}
