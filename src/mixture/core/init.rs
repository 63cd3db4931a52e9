//! Parameter initializer for shifted Inverse-Gamma mixtures.
//!
//! Purpose
//! -------
//! Produce starting values `(alpha_k, betta_k, shift_k)` for every mode from
//! the observations and the responsibility matrix Z.
//!
//! Key behaviors
//! -------------
//! Per mode k:
//! - weighted mean `mdB_k = Σ_n Z[n,k]·x_n / N_k`;
//! - `min_k` = smallest observation with `Z[n,k] > MEMBERSHIP_THRESHOLD`;
//! - `shift_k = min_k − SHIFT_MARGIN·(mdB_k − min_k)`, falling back to
//!   `min_k − SHIFT_MARGIN·max(|min_k|, 1)` when the mean does not exceed the
//!   minimum;
//! - `shift_k` is then capped at `min_k − max(|min_k|, 1)·ε` so that it stays
//!   at least one ulp below `min_k` when the margin is lost to rounding;
//! - `alpha_k = ALPHA_PRIOR_TARGET`;
//! - `betta_k = (mdB_k − shift_k)·(alpha_k − 1)`, floored at `PARAM_FLOOR`,
//!   which inverts the Inverse-Gamma mean `shift + betta / (alpha − 1)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - On success, `shift_k < min_k` strictly and `alpha_k = 3.5` for all k.
//! - Z has already been shape-checked against the data.
use crate::mixture::{
    core::{
        constants::{ALPHA_PRIOR_TARGET, MEMBERSHIP_THRESHOLD, PARAM_FLOOR, SHIFT_MARGIN},
        data::BFactorData,
        params::IGComponents,
        responsibilities::Responsibilities,
    },
    errors::{MixtureError, MixtureResult},
};
use ndarray::Array1;

/// init_components — initial per-mode parameters from data and Z.
///
/// Errors
/// ------
/// - `MixtureError::EmptyMode { mode }` if a mode has zero total
///   responsibility or no observation above the membership threshold.
pub fn init_components(data: &BFactorData, z: &Responsibilities) -> MixtureResult<IGComponents> {
    let x = data.values();
    let k = z.n_modes();
    let n_k = z.column_sums();

    let alpha = Array1::from_elem(k, ALPHA_PRIOR_TARGET);
    let mut betta = Array1::zeros(k);
    let mut shift = Array1::zeros(k);

    for mode in 0..k {
        if n_k[mode] <= 0.0 {
            return Err(MixtureError::EmptyMode { mode });
        }
        let zk = z.column(mode);
        let mean = zk.dot(x) / n_k[mode];
        let min = x
            .iter()
            .zip(zk.iter())
            .filter(|(_, w)| **w > MEMBERSHIP_THRESHOLD)
            .map(|(&v, _)| v)
            .fold(f64::INFINITY, f64::min);
        if !min.is_finite() {
            return Err(MixtureError::EmptyMode { mode });
        }

        shift[mode] = initial_shift(mean, min);
        betta[mode] = ((mean - shift[mode]) * (ALPHA_PRIOR_TARGET - 1.0)).max(PARAM_FLOOR);
    }

    Ok(IGComponents::new(alpha, betta, shift))
}

/// Shift strictly below `min`, even when `min − margin` rounds back to `min`.
fn initial_shift(mean: f64, min: f64) -> f64 {
    let spread = mean - min;
    let margin =
        if spread > 0.0 { SHIFT_MARGIN * spread } else { SHIFT_MARGIN * min.abs().max(1.0) };
    (min - margin).min(min - min.abs().max(1.0) * f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::core::fisher::SufficientStats;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The single-mode scenario with hand-computed values.
    // - Per-mode minima under a hard two-mode assignment.
    // - Degenerate modes (constant data, near-constant data, empty
    //   membership).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the initializer on a small single-mode sample.
    //
    // Given
    // -----
    // - x = [1.0, 1.2, 1.5, 2.0, 3.0, 5.0], Z = 1.
    //
    // Expect
    // ------
    // - mean = 13.7 / 6, shift = 1 − 0.01·(mean − 1) < 1,
    //   alpha = 3.5, betta = (mean − shift)·2.5.
    fn single_mode_scenario_matches_hand_computation() {
        let data = BFactorData::new(array![1.0, 1.2, 1.5, 2.0, 3.0, 5.0]).unwrap();
        let z = Responsibilities::single_mode(6);

        let comps = init_components(&data, &z).unwrap();

        let mean = 13.7 / 6.0;
        let shift = 1.0 - 0.01 * (mean - 1.0);
        assert!(comps.shift[0] < 1.0);
        assert!((comps.shift[0] - shift).abs() < 1e-12);
        assert_eq!(comps.alpha[0], 3.5);
        assert!((comps.betta[0] - (mean - shift) * 2.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // With a hard split each mode's shift sits just below its own minimum.
    fn two_modes_use_their_own_minima() {
        let data = BFactorData::new(array![10.0, 50.0, 12.0, 60.0, 11.0, 55.0]).unwrap();
        let z = Responsibilities::from_labels(&[0, 1, 0, 1, 0, 1], 2).unwrap();

        let comps = init_components(&data, &z).unwrap();

        assert!(comps.shift[0] < 10.0 && comps.shift[0] > 9.0);
        assert!(comps.shift[1] < 50.0 && comps.shift[1] > 49.0);
        assert!(comps.alpha.iter().all(|&a| a == 3.5));
        assert!(comps.betta.iter().all(|&b| b >= 0.1));
    }

    #[test]
    fn constant_data_uses_fallback_margin() {
        let data = BFactorData::new(array![20.0, 20.0, 20.0]).unwrap();
        let z = Responsibilities::single_mode(3);

        let comps = init_components(&data, &z).unwrap();

        assert!((comps.shift[0] - 19.8).abs() < 1e-12);
        assert!((comps.betta[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A relative margin far below one ulp of the minimum must not collapse
    // the shift onto the minimum.
    //
    // Given
    // -----
    // - x = [100, 100 + 1e-12] and x = [1e16, 1e16 + 4], Z = 1.
    //
    // Expect
    // ------
    // - shift < min strictly, and the minimum contributes to the sufficient
    //   statistics of the initial parameters.
    fn near_constant_data_keeps_shift_strictly_below_minimum() {
        for values in [array![100.0, 100.0 + 1e-12], array![1e16, 1e16 + 4.0]] {
            let min = values[0];
            let data = BFactorData::new(values).unwrap();
            let z = Responsibilities::single_mode(2);

            let comps = init_components(&data, &z).unwrap();

            assert!(comps.shift[0] < min, "shift {} vs min {min}", comps.shift[0]);
            let stats = SufficientStats::collect(data.values(), z.column(0), comps.shift[0]);
            assert_eq!(stats.excluded, 0);
            assert!(comps.betta[0] >= 0.1);
        }
    }

    #[test]
    fn mode_without_members_is_rejected() {
        let data = BFactorData::new(array![1.0, 2.0]).unwrap();
        let z = Responsibilities::new(array![[0.95, 0.05], [0.95, 0.05]]).unwrap();

        let err = init_components(&data, &z).unwrap_err();

        assert_eq!(err, MixtureError::EmptyMode { mode: 1 });
    }
}
