//! newton::damping — randomly damped Newton directions.
//!
//! Purpose
//! -------
//! Turn a (possibly singular or ill-conditioned) Hessian and a gradient into a
//! Newton direction `d = -(H + tol·E)⁻¹ g`, where `E` is a symmetric matrix of
//! standard-normal draws. The perturbation regularizes `H` in a stochastic
//! Levenberg–Marquardt fashion.
//!
//! Key behaviors
//! -------------
//! - Copy the `ndarray` Hessian into a `nalgebra::DMatrix` ([`fill_dmatrix`]).
//! - Add a symmetric perturbation scaled by `tol`, drawn from a caller-owned
//!   random source ([`add_symmetric_noise`]).
//! - Invert the damped matrix and apply it to the gradient.
//!
//! Invariants & assumptions
//! ------------------------
//! - `hessian` is square with dimension `grad.len()`.
//! - The random source is injected; two calls with identically seeded
//!   generators produce identical directions.
//!
//! Conventions
//! -----------
//! - The direction is a *descent* direction for the objective whose gradient
//!   is `grad` whenever the damped Hessian is positive definite.
//! - Failures are reported as [`OptError::InvalidGradient`],
//!   [`OptError::SingularHessian`] or [`OptError::NonFiniteDirection`]; callers in the mixture layer treat both
//!   as a rejected step rather than a hard error.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact recovery of `-H⁻¹g` with `tol = 0`, determinism
//!   under a fixed seed, symmetry of the perturbation, and the error paths.
use crate::optimization::{
    errors::{OptError, OptResult},
    newton::types::{Grad, Hessian},
};
use nalgebra::{DMatrix, DVector};
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// damped_newton_direction — `-(H + tol·E)⁻¹ g` with symmetric random `E`.
///
/// Parameters
/// ----------
/// - `hessian`: `&Hessian`
///   Square `n×n` Hessian (or Fisher) matrix of the objective.
/// - `grad`: `&Grad`
///   Length-`n` gradient of the objective.
/// - `tol`: `f64`
///   Scale of the random perturbation. `0.0` disables damping.
/// - `rng`: `&mut R`
///   Random source for the perturbation.
///
/// Returns
/// -------
/// `OptResult<Grad>`
///   The Newton direction in the same layout as `grad`.
///
/// Errors
/// ------
/// - `OptError::HessianDimMismatch` if `hessian` is not `n×n`.
/// - `OptError::InvalidGradient` if `grad` contains NaN/±inf.
/// - `OptError::SingularHessian` if the damped matrix cannot be inverted.
/// - `OptError::NonFiniteDirection` if the direction contains NaN/±inf.
pub fn damped_newton_direction<R: Rng + ?Sized>(
    hessian: &Hessian, grad: &Grad, tol: f64, rng: &mut R,
) -> OptResult<Grad> {
    let n = grad.len();
    if hessian.nrows() != n || hessian.ncols() != n {
        return Err(OptError::HessianDimMismatch {
            expected: n,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    validate_gradient(grad)?;
    let mut damped = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(hessian, &mut damped);
    add_symmetric_noise(&mut damped, tol, rng);

    let inverse = damped.try_inverse().ok_or(OptError::SingularHessian { dim: n })?;
    let g = DVector::from_iterator(n, grad.iter().copied());
    let step = -(inverse * g);

    let direction: Grad = Array1::from_iter(step.iter().copied());
    validate_direction(&direction)?;
    Ok(direction)
}

// ---- Helper methods ----

/// fill_dmatrix — copy an `ndarray` matrix into a preallocated `DMatrix`.
///
/// The copy walks the lower triangle column by column (matching `DMatrix`'s
/// column-major storage) and writes both `(i, j)` and `(j, i)`. No
/// symmetrization is performed; asymmetry in the input is preserved.
///
/// Panics
/// ------
/// - May panic if the two matrices have different shapes.
pub(crate) fn fill_dmatrix(src: &Hessian, dst: &mut DMatrix<f64>) {
    let n = src.ncols();
    for j in 0..n {
        for i in j..n {
            if j == i {
                dst[(i, i)] = src[[i, i]];
            } else {
                dst[(i, j)] = src[[i, j]];
                dst[(j, i)] = src[[j, i]];
            }
        }
    }
}

/// Add `tol·E` to `m`, where `E` is symmetric with i.i.d. N(0, 1) entries on
/// and above the diagonal.
fn add_symmetric_noise<R: Rng + ?Sized>(m: &mut DMatrix<f64>, tol: f64, rng: &mut R) {
    if tol == 0.0 {
        return;
    }
    let n = m.nrows();
    for i in 0..n {
        for j in i..n {
            let draw: f64 = StandardNormal.sample(rng);
            let e = tol * draw;
            m[(i, j)] += e;
            if i != j {
                m[(j, i)] += e;
            }
        }
    }
}

fn validate_gradient(grad: &Grad) -> OptResult<()> {
    match grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

fn validate_direction(direction: &Grad) -> OptResult<()> {
    match direction.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::NonFiniteDirection { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};
    use rand::{SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact Newton directions when damping is disabled.
    // - Reproducibility of damped directions under a fixed seed.
    // - Symmetry of the injected perturbation.
    // - Dimension, singularity and finiteness error paths.
    //
    // They intentionally DO NOT cover:
    // - Line-search acceptance (see `newton::backtrack`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // With `tol = 0` the direction must equal `-H⁻¹ g` exactly.
    //
    // Given
    // -----
    // - H = diag(4, 2), g = [8, -2].
    //
    // Expect
    // ------
    // - d = [-2, 1].
    fn undamped_direction_matches_analytic_newton_step() {
        let h: Array2<f64> = array![[4.0, 0.0], [0.0, 2.0]];
        let g = array![8.0, -2.0];
        let mut rng = StdRng::seed_from_u64(7);

        let d = damped_newton_direction(&h, &g, 0.0, &mut rng).unwrap();

        assert!((d[0] + 2.0).abs() < 1e-12);
        assert!((d[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Two generators with the same seed must yield the same damped direction,
    // and a small `tol` must only slightly move the undamped answer.
    fn damped_direction_is_reproducible_under_fixed_seed() {
        let h: Array2<f64> = array![[3.0, 0.5, 0.0], [0.5, 2.0, 0.1], [0.0, 0.1, 1.0]];
        let g = array![1.0, -1.0, 0.5];

        let d1 = damped_newton_direction(&h, &g, 1e-5, &mut StdRng::seed_from_u64(42)).unwrap();
        let d2 = damped_newton_direction(&h, &g, 1e-5, &mut StdRng::seed_from_u64(42)).unwrap();
        let exact = damped_newton_direction(&h, &g, 0.0, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(d1, d2);
        for (a, b) in d1.iter().zip(exact.iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    // Purpose
    // -------
    // The perturbation must be symmetric so that a symmetric Hessian stays
    // symmetric after damping.
    fn symmetric_noise_preserves_symmetry() {
        let mut m = DMatrix::<f64>::zeros(4, 4);
        let mut rng = StdRng::seed_from_u64(3);

        add_symmetric_noise(&mut m, 0.5, &mut rng);

        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m[(i, j)], m[(j, i)]);
            }
        }
        assert!(m.iter().any(|v| *v != 0.0));
    }

    #[test]
    // Purpose
    // -------
    // A zero Hessian without damping is singular and must be reported as such.
    fn zero_hessian_without_damping_is_singular() {
        let h: Array2<f64> = Array2::zeros((3, 3));
        let g = array![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(1);

        let err = damped_newton_direction(&h, &g, 0.0, &mut rng).unwrap_err();

        assert_eq!(err, OptError::SingularHessian { dim: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Shape mismatches between Hessian and gradient are rejected up front.
    fn mismatched_dimensions_are_rejected() {
        let h: Array2<f64> = Array2::eye(2);
        let g = array![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(1);

        let err = damped_newton_direction(&h, &g, 0.0, &mut rng).unwrap_err();

        assert_eq!(err, OptError::HessianDimMismatch { expected: 3, found: (2, 2) });
    }

    #[test]
    // Purpose
    // -------
    // A NaN gradient is rejected before any inversion, with its index.
    fn nan_gradient_is_rejected_up_front() {
        let h: Array2<f64> = Array2::eye(2);
        let g = array![1.0, f64::NAN];
        let mut rng = StdRng::seed_from_u64(1);

        let err = damped_newton_direction(&h, &g, 0.0, &mut rng).unwrap_err();

        assert!(matches!(err, OptError::InvalidGradient { index: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // A finite but overflowing step `-g / h` is reported as a non-finite
    // direction.
    fn overflowing_step_yields_non_finite_direction() {
        let h = array![[1e-300]];
        let g = array![1e300];
        let mut rng = StdRng::seed_from_u64(1);

        let err = damped_newton_direction(&h, &g, 0.0, &mut rng).unwrap_err();

        assert_eq!(err, OptError::NonFiniteDirection { index: 0, value: f64::NEG_INFINITY });
    }

    #[test]
    fn fill_dmatrix_copies_ndarray_into_dmatrix_without_modification() {
        let src: Array2<f64> = array![[2.0, 0.5], [0.25, 1.0]];
        let mut dst = DMatrix::<f64>::zeros(2, 2);

        fill_dmatrix(&src, &mut dst);

        assert_eq!(dst[(0, 0)], 2.0);
        assert_eq!(dst[(0, 1)], 0.5);
        assert_eq!(dst[(1, 0)], 0.25);
        assert_eq!(dst[(1, 1)], 1.0);
    }
}
