//! inference::hessian — observed-information standard errors.
//!
//! Purpose
//! -------
//! Turn an analytic gradient map into standard errors at a fitted parameter
//! vector: differentiate the gradient once more by central finite
//! differences, symmetrize, and read variances off an eigen-truncated
//! pseudoinverse.
//!
//! Key behaviors
//! -------------
//! - [`observed_information`] builds `J(θ̂)` with `finitediff`'s central
//!   Hessian, falling back to the forward Hessian when the central one has
//!   non-finite entries, then averages `J` with its transpose.
//! - [`calc_standard_errors`] returns `sqrt(diag(J⁺))`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The gradient map is that of an objective being *minimized* (negative
//!   log-likelihood), so `J(θ̂)` is positive semi-definite near a minimum.
//! - Eigenvalues `λ ≤ EIGEN_EPS` are dropped, which inflates standard errors
//!   along weakly identified directions instead of failing.
//!
//! Conventions
//! -----------
//! - No explicit inverse is formed.
//! - Errors are reported via [`OptResult<T>`].
//!
//! Downstream usage
//! ----------------
//! - `InverseGammaMixture::standard_errors` passes the θ-layout gradient of
//!   `calc_fisher_matrix` with Z and mix held fixed.
use crate::optimization::{
    errors::{OptError, OptResult},
    newton::{
        damping::fill_dmatrix,
        types::{Grad, Hessian, Theta},
    },
    numerical_stability::EIGEN_EPS,
};
use finitediff::FiniteDiff;
use nalgebra::DMatrix;
use ndarray::Array1;

/// calc_standard_errors — standard errors from observed information.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Gradient map `θ ↦ ∇f(θ)` of the minimized objective.
/// - `theta_hat`: `&Theta`
///   Point at which the information is evaluated.
///
/// Returns
/// -------
/// `OptResult<Array1<f64>>`
///   Length-`n` vector of standard errors in the order of `theta_hat`.
///
/// Errors
/// ------
/// - `OptError::InvalidHessian` if neither finite-difference Hessian is
///   finite.
/// - `OptError::HessianDimMismatch` if the gradient map returns a vector of
///   the wrong length.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use bfactor_mixtures::inference::hessian::calc_standard_errors;
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let f = |theta: &ndarray::Array1<f64>| a.dot(theta);
/// let se = calc_standard_errors(&f, &array![1.0, -1.0]).unwrap();
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// ```
pub fn calc_standard_errors<F: Fn(&Theta) -> Grad>(
    f: &F, theta_hat: &Theta,
) -> OptResult<Array1<f64>> {
    let n = theta_hat.len();
    let obs_info = observed_information(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    Ok(solve_for_se(obs_info_nalg, n))
}

/// observed_information — symmetrized finite-difference Jacobian of `f`.
///
/// Errors
/// ------
/// - As for [`calc_standard_errors`].
pub fn observed_information<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

fn validate_hessian(hess: &Hessian, dim: usize) -> OptResult<()> {
    if hess.nrows() != dim || hess.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hess.nrows(), hess.ncols()),
        });
    }
    if let Some(((row, col), &value)) = hess.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidHessian { row, col, value });
    }
    Ok(())
}

fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

/// `SE_i = sqrt(Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k)` with `J = Q Λ Qᵀ`.
fn solve_for_se(obs_info_nalg: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen = obs_info_nalg.symmetric_eigen();
    let q = eigen.eigenvectors;
    Array1::from_shape_fn(n, |i| {
        eigen
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum::<f64>()
            .sqrt()
    })
}
