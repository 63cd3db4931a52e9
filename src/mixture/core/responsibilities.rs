//! Responsibility matrix Z for mixture fits.
//!
//! Purpose
//! -------
//! Hold the N × K soft-assignment matrix of observations to modes together
//! with the validation that every fit relies on.
//!
//! Key behaviors
//! -------------
//! - [`Responsibilities::new`] validates entries (finite, in `[0, 1]`) and
//!   row sums (`|Σ_k Z[n,k] − 1| <= ROW_SUM_TOL`).
//! - [`Responsibilities::single_mode`] builds the K = 1 matrix of ones.
//! - [`Responsibilities::from_labels`] builds a hard (one-hot) assignment.
//! - [`Responsibilities::column_sums`] yields N_k.
//!
//! Invariants & assumptions
//! ------------------------
//! - After construction the invariants hold for the lifetime of the value;
//!   the E-step only replaces whole rows with normalized probabilities.
use crate::mixture::errors::{MixtureError, MixtureResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Allowed deviation of a row sum from 1.
pub const ROW_SUM_TOL: f64 = 1e-6;

/// `Responsibilities` — validated N × K posterior membership matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Responsibilities {
    z: Array2<f64>,
}

impl Responsibilities {
    /// Construct validated responsibilities.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::ResponsibilityShapeMismatch` if the matrix has no rows
    ///   or no columns.
    /// - `MixtureError::InvalidResponsibility` for an entry that is non-finite
    ///   or outside `[0, 1]`.
    /// - `MixtureError::RowSumMismatch` for a row that does not sum to 1.
    pub fn new(z: Array2<f64>) -> MixtureResult<Self> {
        let (n, k) = z.dim();
        if n == 0 || k == 0 {
            return Err(MixtureError::ResponsibilityShapeMismatch {
                expected: (n.max(1), k.max(1)),
                found: (n, k),
            });
        }
        for (row, values) in z.outer_iter().enumerate() {
            let mut sum = 0.0;
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(MixtureError::InvalidResponsibility { row, col, value });
                }
                sum += value;
            }
            if (sum - 1.0).abs() > ROW_SUM_TOL {
                return Err(MixtureError::RowSumMismatch { row, sum });
            }
        }
        Ok(Responsibilities { z })
    }

    /// All-ones N × 1 matrix used for single-mode fits.
    pub fn single_mode(n: usize) -> Self {
        Responsibilities { z: Array2::ones((n, 1)) }
    }

    /// Hard assignment: row `n` is the unit vector of `labels[n]`.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::InvalidModeCount` if `n_modes == 0` or a label is
    ///   `>= n_modes`.
    pub fn from_labels(labels: &[usize], n_modes: usize) -> MixtureResult<Self> {
        if n_modes == 0 {
            return Err(MixtureError::InvalidModeCount {
                n_modes,
                reason: "Number of modes must be at least 1.",
            });
        }
        let mut z = Array2::zeros((labels.len(), n_modes));
        for (row, &label) in labels.iter().enumerate() {
            if label >= n_modes {
                return Err(MixtureError::InvalidModeCount {
                    n_modes,
                    reason: "Label exceeds the number of modes.",
                });
            }
            z[[row, label]] = 1.0;
        }
        Responsibilities::new(z)
    }

    /// Check that this matrix has shape `(n_obs, n_modes)`.
    pub fn check_shape(&self, n_obs: usize, n_modes: usize) -> MixtureResult<()> {
        if self.z.dim() != (n_obs, n_modes) {
            return Err(MixtureError::ResponsibilityShapeMismatch {
                expected: (n_obs, n_modes),
                found: self.z.dim(),
            });
        }
        Ok(())
    }

    /// N_k = Σ_n Z[n, k].
    pub fn column_sums(&self) -> Array1<f64> {
        self.z.sum_axis(ndarray::Axis(0))
    }

    pub fn n_obs(&self) -> usize {
        self.z.nrows()
    }

    pub fn n_modes(&self) -> usize {
        self.z.ncols()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.z.view()
    }

    /// Responsibilities of all observations for mode `k`.
    pub fn column(&self, k: usize) -> ArrayView1<'_, f64> {
        self.z.column(k)
    }

    /// Replace row `n` with already-normalized probabilities.
    pub(crate) fn set_row(&mut self, n: usize, probs: &[f64]) {
        for (k, &p) in probs.iter().enumerate() {
            self.z[[n, k]] = p;
        }
    }
}
