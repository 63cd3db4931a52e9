//! B-factor observation container.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the observation vector fitted by
//! the mixture models. Validation happens once at the boundary so the numeric
//! core can assume clean input.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are **strictly positive** and **finite**.
//! - The vector is non-empty and immutable after construction.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejection branch of
//!   [`BFactorData::new`].
use crate::mixture::errors::{MixtureError, MixtureResult};
use ndarray::Array1;

/// `BFactorData` — validated per-atom B-factor values.
///
/// Fields
/// ------
/// - `data`: `Array1<f64>`
///   One value per atom with positive occupancy, in input order.
///
/// Invariants
/// ----------
/// - `data.len() > 0`; every entry is finite and > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BFactorData {
    data: Array1<f64>,
}

impl BFactorData {
    /// Construct a validated [`BFactorData`] from raw values.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::EmptyData` when `data.len() == 0`.
    /// - `MixtureError::NonFiniteData { index, value }` for the first NaN/±∞.
    /// - `MixtureError::NonPositiveData { index, value }` for the first value
    ///   ≤ 0.
    pub fn new(data: Array1<f64>) -> MixtureResult<Self> {
        if data.is_empty() {
            return Err(MixtureError::EmptyData);
        }
        for (index, &value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(MixtureError::NonFiniteData { index, value });
            }
            if value <= 0.0 {
                return Err(MixtureError::NonPositiveData { index, value });
            }
        }
        Ok(BFactorData { data })
    }

    /// Read-only view of the observations.
    pub fn values(&self) -> &Array1<f64> {
        &self.data
    }

    /// Number of observations N.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for validated data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Observations sorted ascending (used by P-P/Q-Q diagnostics).
    pub fn sorted(&self) -> Vec<f64> {
        let mut v = self.data.to_vec();
        v.sort_by(|a, b| a.total_cmp(b));
        v
    }
}

impl TryFrom<Vec<f64>> for BFactorData {
    type Error = MixtureError;

    fn try_from(value: Vec<f64>) -> MixtureResult<Self> {
        BFactorData::new(Array1::from(value))
    }
}
