//! Errors for B-factor mixture models (data validation, configuration and
//! responsibility checks, query-surface inputs, ingest failures, and
//! optimizer failures).
//!
//! This module defines the model error type, [`MixtureError`], used across the
//! public API and the internal numeric core.
//!
//! ## Conventions
//! - **Indices are 0-based**; `row` is an observation index, `col`/`mode` a
//!   mixture component index.
//! - Observations must be **strictly positive and finite**.
//! - Numerical trouble inside a Newton step (singular damped Hessian,
//!   non-finite direction) is *not* an error at this layer: the M-step reverts
//!   and reports "not converged". Only failures outside that recovery path are
//!   normalized to [`MixtureError::OptimizationFailed`].
use crate::optimization::errors::OptError;
use statrs::distribution::InverseGammaError;

/// Crate-wide result alias for mixture operations that may produce
/// [`MixtureError`].
pub type MixtureResult<T> = Result<T, MixtureError>;

/// Unified error type for mixture modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum MixtureError {
    // ---- Input/data validation ----
    /// Observation vector is empty.
    EmptyData,

    /// An observation is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// An observation is ≤ 0.
    NonPositiveData { index: usize, value: f64 },

    // ---- Options validation ----
    /// Number of modes must be ≥ 1.
    InvalidModeCount { n_modes: usize, reason: &'static str },

    /// Tolerance must be finite and > 0.
    InvalidTolerance { tol: f64, reason: &'static str },

    /// Iteration cap must be > 0.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    // ---- Responsibilities ----
    /// More than one mode requested without responsibilities and no fit to
    /// resume from.
    MissingResponsibilities { n_modes: usize },

    /// Responsibility matrix does not have shape (N, K).
    ResponsibilityShapeMismatch { expected: (usize, usize), found: (usize, usize) },

    /// Responsibility entries must be finite and lie in [0, 1].
    InvalidResponsibility { row: usize, col: usize, value: f64 },

    /// Responsibility rows must sum to 1.
    RowSumMismatch { row: usize, sum: f64 },

    /// No observation is assigned to this mode above the membership threshold.
    EmptyMode { mode: usize },

    // ---- Query surface ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,

    /// Quantile input must lie in [0, 1].
    InvalidProbability { value: f64 },

    /// Wrapper for statrs::distribution::InverseGammaError.
    InvalidDistribution { text: String },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    // ---- Ingest ----
    /// A coordinate record could not be parsed.
    MalformedRecord { line: usize, reason: String },

    /// The structure has no atom with positive occupancy.
    NoOccupiedAtoms,

    /// Reading the structure file failed.
    Io { text: String },

    // ---- Report ----
    /// The report document could not be serialized.
    Serialization { text: String },
}

impl std::error::Error for MixtureError {}

impl std::fmt::Display for MixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            MixtureError::EmptyData => write!(f, "Observation vector is empty"),
            MixtureError::NonFiniteData { index, value } => {
                write!(f, "Observation at index {index} is non-finite: {value}")
            }
            MixtureError::NonPositiveData { index, value } => {
                write!(f, "Observation at index {index} must be > 0, got {value}")
            }

            // ---- Options validation ----
            MixtureError::InvalidModeCount { n_modes, reason } => {
                write!(f, "Invalid number of modes {n_modes}: {reason}")
            }
            MixtureError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid tolerance {tol}: {reason}")
            }
            MixtureError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }

            // ---- Responsibilities ----
            MixtureError::MissingResponsibilities { n_modes } => {
                write!(
                    f,
                    "Inverse Gamma mixture with {n_modes} modes requires initial responsibilities"
                )
            }
            MixtureError::ResponsibilityShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Responsibility shape mismatch: expected {expected:?}, found {found:?}"
                )
            }
            MixtureError::InvalidResponsibility { row, col, value } => {
                write!(f, "Responsibility at ({row}, {col}) must lie in [0, 1], got {value}")
            }
            MixtureError::RowSumMismatch { row, sum } => {
                write!(f, "Responsibilities in row {row} must sum to 1, got {sum}")
            }
            MixtureError::EmptyMode { mode } => {
                write!(f, "Mode {mode} has no observation above the membership threshold")
            }

            // ---- Query surface ----
            MixtureError::ModelNotFitted => write!(f, "Model has not been fitted yet"),
            MixtureError::InvalidProbability { value } => {
                write!(f, "Probability must lie in [0, 1], got {value}")
            }
            MixtureError::InvalidDistribution { text } => {
                write!(f, "Invalid Inverse Gamma parameters: {text}")
            }

            // ---- Estimation / optimizer ----
            MixtureError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }

            // ---- Ingest ----
            MixtureError::MalformedRecord { line, reason } => {
                write!(f, "Malformed coordinate record on line {line}: {reason}")
            }
            MixtureError::NoOccupiedAtoms => {
                write!(f, "Structure contains no atoms with positive occupancy")
            }
            MixtureError::Io { text } => write!(f, "I/O error: {text}"),

            // ---- Report ----
            MixtureError::Serialization { text } => {
                write!(f, "Report serialization failed: {text}")
            }
        }
    }
}

impl From<OptError> for MixtureError {
    fn from(err: OptError) -> Self {
        MixtureError::OptimizationFailed { status: err.to_string() }
    }
}

impl From<InverseGammaError> for MixtureError {
    fn from(err: InverseGammaError) -> Self {
        MixtureError::InvalidDistribution { text: err.to_string() }
    }
}

impl From<serde_json::Error> for MixtureError {
    fn from(err: serde_json::Error) -> Self {
        MixtureError::Serialization { text: err.to_string() }
    }
}

impl From<std::io::Error> for MixtureError {
    fn from(err: std::io::Error) -> Self {
        MixtureError::Io { text: err.to_string() }
    }
}
