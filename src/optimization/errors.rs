//! optimization::errors — error surface for Newton steps and Hessian tools.
//!
//! Every fallible routine under `optimization` (and the finite-difference
//! helpers in `inference`) returns [`OptResult<T>`]. Model layers convert
//! [`OptError`] into their own error enums via `From`.

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- Hessian ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    /// Hessian values need to be finite.
    InvalidHessian { row: usize, col: usize, value: f64 },

    /// Damped Hessian could not be inverted.
    SingularHessian { dim: usize },

    // ---- Newton direction ----
    /// Newton direction contains NaN/±inf.
    NonFiniteDirection { index: usize, value: f64 },

    // ---- Line search ----
    /// Step schedule must satisfy 0 < min_step < initial_step and 0 < shrink < 1.
    InvalidStepSchedule { value: f64, reason: &'static str },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- Hessian ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }
            OptError::SingularHessian { dim } => {
                write!(f, "Damped {dim}x{dim} Hessian is singular and cannot be inverted")
            }

            // ---- Newton direction ----
            OptError::NonFiniteDirection { index, value } => {
                write!(f, "Newton direction at index {index} is non-finite: {value}")
            }

            // ---- Line search ----
            OptError::InvalidStepSchedule { value, reason } => {
                write!(f, "Invalid step schedule value {value}: {reason}")
            }
        }
    }
}
