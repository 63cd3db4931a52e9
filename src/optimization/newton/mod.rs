//! newton — damped Newton directions and backtracking for custom M-steps.
//!
//! Purpose
//! -------
//! Provide the two building blocks of a second-order parameter update that
//! is driven by an analytically derived Hessian rather than by a generic
//! solver: a randomly damped Newton direction ([`damped_newton_direction`])
//! and a shrink-until-no-worse line search ([`backtrack`]).
//!
//! Key behaviors
//! -------------
//! - Damp the Hessian with a symmetric random perturbation scaled by a
//!   tolerance, invert it with `nalgebra`, and return `-(H + tol·E)⁻¹ g`.
//! - Search step sizes `initial_step · shrink^k` until the caller-supplied
//!   objective does not increase, or report failure once the step falls to
//!   the floor.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are *minimized*; "accepted" means the candidate objective is
//!   `<=` the reference.
//! - Randomness is always injected by the caller (`&mut impl Rng`); nothing in
//!   this module touches global state.
//!
//! Downstream usage
//! ----------------
//! - The Inverse-Gamma mixture M-step computes a `FisherBundle`, asks
//!   [`damped_newton_direction`] for a direction, then calls [`backtrack`]
//!   with a closure that clamps and re-evaluates candidate parameters.
//!
//! Testing notes
//! -------------
//! - `damping` tests cover exactness without damping, reproducibility and
//!   error paths; `backtrack` tests cover acceptance, exhaustion and option
//!   validation.

pub mod backtrack;
pub mod damping;
pub mod types;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::backtrack::{LineSearchOptions, LineSearchOutcome, backtrack};
pub use self::damping::damped_newton_direction;
pub use self::types::{Cost, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::backtrack::{LineSearchOptions, LineSearchOutcome, backtrack};
    pub use super::damping::damped_newton_direction;
    pub use super::types::{Cost, Grad, Hessian, Theta};
}
