//! diagnostics — plot data and goodness-of-fit statistics for fitted mixtures.
//!
//! Purpose
//! -------
//! Turn a fitted mixture and its observations into the figures and summary
//! statistics a report displays. Nothing here renders images or performs
//! I/O; outputs are plain serializable data.
//!
//! Key behaviors
//! -------------
//! - [`plots`]: mixture density overlay, P-P plot and Q-Q plot as
//!   [`PlotData`].
//! - [`gof`]: Kolmogorov–Smirnov statistic and asymptotic p-value
//!   ([`KSOutcome`]).
//!
//! Downstream usage
//! ----------------
//! - `InverseGammaMixture::report` calls the three plot builders under the
//!   keys `<file>.mixture_igmm`, `<file>.pp_igmm`, `<file>.qq_igmm` and adds
//!   the KS outcome to the output table.

pub mod gof;
pub mod plots;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::gof::KSOutcome;
pub use self::plots::{PlotData, Series, SeriesKind, mixture_plot, pp_plot, qq_plot};

pub mod prelude {
    pub use super::gof::KSOutcome;
    pub use super::plots::{PlotData, mixture_plot, pp_plot, qq_plot};
}
