//! bfactor_mixtures — Inverse-Gamma mixture models for atomic B-factors.
//!
//! Purpose
//! -------
//! Classify the atoms of a macromolecular structure into B-factor
//! populations by fitting a mixture of shifted Inverse-Gamma distributions,
//! and report how well the fit describes the data.
//!
//! Key behaviors
//! -------------
//! - [`ingest`]: PDB text → occupancy-filtered B-factor vector.
//! - [`mixture`]: EM fit with a randomly damped Newton M-step on an
//!   analytic Fisher matrix, backtracking line search, and the fitted
//!   pdf / cdf / ppf query surface.
//! - [`optimization`]: Newton direction, line search and special functions
//!   shared by the mixture stack.
//! - [`inference`]: observed-information standard errors.
//! - [`diagnostics`] and [`report`]: plot data, goodness of fit and the
//!   serializable report document.
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything runs single-threaded and in memory; the only I/O is reading
//!   structure files and writing report JSON on request.
//! - Randomness comes from a generator owned by each model and seeded from
//!   its options, so seeded fits are reproducible.
//!
//! Conventions
//! -----------
//! - Errors are typed per layer (`MixtureError`, `OptError`) and converted
//!   upward with `From`.
//! - Logging goes through the `log` facade; binaries choose the logger.
//!
//! Downstream usage
//! ----------------
//! ```rust,no_run
//! use bfactor_mixtures::{ingest::read_pdb, mixture::prelude::*};
//!
//! let data = read_pdb("1abc.pdb")?.b_factors()?;
//! let mut model = InverseGammaMixture::new(MixtureOptions::default());
//! model.fit(&data, None)?;
//! model.report(&data, "1abc.pdb")?.write_json("1abc.igmm.json")?;
//! # Ok::<(), MixtureError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code; `tests/integration_igmm_pipeline.rs`
//!   runs ingest → fit → query → report end to end.

pub mod diagnostics;
pub mod inference;
pub mod ingest;
pub mod mixture;
pub mod optimization;
pub mod report;
