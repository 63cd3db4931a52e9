//! ingest — observation vectors from structure files.
//!
//! Purpose
//! -------
//! Boundary between coordinate files and the fitting code: parse a
//! structure, filter atoms by positive occupancy, and produce a validated
//! [`BFactorData`](crate::mixture::core::data::BFactorData).
//!
//! Downstream usage
//! ----------------
//! ```rust,no_run
//! use bfactor_mixtures::ingest::read_pdb;
//!
//! let structure = read_pdb("1abc.pdb")?;
//! let data = structure.b_factors()?;
//! # Ok::<(), bfactor_mixtures::mixture::errors::MixtureError>(())
//! ```

pub mod pdb;

pub use self::pdb::{Atom, DEFAULT_RESOLUTION, Structure, parse_pdb, read_pdb};

pub mod prelude {
    pub use super::pdb::{Structure, parse_pdb, read_pdb};
}
