//! ingest::pdb — B-factors from PDB coordinate text.
//!
//! Purpose
//! -------
//! Read the fixed-column `ATOM`/`HETATM` records of the first model of a PDB
//! file and hand the isotropic B-factors of occupied atoms to the fitting
//! code as [`BFactorData`].
//!
//! Key behaviors
//! -------------
//! - Columns (1-based, inclusive): atom name 13–16, residue name 18–20,
//!   chain 22, residue number 23–26, occupancy 55–60, B-factor 61–66.
//! - Only the first model is read; parsing stops at the first `ENDMDL`.
//! - `REMARK   2 RESOLUTION.` supplies the resolution when it is numeric.
//! - [`Structure::b_factors`] keeps atoms with occupancy > 0.
//!
//! Invariants & assumptions
//! ------------------------
//! - Line numbers in [`MixtureError::MalformedRecord`] are 1-based.
//! - Trailing columns beyond the B-factor (element, charge) are ignored.
use crate::mixture::{
    core::data::BFactorData,
    errors::{MixtureError, MixtureResult},
};
use log::{debug, warn};
use ndarray::Array1;
use std::{fs, path::Path};

/// Resolution assumed when the file does not state one (Å).
pub const DEFAULT_RESOLUTION: f64 = 2.0;

/// One coordinate record.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub name: String,
    pub res_name: String,
    pub chain: char,
    pub res_seq: i32,
    pub occupancy: f64,
    pub b_iso: f64,
}

/// Atoms of the first model plus header information.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    pub atoms: Vec<Atom>,
    pub resolution: Option<f64>,
}

impl Structure {
    /// B-factors of atoms with positive occupancy, in file order.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::NoOccupiedAtoms` if no atom has occupancy > 0.
    /// - Validation errors of [`BFactorData::new`] (e.g. a B-factor ≤ 0).
    pub fn b_factors(&self) -> MixtureResult<BFactorData> {
        let values: Vec<f64> =
            self.atoms.iter().filter(|a| a.occupancy > 0.0).map(|a| a.b_iso).collect();
        if values.is_empty() {
            return Err(MixtureError::NoOccupiedAtoms);
        }
        BFactorData::new(Array1::from(values))
    }

    /// Stated resolution, or [`DEFAULT_RESOLUTION`] with a warning.
    pub fn resolution_or_default(&self) -> f64 {
        match self.resolution {
            Some(r) => r,
            None => {
                warn!("Resolution is not available; using {DEFAULT_RESOLUTION} Å");
                DEFAULT_RESOLUTION
            }
        }
    }
}

/// Parse PDB text.
///
/// Errors
/// ------
/// - `MixtureError::MalformedRecord` if an `ATOM`/`HETATM` record has a
///   missing or non-numeric residue number, occupancy or B-factor.
pub fn parse_pdb(text: &str) -> MixtureResult<Structure> {
    let mut structure = Structure::default();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let record = field(line, 0, 6);
        match record {
            "ATOM" | "HETATM" => structure.atoms.push(parse_atom(line, line_no)?),
            "ENDMDL" => break,
            "REMARK" if field(line, 6, 10) == "2" => {
                if let Some(r) = parse_resolution(line) {
                    structure.resolution = Some(r);
                }
            }
            _ => {}
        }
    }
    debug!("parsed {} atoms, resolution {:?}", structure.atoms.len(), structure.resolution);
    Ok(structure)
}

/// Read and parse a PDB file.
///
/// Errors
/// ------
/// - `MixtureError::Io` if the file cannot be read.
/// - As for [`parse_pdb`].
pub fn read_pdb<P: AsRef<Path>>(path: P) -> MixtureResult<Structure> {
    let text = fs::read_to_string(path)?;
    parse_pdb(&text)
}

// ---- Helper methods ----

/// Trimmed text of 0-based columns `[start, end)`, empty when out of range.
fn field(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).map(str::trim).unwrap_or("")
}

fn parse_atom(line: &str, line_no: usize) -> MixtureResult<Atom> {
    let number = |start: usize, end: usize, what: &str| -> MixtureResult<f64> {
        let raw = field(line, start, end);
        raw.parse::<f64>().map_err(|_| MixtureError::MalformedRecord {
            line: line_no,
            reason: format!("{what} {raw:?} is not a number"),
        })
    };
    let res_raw = field(line, 22, 26);
    let res_seq = res_raw.parse::<i32>().map_err(|_| MixtureError::MalformedRecord {
        line: line_no,
        reason: format!("residue number {res_raw:?} is not an integer"),
    })?;
    Ok(Atom {
        name: field(line, 12, 16).to_string(),
        res_name: field(line, 17, 20).to_string(),
        chain: field(line, 21, 22).chars().next().unwrap_or(' '),
        res_seq,
        occupancy: number(54, 60, "occupancy")?,
        b_iso: number(60, 66, "B-factor")?,
    })
}

fn parse_resolution(line: &str) -> Option<f64> {
    let (_, rest) = line.split_once("RESOLUTION.")?;
    rest.split_whitespace().next()?.parse::<f64>().ok()
}
